use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::format_system_time;

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    /// Confirmation of a successful action.
    Default,
    /// Failure the user should notice.
    Destructive,
}

/// Transient message pushed to the user interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl Notification {
    fn new(
        variant: NotificationVariant,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            variant,
            created_at: format_system_time(SystemTime::now()),
        }
    }

    /// Build a success notification.
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationVariant::Default, title, description)
    }

    /// Build a destructive (error) notification.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationVariant::Destructive, title, description)
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}
