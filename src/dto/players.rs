use serde::Deserialize;
use utoipa::ToSchema;

/// Documentation shape of a player; extra attributes are stored as sent.
#[derive(Debug, ToSchema)]
#[schema(as = Player)]
pub struct PlayerDoc {
    /// Stable identifier, unique within the roster.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Body of the rename operation. Any string is accepted, including an empty one.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameRequest {
    pub name: String,
}
