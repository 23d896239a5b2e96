use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use tokio::sync::broadcast;
use tracing::info;

use crate::dto::notification::Notification;

/// Fan-out of user-facing notifications with a short replay buffer.
///
/// Business logic only pushes into the hub; delivery (SSE, polling) subscribes
/// on its own schedule.
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
    history: Mutex<VecDeque<Notification>>,
    history_limit: usize,
}

impl NotificationHub {
    /// Construct a hub with a broadcast buffer of `capacity` and a replay buffer of `history_limit`.
    pub fn new(capacity: usize, history_limit: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            history: Mutex::new(VecDeque::with_capacity(history_limit)),
            history_limit,
        }
    }

    /// Record `notification` and send it to current subscribers, ignoring delivery errors.
    pub fn notify(&self, notification: Notification) {
        info!(
            title = %notification.title,
            variant = ?notification.variant,
            "notification emitted"
        );

        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if self.history_limit > 0 {
            if history.len() == self.history_limit {
                history.pop_front();
            }
            history.push_back(notification.clone());
        }
        // Sent under the history lock so `subscribe_with_history` never sees it twice.
        let _ = self.sender.send(notification);
    }

    /// Register a new subscriber that will receive subsequent notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Snapshot the replay buffer and subscribe atomically.
    pub fn subscribe_with_history(&self) -> (Vec<Notification>, broadcast::Receiver<Notification>) {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        (history.iter().cloned().collect(), self.sender.subscribe())
    }

    /// Most recent notifications, oldest first.
    pub fn history(&self) -> Vec<Notification> {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.iter().cloned().collect()
    }
}
