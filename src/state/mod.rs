mod notifications;

use std::sync::Arc;

use tokio::{
    sync::{OnceCell, RwLock},
    task,
};

use crate::dao::{
    models::PlayerList,
    player_store::PlayerStore,
    storage::{StorageError, StorageResult},
};

pub use self::notifications::NotificationHub;

/// Reference-counted handle shared by every route.
pub type SharedState = Arc<AppState>;

/// What the one-time startup load found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the roster key.
    Absent,
    /// The store itself could not be read.
    Unreadable,
    /// Stored text is not JSON.
    Malformed,
    /// Stored text is JSON but not a list of players.
    WrongShape,
    /// Roster restored.
    Loaded {
        /// Number of players restored.
        count: usize,
    },
}

/// Single source of truth for the session: the roster, its store, and the notification hub.
pub struct AppState {
    roster: RwLock<PlayerList>,
    store: PlayerStore,
    notifications: NotificationHub,
    initialized: OnceCell<LoadOutcome>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The roster starts empty until [`AppState::initialize`] runs.
    pub fn new(store: PlayerStore, notifications: NotificationHub) -> SharedState {
        Arc::new(Self {
            roster: RwLock::new(PlayerList::default()),
            store,
            notifications,
            initialized: OnceCell::new(),
        })
    }

    /// Roster store adapter.
    pub fn store(&self) -> &PlayerStore {
        &self.store
    }

    /// Notification fan-out.
    pub fn notifications(&self) -> &NotificationHub {
        &self.notifications
    }

    /// Snapshot of the current roster.
    pub async fn players(&self) -> PlayerList {
        self.roster.read().await.clone()
    }

    /// Run `init` the first time only; later calls return the first outcome.
    pub async fn initialize<F, Fut>(&self, init: F) -> LoadOutcome
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = LoadOutcome>,
    {
        *self.initialized.get_or_init(init).await
    }

    /// Install a roster read from the store, without writing it back.
    pub(crate) async fn seed(&self, players: PlayerList) {
        *self.roster.write().await = players;
    }

    /// Apply `mutate` to the roster and write the result through to the store.
    ///
    /// The roster lock is held across the write, so no reader sees memory and
    /// storage disagree. The write itself runs on the blocking pool. The new
    /// roster is kept even when the write fails.
    pub async fn commit<F>(&self, mutate: F) -> (PlayerList, StorageResult<()>)
    where
        F: FnOnce(&PlayerList) -> PlayerList,
    {
        let mut roster = self.roster.write().await;
        let next = mutate(&roster);
        *roster = next.clone();

        let store = self.store.clone();
        let snapshot = next.clone();
        let persisted = match task::spawn_blocking(move || store.write_players(&snapshot)).await {
            Ok(result) => result,
            Err(err) => Err(StorageError::unavailable("roster write task failed", err)),
        };
        (next, persisted)
    }
}
