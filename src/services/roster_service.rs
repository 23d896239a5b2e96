//! Startup load and the two write-through mutations of the roster.

use tracing::{debug, error, info, warn};

use crate::{
    dao::{
        models::PlayerList,
        player_store::{Decoded, decode_persisted},
        storage::StorageError,
    },
    dto::notification::Notification,
    error::ServiceError,
    state::{LoadOutcome, SharedState},
};

/// Populate the roster from the store. Only the first call per state does any work.
pub async fn load_players(state: &SharedState) -> LoadOutcome {
    state.initialize(|| read_persisted(state)).await
}

async fn read_persisted(state: &SharedState) -> LoadOutcome {
    let key = state.store().key();
    let raw = match state.store().read() {
        // An empty string is treated like a missing value.
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => {
            debug!(key, "no persisted players");
            return LoadOutcome::Absent;
        }
        Err(err) => {
            error!(key, error = %err, "failed to read persisted players");
            state.notifications().notify(players_load_failed());
            return LoadOutcome::Unreadable;
        }
    };

    match decode_persisted(&raw) {
        Decoded::Players(players) => {
            let count = players.len();
            info!(key, count, "players loaded from store");
            debug!(?players, "loaded roster");
            state.seed(players).await;
            state.notifications().notify(players_loaded());
            LoadOutcome::Loaded { count }
        }
        Decoded::WrongShape(reason) => {
            warn!(key, %reason, "ignoring persisted players with unexpected shape");
            LoadOutcome::WrongShape
        }
        Decoded::Malformed(err) => {
            error!(key, error = %err, "error loading players");
            state.notifications().notify(players_load_failed());
            LoadOutcome::Malformed
        }
    }
}

/// Current roster.
pub async fn list_players(state: &SharedState) -> PlayerList {
    state.players().await
}

/// Rename every player with `player_id` and persist the whole roster.
///
/// An unknown id still rewrites the (unchanged) roster. No notification is sent on success.
pub async fn rename_player(
    state: &SharedState,
    player_id: &str,
    name: &str,
) -> Result<PlayerList, ServiceError> {
    let (players, persisted) = state.commit(|current| current.renamed(player_id, name)).await;
    debug!(player_id, name, ?players, "player name updated");
    persisted.map_err(|err| save_failed(state, err))?;
    Ok(players)
}

/// Replace the roster wholesale, persist it, and confirm to the user.
pub async fn replace_players(
    state: &SharedState,
    players: PlayerList,
) -> Result<PlayerList, ServiceError> {
    let (players, persisted) = state.commit(move |_| players).await;
    debug!(count = players.len(), ?players, "player list replaced");
    persisted.map_err(|err| save_failed(state, err))?;
    state.notifications().notify(players_saved());
    Ok(players)
}

/// The in-memory roster stays authoritative; the next successful write catches the store up.
fn save_failed(state: &SharedState, err: StorageError) -> ServiceError {
    error!(key = state.store().key(), error = %err, "failed to persist players");
    state.notifications().notify(players_save_failed());
    ServiceError::Unavailable(err)
}

fn players_loaded() -> Notification {
    Notification::success(
        "Jugadores cargados",
        "Se han recuperado los jugadores guardados",
    )
}

fn players_load_failed() -> Notification {
    Notification::destructive(
        "Error al cargar jugadores",
        "Hubo un error al cargar los jugadores guardados",
    )
}

fn players_saved() -> Notification {
    Notification::success(
        "Jugadores guardados",
        "Los cambios han sido guardados correctamente",
    )
}

fn players_save_failed() -> Notification {
    Notification::destructive(
        "Error al guardar jugadores",
        "Los cambios no se han podido guardar",
    )
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use serde_json::Value;

    use super::*;
    use crate::{
        dao::{
            key_value::{KeyValueStore, MemoryKeyValueStore},
            models::PlayerEntity,
            player_store::{DEFAULT_STORAGE_KEY, PlayerStore},
            storage::StorageResult,
        },
        dto::notification::NotificationVariant,
        state::{AppState, NotificationHub},
    };

    fn state_with(backend: Arc<dyn KeyValueStore>) -> SharedState {
        AppState::new(
            PlayerStore::with_default_key(backend),
            NotificationHub::new(8, 8),
        )
    }

    fn seeded(raw: &str) -> (SharedState, Arc<MemoryKeyValueStore>) {
        let backend = Arc::new(MemoryKeyValueStore::with_entry(DEFAULT_STORAGE_KEY, raw));
        (state_with(backend.clone()), backend)
    }

    fn variants(state: &SharedState) -> Vec<NotificationVariant> {
        state
            .notifications()
            .history()
            .into_iter()
            .map(|n| n.variant)
            .collect()
    }

    fn persisted(backend: &MemoryKeyValueStore) -> Value {
        let raw = backend.get(DEFAULT_STORAGE_KEY).unwrap().expect("roster persisted");
        serde_json::from_str(&raw).unwrap()
    }

    fn two_players() -> PlayerList {
        PlayerList::new(vec![PlayerEntity::new("1", "A"), PlayerEntity::new("2", "B")])
    }

    /// Backend whose reads succeed but whose writes always fail.
    struct ReadOnlyStore(MemoryKeyValueStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::unavailable(
                "quota exceeded",
                io::Error::other("quota exceeded"),
            ))
        }
    }

    /// Backend that cannot be read at all.
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::unavailable(
                "storage disabled",
                io::Error::other("storage disabled"),
            ))
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_from_unreadable_store_notifies_failure() {
        let state = state_with(Arc::new(UnreadableStore));

        assert_eq!(load_players(&state).await, LoadOutcome::Unreadable);
        assert!(state.players().await.is_empty());
        assert_eq!(variants(&state), [NotificationVariant::Destructive]);
    }

    #[tokio::test]
    async fn load_restores_persisted_roster_in_order() {
        let list = PlayerList::new(vec![
            PlayerEntity::new("9", "Nine").with_attribute("position", "FW"),
            PlayerEntity::new("1", "One"),
            PlayerEntity::new("5", "Five"),
        ]);
        let (state, _) = seeded(&serde_json::to_string(&list).unwrap());

        assert_eq!(load_players(&state).await, LoadOutcome::Loaded { count: 3 });
        assert_eq!(state.players().await, list);
        assert_eq!(variants(&state), [NotificationVariant::Default]);
    }

    #[tokio::test]
    async fn load_of_malformed_text_notifies_once() {
        let (state, _) = seeded("{not json");

        assert_eq!(load_players(&state).await, LoadOutcome::Malformed);
        assert!(state.players().await.is_empty());
        assert_eq!(variants(&state), [NotificationVariant::Destructive]);
    }

    #[tokio::test]
    async fn load_of_absent_value_is_silent() {
        let state = state_with(Arc::new(MemoryKeyValueStore::new()));

        assert_eq!(load_players(&state).await, LoadOutcome::Absent);
        assert!(state.players().await.is_empty());
        assert!(state.notifications().history().is_empty());
    }

    #[tokio::test]
    async fn load_of_empty_string_is_treated_as_absent() {
        let (state, _) = seeded("");
        assert_eq!(load_players(&state).await, LoadOutcome::Absent);
        assert!(state.notifications().history().is_empty());
    }

    #[tokio::test]
    async fn load_of_non_array_json_is_silent() {
        let (state, _) = seeded(r#"{"id":"1","name":"A"}"#);

        assert_eq!(load_players(&state).await, LoadOutcome::WrongShape);
        assert!(state.players().await.is_empty());
        assert!(state.notifications().history().is_empty());
    }

    #[tokio::test]
    async fn load_runs_only_once() {
        let (state, backend) = seeded(r#"[{"id":"1","name":"A"}]"#);
        assert_eq!(load_players(&state).await, LoadOutcome::Loaded { count: 1 });

        backend.set(DEFAULT_STORAGE_KEY, "garbage").unwrap();
        assert_eq!(load_players(&state).await, LoadOutcome::Loaded { count: 1 });
        assert_eq!(state.notifications().history().len(), 1);
    }

    #[tokio::test]
    async fn foreign_elements_load_and_survive_a_rename() {
        let raw = r#"[{"id":1,"name":"A","position":"GK"},{"id":"2","name":"B"},"legacy"]"#;
        let (state, backend) = seeded(raw);

        assert_eq!(load_players(&state).await, LoadOutcome::Loaded { count: 3 });
        assert_eq!(variants(&state), [NotificationVariant::Default]);

        rename_player(&state, "2", "Z").await.unwrap();

        assert_eq!(
            persisted(&backend),
            serde_json::json!([
                { "id": 1, "name": "A", "position": "GK" },
                { "id": "2", "name": "Z" },
                "legacy"
            ])
        );
    }

    #[tokio::test]
    async fn rename_of_missing_id_still_persists_unchanged_roster() {
        let (state, backend) = seeded(&serde_json::to_string(&two_players()).unwrap());
        load_players(&state).await;
        backend.set(DEFAULT_STORAGE_KEY, "stale").unwrap();

        let players = rename_player(&state, "404", "new").await.unwrap();

        assert_eq!(players, two_players());
        assert_eq!(persisted(&backend), serde_json::to_value(two_players()).unwrap());
    }

    #[tokio::test]
    async fn rename_writes_through_without_notifying() {
        let (state, backend) = seeded(&serde_json::to_string(&two_players()).unwrap());
        load_players(&state).await;
        let before = state.notifications().history().len();

        let players = rename_player(&state, "2", "Z").await.unwrap();

        let expected = PlayerList::new(vec![PlayerEntity::new("1", "A"), PlayerEntity::new("2", "Z")]);
        assert_eq!(players, expected);
        assert_eq!(state.players().await, expected);
        assert_eq!(
            backend.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"1","name":"A"},{"id":"2","name":"Z"}]"#)
        );
        assert_eq!(state.notifications().history().len(), before);
    }

    #[tokio::test]
    async fn replace_overwrites_instead_of_merging() {
        let (state, backend) = seeded(&serde_json::to_string(&two_players()).unwrap());
        load_players(&state).await;

        let replacement = PlayerList::new(vec![PlayerEntity::new("3", "C").with_attribute("number", 10)]);
        let players = replace_players(&state, replacement.clone()).await.unwrap();

        assert_eq!(players, replacement);
        assert_eq!(state.players().await, replacement);
        assert_eq!(persisted(&backend), serde_json::to_value(&replacement).unwrap());

        let history = state.notifications().history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].title, "Jugadores guardados");
        assert!(!history[1].is_destructive());
    }

    #[tokio::test]
    async fn store_matches_memory_after_every_mutation() {
        let backend = Arc::new(MemoryKeyValueStore::new());
        let state = state_with(backend.clone());
        load_players(&state).await;

        replace_players(&state, two_players()).await.unwrap();
        rename_player(&state, "1", "Alpha").await.unwrap();
        rename_player(&state, "2", "").await.unwrap();
        replace_players(&state, PlayerList::default()).await.unwrap();
        rename_player(&state, "1", "ghost").await.unwrap();

        assert_eq!(
            persisted(&backend),
            serde_json::to_value(state.players().await).unwrap()
        );
    }

    #[tokio::test]
    async fn failed_write_keeps_memory_and_notifies() {
        let state = state_with(Arc::new(ReadOnlyStore(MemoryKeyValueStore::with_entry(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":"1","name":"A"}]"#,
        ))));
        load_players(&state).await;

        let err = rename_player(&state, "1", "B").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert_eq!(state.players().await.players()[0].name(), Some("B"));

        let err = replace_players(&state, two_players()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert_eq!(state.players().await, two_players());

        assert_eq!(
            variants(&state),
            [
                NotificationVariant::Default,
                NotificationVariant::Destructive,
                NotificationVariant::Destructive,
            ]
        );
    }
}
