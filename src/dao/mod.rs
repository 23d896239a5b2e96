/// Key-value backends the roster is persisted into.
pub mod key_value;
/// Persisted player records and the list transformations applied to them.
pub mod models;
/// Adapter binding a key-value backend to the roster storage key.
pub mod player_store;
/// Storage error types shared by every backend.
pub mod storage;
