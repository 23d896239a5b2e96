use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the roster store and report how many players are held in memory.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let players = state.players().await.len();
    match state.store().health_check() {
        Ok(()) => HealthResponse::ok(players),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded(players)
        }
    }
}
