use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" when the roster store answers, "degraded" otherwise.
    pub status: String,
    /// Number of players currently held in memory.
    pub players: usize,
}

impl HealthResponse {
    /// Store reachable.
    pub fn ok(players: usize) -> Self {
        Self {
            status: "ok".to_string(),
            players,
        }
    }

    /// Store unreachable; writes will fail until it recovers.
    pub fn degraded(players: usize) -> Self {
        Self {
            status: "degraded".to_string(),
            players,
        }
    }
}
