use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};

use crate::{
    dao::models::PlayerList,
    dto::players::{PlayerDoc, RenameRequest},
    error::AppError,
    services::roster_service,
    state::SharedState,
};

/// Roster endpoints: read, replace-all and rename-by-id.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/players", get(list_players).put(replace_players))
        .route("/api/players/{id}/name", patch(rename_player))
}

#[utoipa::path(
    get,
    path = "/api/players",
    tag = "players",
    responses((status = 200, description = "Current roster", body = [PlayerDoc]))
)]
/// Return the roster in storage order.
pub async fn list_players(State(state): State<SharedState>) -> Json<PlayerList> {
    Json(roster_service::list_players(&state).await)
}

#[utoipa::path(
    put,
    path = "/api/players",
    tag = "players",
    request_body = [PlayerDoc],
    responses(
        (status = 200, description = "Roster replaced and persisted", body = [PlayerDoc]),
        (status = 503, description = "Roster replaced in memory but not persisted")
    )
)]
/// Replace the whole roster.
pub async fn replace_players(
    State(state): State<SharedState>,
    Json(players): Json<PlayerList>,
) -> Result<Json<PlayerList>, AppError> {
    let players = roster_service::replace_players(&state, players).await?;
    Ok(Json(players))
}

#[utoipa::path(
    patch,
    path = "/api/players/{id}/name",
    tag = "players",
    params(("id" = String, Path, description = "Player identifier")),
    request_body = RenameRequest,
    responses(
        (status = 200, description = "Roster after the rename; unknown ids leave it unchanged", body = [PlayerDoc]),
        (status = 503, description = "Renamed in memory but not persisted")
    )
)]
/// Rename every player carrying `id`.
pub async fn rename_player(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<PlayerList>, AppError> {
    let players = roster_service::rename_player(&state, &id, &request.name).await?;
    Ok(Json(players))
}
