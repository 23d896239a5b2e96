use axum::{
    Json, Router,
    extract::{Path, State},
    http::Uri,
    routing::get,
};

use crate::{
    dto::page::PageView,
    error::AppError,
    services::pages::{self, Page},
    state::SharedState,
};

/// Client page routes. Each returns the props the page is given.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(pages::HOME_PATH, get(home))
        .route(pages::LINEUP_PATH, get(lineup))
        .route(pages::STATISTICS_PATH, get(statistics))
        .route(pages::MATCHES_PATH, get(matches))
        .route("/partidos/{id}", get(match_detail))
        .fallback(resolve_or_not_found)
}

#[utoipa::path(get, path = "/", tag = "pages",
    responses((status = 200, description = "Roster page", body = PageView)))]
/// Roster page: list, replace-all and rename.
pub async fn home(State(state): State<SharedState>) -> Json<PageView> {
    Json(pages::render(&state, Page::Home).await)
}

#[utoipa::path(get, path = "/alineacion", tag = "pages",
    responses((status = 200, description = "Lineup builder page", body = PageView)))]
/// Lineup builder: list, replace-all and rename.
pub async fn lineup(State(state): State<SharedState>) -> Json<PageView> {
    Json(pages::render(&state, Page::Lineup).await)
}

#[utoipa::path(get, path = "/estadisticas", tag = "pages",
    responses((status = 200, description = "Statistics page", body = PageView)))]
/// Statistics: list and rename.
pub async fn statistics(State(state): State<SharedState>) -> Json<PageView> {
    Json(pages::render(&state, Page::Statistics).await)
}

#[utoipa::path(get, path = "/partidos", tag = "pages",
    responses((status = 200, description = "Matches page", body = PageView)))]
/// Matches: no shell props.
pub async fn matches(State(state): State<SharedState>) -> Json<PageView> {
    Json(pages::render(&state, Page::Matches).await)
}

#[utoipa::path(get, path = "/partidos/{id}", tag = "pages",
    params(("id" = String, Path, description = "Match identifier, passed through untouched")),
    responses((status = 200, description = "Match detail page", body = PageView)))]
/// Match detail: list and replace-all.
pub async fn match_detail(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Json<PageView> {
    Json(pages::render(&state, Page::MatchDetail { id }).await)
}

/// Serve paths the literal routes miss (trailing slashes) or answer 404.
async fn resolve_or_not_found(
    State(state): State<SharedState>,
    uri: Uri,
) -> Result<Json<PageView>, AppError> {
    let page = Page::resolve(uri.path())
        .ok_or_else(|| AppError::NotFound(format!("no page at `{}`", uri.path())))?;
    Ok(Json(pages::render(&state, page).await))
}
