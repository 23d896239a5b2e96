use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

pub mod health;
pub mod pages;
pub mod players;
pub mod sse;

/// Compose the API and page trees, add Swagger UI at `/docs`, and bind the shared state.
pub fn router(state: SharedState) -> Router<()> {
    let swagger: Router<SharedState> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    health::router()
        .merge(sse::router())
        .merge(players::router())
        .merge(pages::router())
        .merge(swagger)
        .with_state(state)
}
