use std::convert::Infallible;

use axum::{Json, Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{
    dto::notification::Notification, services::notification_service, state::SharedState,
};

#[utoipa::path(
    get,
    path = "/sse/notifications",
    tag = "notifications",
    responses((status = 200, description = "Notification stream, recent entries replayed first", content_type = "text/event-stream", body = String))
)]
/// Stream notifications to a connected client.
pub async fn notification_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let (backlog, receiver) = notification_service::subscribe(&state);
    info!(replayed = backlog.len(), "new notification SSE connection");
    notification_service::to_sse_stream(backlog, receiver)
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "notifications",
    responses((status = 200, description = "Recent notifications, oldest first", body = [Notification]))
)]
/// Return the recent notifications for clients that poll.
pub async fn recent_notifications(State(state): State<SharedState>) -> Json<Vec<Notification>> {
    Json(notification_service::recent(&state))
}

/// Configure the notification endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/sse/notifications", get(notification_stream))
        .route("/api/notifications", get(recent_notifications))
}
