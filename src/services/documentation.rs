use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the football manager backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::notification_stream,
        crate::routes::sse::recent_notifications,
        crate::routes::players::list_players,
        crate::routes::players::replace_players,
        crate::routes::players::rename_player,
        crate::routes::pages::home,
        crate::routes::pages::lineup,
        crate::routes::pages::statistics,
        crate::routes::pages::matches,
        crate::routes::pages::match_detail,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::notification::Notification,
            crate::dto::notification::NotificationVariant,
            crate::dto::page::PageView,
            crate::dto::page::PageAction,
            crate::dto::page::NavLink,
            crate::dto::players::PlayerDoc,
            crate::dto::players::RenameRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "notifications", description = "User-facing notifications"),
        (name = "players", description = "Roster reads and mutations"),
        (name = "pages", description = "Client pages and the props they receive"),
    )
)]
pub struct ApiDoc;
