use serde::Serialize;
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::dao::models::PlayerList;

/// Everything a client needs to render one routed page.
#[skip_serializing_none]
#[derive(Debug, Serialize, ToSchema)]
pub struct PageView {
    /// Stable page name (`home`, `lineup`, `statistics`, `matches`, `match_detail`).
    pub page: String,
    /// Canonical path of the page.
    pub path: String,
    /// Route parameter of the match detail page, passed through untouched.
    pub match_id: Option<String>,
    /// Current roster, present only for pages that receive it.
    #[schema(value_type = Option<Vec<crate::dto::players::PlayerDoc>>)]
    pub players: Option<PlayerList>,
    /// Mutation endpoints this page is allowed to call.
    pub actions: Vec<PageAction>,
    /// Top-level navigation entries.
    pub navigation: Vec<NavLink>,
}

/// Mutation endpoint handed to a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageAction {
    /// `replace_players` or `rename_player`.
    pub operation: String,
    pub method: String,
    /// Target URL; `{id}` is substituted by the client.
    pub href: String,
}

/// Entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavLink {
    pub label: String,
    pub path: String,
    /// Whether this entry points at the page being rendered.
    pub active: bool,
}
