//! Static page table of the client application and the views served for it.

use crate::{
    dto::page::{NavLink, PageAction, PageView},
    services::roster_service,
    state::SharedState,
};

pub const HOME_PATH: &str = "/";
pub const LINEUP_PATH: &str = "/alineacion";
pub const STATISTICS_PATH: &str = "/estadisticas";
pub const MATCHES_PATH: &str = "/partidos";

const PLAYERS_HREF: &str = "/api/players";
const RENAME_HREF: &str = "/api/players/{id}/name";

/// One of the five routed pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Roster overview.
    Home,
    /// Formation builder.
    Lineup,
    Statistics,
    /// Match list; it manages its own data.
    Matches,
    /// A single match. The id is resolved by the page itself.
    MatchDetail { id: String },
}

/// Which shell-owned props a page receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProps {
    pub players: bool,
    pub replace_players: bool,
    pub rename_player: bool,
}

impl Page {
    /// Match `path` against the page table. One trailing slash is tolerated.
    pub fn resolve(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };

        match path {
            HOME_PATH => Some(Page::Home),
            LINEUP_PATH => Some(Page::Lineup),
            STATISTICS_PATH => Some(Page::Statistics),
            MATCHES_PATH => Some(Page::Matches),
            other => {
                let id = other.strip_prefix(MATCHES_PATH)?.strip_prefix('/')?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Some(Page::MatchDetail { id: id.to_string() })
            }
        }
    }

    /// Canonical path, the inverse of [`Page::resolve`].
    pub fn path(&self) -> String {
        match self {
            Page::Home => HOME_PATH.to_string(),
            Page::Lineup => LINEUP_PATH.to_string(),
            Page::Statistics => STATISTICS_PATH.to_string(),
            Page::Matches => MATCHES_PATH.to_string(),
            Page::MatchDetail { id } => format!("{MATCHES_PATH}/{id}"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Lineup => "lineup",
            Page::Statistics => "statistics",
            Page::Matches => "matches",
            Page::MatchDetail { .. } => "match_detail",
        }
    }

    pub fn props(&self) -> PageProps {
        match self {
            Page::Home | Page::Lineup => PageProps {
                players: true,
                replace_players: true,
                rename_player: true,
            },
            Page::Statistics => PageProps {
                players: true,
                replace_players: false,
                rename_player: true,
            },
            Page::Matches => PageProps {
                players: false,
                replace_players: false,
                rename_player: false,
            },
            Page::MatchDetail { .. } => PageProps {
                players: true,
                replace_players: true,
                rename_player: false,
            },
        }
    }

    /// Top-level entry this page highlights in the navigation bar.
    fn section(&self) -> &'static str {
        match self {
            Page::Home => HOME_PATH,
            Page::Lineup => LINEUP_PATH,
            Page::Statistics => STATISTICS_PATH,
            Page::Matches | Page::MatchDetail { .. } => MATCHES_PATH,
        }
    }
}

/// Navigation bar entries, in display order.
pub fn navigation(current: &Page) -> Vec<NavLink> {
    [
        ("Plantilla", HOME_PATH),
        ("Alineación", LINEUP_PATH),
        ("Estadísticas", STATISTICS_PATH),
        ("Partidos", MATCHES_PATH),
    ]
    .into_iter()
    .map(|(label, path)| NavLink {
        label: label.to_string(),
        path: path.to_string(),
        active: current.section() == path,
    })
    .collect()
}

fn actions(props: PageProps) -> Vec<PageAction> {
    let mut actions = Vec::new();
    if props.replace_players {
        actions.push(PageAction {
            operation: "replace_players".into(),
            method: "PUT".into(),
            href: PLAYERS_HREF.into(),
        });
    }
    if props.rename_player {
        actions.push(PageAction {
            operation: "rename_player".into(),
            method: "PATCH".into(),
            href: RENAME_HREF.into(),
        });
    }
    actions
}

/// Build the view for `page`, injecting only the props it receives.
pub async fn render(state: &SharedState, page: Page) -> PageView {
    let props = page.props();
    let players = if props.players {
        Some(roster_service::list_players(state).await)
    } else {
        None
    };
    let match_id = match &page {
        Page::MatchDetail { id } => Some(id.clone()),
        _ => None,
    };

    PageView {
        page: page.name().to_string(),
        path: page.path(),
        match_id,
        players,
        actions: actions(props),
        navigation: navigation(&page),
    }
}
