/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Server-Sent Events delivery of notifications.
pub mod notification_service;
/// Page table and page views.
pub mod pages;
/// Roster load and mutations.
pub mod roster_service;
