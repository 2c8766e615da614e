pub mod application_handlers;
pub mod auth_handlers;
pub mod dashboard;
pub mod event_handlers;
pub mod project_handlers;
