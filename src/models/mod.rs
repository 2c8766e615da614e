pub mod application;
pub mod dashboard;
pub mod event;
pub mod project;
pub mod user;
