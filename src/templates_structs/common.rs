use askama::Template;

use super::PageContext;
use crate::models::dashboard::DashboardCounts;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub counts: DashboardCounts,
}

/// Generic yes/no gate shown before any destructive action. The POST to
/// `form_action` performs the action; navigating away performs nothing.
#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub description: String,
    pub form_action: String,
    pub cancel_href: String,
}
