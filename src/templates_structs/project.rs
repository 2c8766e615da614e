use askama::Template;

use super::PageContext;
use crate::models::project::Project;

#[derive(Template)]
#[template(path = "projects/list.html")]
pub struct ProjectListTemplate {
    pub ctx: PageContext,
    pub projects: Vec<Project>,
}

#[derive(Template)]
#[template(path = "projects/detail.html")]
pub struct ProjectDetailTemplate {
    pub ctx: PageContext,
    pub project: Project,
    pub event_count: i64,
    pub application_count: i64,
}
