use askama::Template;

use super::PageContext;
use crate::models::event::Event;
use crate::models::project::Project;

#[derive(Template)]
#[template(path = "events/list.html")]
pub struct EventListTemplate {
    pub ctx: PageContext,
    pub project: Project,
    pub events: Vec<Event>,
}

/// Shared by the create and edit forms; values are pre-filled from the
/// existing event on edit and empty on create.
#[derive(Template)]
#[template(path = "events/form.html")]
pub struct EventFormTemplate {
    pub ctx: PageContext,
    pub project: Project,
    pub form_action: String,
    pub form_title: String,
    pub name_value: String,
    pub date_value: String,
    pub description_value: String,
    pub in_person: bool,
    pub location_value: String,
    pub errors: Vec<String>,
}

impl EventFormTemplate {
    pub fn blank(
        ctx: PageContext,
        project: Project,
        form_action: String,
        form_title: String,
        errors: Vec<String>,
    ) -> Self {
        EventFormTemplate {
            ctx,
            project,
            form_action,
            form_title,
            name_value: String::new(),
            date_value: String::new(),
            description_value: String::new(),
            in_person: false,
            location_value: String::new(),
            errors,
        }
    }

    pub fn from_event(
        ctx: PageContext,
        project: Project,
        form_action: String,
        form_title: String,
        event: &Event,
        errors: Vec<String>,
    ) -> Self {
        EventFormTemplate {
            ctx,
            project,
            form_action,
            form_title,
            name_value: event.name.clone(),
            date_value: event.event_date.clone(),
            description_value: event.description.clone(),
            in_person: event.in_person,
            location_value: event.location.clone(),
            errors,
        }
    }
}
