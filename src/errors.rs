use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Template(askama::Error),
    Hash(String),
    Session(String),
    PermissionDenied(String),
    Csrf,
    Invalid(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::PermissionDenied(code) => write!(f, "Permission denied: {code}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::Invalid(e) => write!(f, "Invalid request: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().body("Not Found"),
            AppError::PermissionDenied(_) => HttpResponse::Forbidden().body("Forbidden"),
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            AppError::Invalid(msg) => HttpResponse::BadRequest().body(msg.clone()),
            AppError::Session(_) => HttpResponse::SeeOther()
                .insert_header(("Location", "/login"))
                .finish(),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an Askama template into a 200 HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
