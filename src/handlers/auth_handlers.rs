use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::{csrf, password, rate_limit::RateLimiter};
use crate::db::DbPool;
use crate::errors::{render, AppError};
use crate::models::user;
use crate::templates_structs::{LoginTemplate, APP_NAME};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

/// Form body for POSTs that carry nothing but the CSRF token.
#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    // Already logged in — go straight to the dashboard.
    if session.get::<i64>("user_id").unwrap_or(None).is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/dashboard"))
            .finish());
    }

    let csrf_token = csrf::get_or_create_token(&session);
    let tmpl = LoginTemplate {
        error: None,
        app_name: APP_NAME.to_string(),
        csrf_token,
    };
    render(tmpl)
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check BEFORE any database access.
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        return login_error(&session, "Too many failed login attempts. Please try again later.");
    }

    let conn = pool.get()?;
    let found = user::find_by_username(&conn, &form.username)?;

    match found {
        Some(u) if password::verify_password(&form.password, &u.password) => {
            limiter.clear(ip);
            let _ = session.insert("user_id", u.id);
            let _ = session.insert("username", &u.username);
            log::info!("User '{}' logged in", u.username);
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/dashboard"))
                .finish())
        }
        _ => {
            limiter.record_failure(ip);
            login_error(&session, "Invalid username or password")
        }
    }
}

fn login_error(session: &Session, message: &str) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::get_or_create_token(session);
    let tmpl = LoginTemplate {
        error: Some(message.to_string()),
        app_name: APP_NAME.to_string(),
        csrf_token,
    };
    render(tmpl)
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}
