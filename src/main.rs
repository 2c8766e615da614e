use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, middleware, web, App, HttpServer};

use clubdeck::auth::{self, rate_limit::RateLimiter};
use clubdeck::db;
use clubdeck::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Ensure data directory exists
    std::fs::create_dir_all("data").expect("Failed to create data directory");

    // Initialize database
    let pool = db::init_pool("data/clubdeck.db");
    db::run_migrations(&pool);

    // Seed default admin user and sample project if empty
    let admin_hash = auth::password::hash_password("admin123")
        .expect("Failed to hash default password");
    db::seed_defaults(&pool, &admin_hash);

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let limiter = RateLimiter::new();

    log::info!("Starting server at http://127.0.0.1:8080");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(limiter.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Public routes
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            // Root redirect
            .route("/", web::get().to(|| async {
                actix_web::HttpResponse::SeeOther()
                    .insert_header(("Location", "/dashboard"))
                    .finish()
            }))
            // Protected routes
            .service(
                web::scope("")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .route("/dashboard", web::get().to(handlers::dashboard::index))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    // Projects
                    .route("/projects", web::get().to(handlers::project_handlers::list))
                    .route("/projects/{id}", web::get().to(handlers::project_handlers::detail))
                    // Event CRUD — /events/new BEFORE /events/{id} to avoid routing conflict
                    .route("/projects/{pid}/events", web::get().to(handlers::event_handlers::list))
                    .route("/projects/{pid}/events/new", web::get().to(handlers::event_handlers::new_form))
                    .route("/projects/{pid}/events", web::post().to(handlers::event_handlers::create))
                    .route("/projects/{pid}/events/{id}/edit", web::get().to(handlers::event_handlers::edit_form))
                    .route("/projects/{pid}/events/{id}", web::post().to(handlers::event_handlers::update))
                    .route("/projects/{pid}/events/{id}/delete", web::get().to(handlers::event_handlers::confirm_delete))
                    .route("/projects/{pid}/events/{id}/delete", web::post().to(handlers::event_handlers::delete))
                    // Applications
                    .route("/projects/{pid}/applications", web::get().to(handlers::application_handlers::list))
                    .route("/projects/{pid}/applications", web::post().to(handlers::application_handlers::create))
                    .route("/projects/{pid}/applications/{id}/edit", web::get().to(handlers::application_handlers::edit_form))
                    .route("/projects/{pid}/applications/{id}/edit", web::post().to(handlers::application_handlers::edit_submit))
                    .route("/projects/{pid}/applications/{id}/publish", web::post().to(handlers::application_handlers::publish_submit))
                    .route("/projects/{pid}/applications/{id}/delete", web::get().to(handlers::application_handlers::confirm_delete))
                    .route("/projects/{pid}/applications/{id}/delete", web::post().to(handlers::application_handlers::delete)),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
