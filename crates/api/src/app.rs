use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use shared::session::SessionSigner;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, require_admin, trace_id};
use crate::routes::{
    auth, dashboard, event, guest_import, guests, health, invites, mural, uploads,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub sessions: SessionSigner,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        sessions: SessionSigner::new(
            &config.admin.session_secret,
            config.admin.session_expiry_secs,
        ),
        config: config.clone(),
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Guest-facing routes, addressed by invite token
    let public_routes = Router::new()
        .route("/api/v1/invites/:token", get(invites::resolve_invite))
        .route("/api/v1/invites/:token/rsvp", put(invites::submit_rsvp))
        .route("/api/v1/invites/:token/mural", put(mural::post_message))
        .route("/api/v1/mural", get(mural::list_messages))
        .route("/api/v1/admin/login", post(auth::login));

    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/guests",
            get(guests::list_guests).post(guests::create_guest),
        )
        .route(
            "/api/v1/admin/guests/:guest_id",
            put(guests::update_guest).delete(guests::delete_guest),
        )
        .route("/api/v1/admin/guests/import", post(guest_import::import_guests))
        .route("/api/v1/admin/guests/template", get(guest_import::download_template))
        .route(
            "/api/v1/admin/event",
            get(event::get_event).put(event::update_event),
        )
        .route("/api/v1/admin/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/admin/password", put(auth::change_password))
        .route(
            "/api/v1/admin/uploads/character",
            post(uploads::upload_character_image),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(ops_routes)
        .nest_service("/uploads", ServeDir::new(&config.uploads.dir))
        // Global middleware (order matters: bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
