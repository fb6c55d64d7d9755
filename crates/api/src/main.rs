use anyhow::{Context, Result};
use rsvp_api::{app, config, middleware, services};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics().context("Failed to install metrics recorder")?;

    info!("Starting RSVP API v{}", env!("CARGO_PKG_VERSION"));

    let pool_config: persistence::db::DatabaseConfig = (&config.database).into();
    let pool = persistence::db::create_pool(&pool_config).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    services::ensure_event(&pool, &config.event).await?;
    services::bootstrap_admin(&pool, &config.admin).await?;

    let addr = config.socket_addr().context("Invalid server address")?;
    let app = app::create_app(config, pool);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
