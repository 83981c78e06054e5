use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use api::db::{create_pool, run_migrations, PgStore};
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;
use web::settings::Settings;
use web::state::AppState;
use web::{build_router, session_layer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new().context("Failed to load settings")?;
    tracing::debug!(?settings, "Settings loaded");

    // Initialize database pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&settings.database.url(), settings.database.max_connections)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to migrate session store")?;

    tokio::task::spawn(
        session_store
            .clone()
            .continuously_delete_expired(Duration::from_secs(60 * 60)),
    );

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    let router = build_router(state, session_layer(session_store, &settings.session));

    let addr = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
