//! University site server. Reads settings from the environment and serves on `BIND_ADDR` (default `0.0.0.0:3000`).

use campus_blog::{
    apply_migrations, university_app, ensure_database_exists, AppState, PgStore, Renderer, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env("0.0.0.0:3000")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("campus_blog=info")),
        )
        .init();

    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    apply_migrations(&pool).await?;

    let renderer = Renderer::new()?;
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    let state = AppState::new(Arc::new(PgStore::new(pool)), renderer, settings);
    let app = university_app(state);

    tracing::info!("university listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
