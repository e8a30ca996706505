use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;

use uanfilms::config::StorageConfig;
use uanfilms::storage::S3Storage;
use uanfilms::workers::{self, WorkerState};

/// Worker host for the review pipeline: the processing function and the blob
/// censor, running in their own process with their own pool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "uanfilms=debug,resenas_processor=debug,tower_http=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let database_url = std::env::var("DATABASE_URL")?;
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let storage = Arc::new(S3Storage::new(&StorageConfig::from_env()?).await?);
    let state = WorkerState { db, storage };

    let app = workers::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("WORKER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("WORKER_PORT").unwrap_or_else(|_| "7071".into())
    )
    .parse()?;

    tracing::info!("worker host listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
