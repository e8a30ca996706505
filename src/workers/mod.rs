use std::sync::Arc;

use axum::{routing::post, Router};
use sqlx::PgPool;

use crate::storage::BlobStorage;

pub mod censor;
pub mod processor;

/// State for the worker host. Workers share nothing with the API server
/// beyond the database and the blob store.
#[derive(Clone)]
pub struct WorkerState {
    pub db: PgPool,
    pub storage: Arc<dyn BlobStorage>,
}

pub fn router() -> Router<WorkerState> {
    Router::new()
        .route("/api/procesar-resena", post(processor::procesar_resena))
        .route("/api/censurar-blob", post(censor::censurar_blob))
}
