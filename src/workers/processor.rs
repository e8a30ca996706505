use axum::{extract::State, Json};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    error::{ApiError, ApiResult},
    reviews,
    workers::WorkerState,
};

#[derive(Debug, Deserialize)]
pub struct ProcesarRequest {
    #[serde(default)]
    pub resena_id: i64,
    #[serde(default)]
    pub texto: String,
    #[serde(default)]
    pub pelicula_id: i64,
    #[serde(default)]
    pub usuario_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ProcesadaResponse {
    pub message: String,
    pub resena_id: i64,
    pub archivo_url: String,
}

pub fn blob_name(resena_id: i64, unix_millis: i128) -> String {
    format!("resena_{resena_id}_{unix_millis}.txt")
}

/// Processing function: lowercase the review text, archive it as a public
/// blob, and write the blob URL back into the review row. Any failure is a
/// failed invocation; there is no compensating transaction, so the review
/// may stay unprocessed.
#[instrument(skip(state, payload), fields(resena_id = payload.resena_id))]
pub async fn procesar_resena(
    State(state): State<WorkerState>,
    Json(payload): Json<ProcesarRequest>,
) -> ApiResult<Json<ProcesadaResponse>> {
    if payload.resena_id == 0 || payload.texto.is_empty() {
        return Err(ApiError::Validation("Se requiere resena_id y texto".into()));
    }

    info!("processing review");

    let texto_minusculas = payload.texto.to_lowercase();
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let nombre = blob_name(payload.resena_id, millis);

    state.storage.ensure_container().await?;
    let archivo_url = state
        .storage
        .put_text(&nombre, Bytes::from(texto_minusculas))
        .await?;
    info!(url = %archivo_url, "blob uploaded");

    reviews::repo::mark_processed(&state.db, payload.resena_id, &archivo_url).await?;
    info!("blob url stored in database");

    Ok(Json(ProcesadaResponse {
        message: "Reseña procesada exitosamente".into(),
        resena_id: payload.resena_id,
        archivo_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_names_carry_review_id_and_timestamp() {
        assert_eq!(blob_name(7, 1700000000000), "resena_7_1700000000000.txt");
    }

    #[test]
    fn blob_names_differ_across_timestamps() {
        assert_ne!(blob_name(7, 1), blob_name(7, 2));
    }

    #[test]
    fn lowercasing_handles_spanish_characters() {
        assert_eq!("PELÍCULA".to_lowercase(), "película");
    }
}
