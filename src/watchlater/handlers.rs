use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::dto::MessageResponse,
    error::{ApiError, ApiResult},
    state::AppState,
    watchlater::{
        dto::{CreatedEntrada, NuevaEntrada, WatchLaterItem},
        repo,
    },
};

#[instrument(skip(state, payload))]
pub async fn add_entrada(
    State(state): State<AppState>,
    Json(payload): Json<NuevaEntrada>,
) -> ApiResult<Json<CreatedEntrada>> {
    if payload.usuario_id == 0 || payload.pelicula_id == 0 {
        return Err(ApiError::Validation(
            "usuario_id y pelicula_id son requeridos.".into(),
        ));
    }

    let id = repo::add(&state.db, payload.usuario_id, payload.pelicula_id)
        .await
        .map_err(|e| {
            if repo::is_unique_violation(&e) {
                warn!(
                    usuario_id = payload.usuario_id,
                    pelicula_id = payload.pelicula_id,
                    "duplicate watch-later entry"
                );
                ApiError::DuplicateEntry
            } else {
                e.into()
            }
        })?;

    info!(entrada_id = id, usuario_id = payload.usuario_id, "watch-later entry added");
    Ok(Json(CreatedEntrada {
        message: "Película agregada a ver más tarde".into(),
        id,
    }))
}

#[instrument(skip(state))]
pub async fn list_entradas(
    State(state): State<AppState>,
    Path(usuario_id): Path<i64>,
) -> ApiResult<Json<Vec<WatchLaterItem>>> {
    let entradas = repo::list(&state.db, usuario_id).await?;
    Ok(Json(entradas))
}

#[instrument(skip(state))]
pub async fn remove_entrada(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let removed = repo::remove(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("La entrada no existe.".into()));
    }

    info!(entrada_id = id, "watch-later entry removed");
    Ok(Json(MessageResponse {
        message: "Película eliminada de ver más tarde".into(),
    }))
}
