use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    catalog::{dto::NuevaPelicula, repo},
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::repo::Pelicula;

#[derive(Debug, Serialize)]
pub struct CreatedPelicula {
    pub message: String,
    pub id: i64,
}

#[instrument(skip(state))]
pub async fn list_peliculas(State(state): State<AppState>) -> ApiResult<Json<Vec<Pelicula>>> {
    let peliculas = repo::list_all(&state.db).await?;
    Ok(Json(peliculas))
}

#[instrument(skip(state, payload))]
pub async fn add_pelicula(
    State(state): State<AppState>,
    Json(payload): Json<NuevaPelicula>,
) -> ApiResult<Json<CreatedPelicula>> {
    if payload.missing_required_field() {
        return Err(ApiError::Validation("Faltan campos requeridos.".into()));
    }

    let id = repo::create(&state.db, &payload).await?;
    info!(pelicula_id = id, titulo = %payload.titulo, "movie added");
    Ok(Json(CreatedPelicula {
        message: "Película agregada correctamente".into(),
        id,
    }))
}
