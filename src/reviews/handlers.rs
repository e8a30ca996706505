use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    reviews::{
        dto::{CreatedResena, MovieReview, NuevaResena, UserReview},
        notify::ReviewJob,
        repo,
    },
    state::AppState,
};

pub(crate) fn validate_nueva_resena(payload: &NuevaResena) -> Result<(), ApiError> {
    // A calificacion of 0 is indistinguishable from an absent one and gets
    // rejected the same way. TODO: let the client send an explicit null to
    // tell "not rated" apart from a zero rating.
    if payload.usuario_id == 0
        || payload.pelicula_id == 0
        || payload.texto.trim().is_empty()
        || payload.calificacion == 0
    {
        return Err(ApiError::Validation("Faltan campos requeridos.".into()));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn add_resena(
    State(state): State<AppState>,
    Json(payload): Json<NuevaResena>,
) -> ApiResult<Json<CreatedResena>> {
    validate_nueva_resena(&payload)?;

    let id = repo::create(
        &state.db,
        payload.usuario_id,
        payload.pelicula_id,
        &payload.texto,
        payload.calificacion,
    )
    .await?;

    // Best-effort hand-off to the processing function. One awaited round
    // trip; a failure is logged and the review stays unprocessed.
    let job = ReviewJob {
        resena_id: id,
        texto: payload.texto.clone(),
        pelicula_id: payload.pelicula_id,
        usuario_id: payload.usuario_id,
    };
    if let Err(e) = state.notifier.dispatch(job).await {
        warn!(resena_id = id, error = %e, "review processing dispatch failed");
    }

    info!(resena_id = id, usuario_id = payload.usuario_id, "review submitted");
    Ok(Json(CreatedResena {
        message: "Reseña guardada exitosamente".into(),
        id,
    }))
}

#[instrument(skip(state))]
pub async fn get_resenas_pelicula(
    State(state): State<AppState>,
    Path(pelicula_id): Path<i64>,
) -> ApiResult<Json<Vec<MovieReview>>> {
    let resenas = repo::list_for_movie(&state.db, pelicula_id).await?;
    Ok(Json(resenas))
}

#[instrument(skip(state))]
pub async fn get_resenas_usuario(
    State(state): State<AppState>,
    Path(usuario_id): Path<i64>,
) -> ApiResult<Json<Vec<UserReview>>> {
    let resenas = repo::list_for_user(&state.db, usuario_id).await?;
    Ok(Json(resenas))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resena(usuario_id: i64, pelicula_id: i64, texto: &str, calificacion: i32) -> NuevaResena {
        NuevaResena {
            usuario_id,
            pelicula_id,
            texto: texto.into(),
            calificacion,
        }
    }

    #[test]
    fn complete_review_passes_validation() {
        assert!(validate_nueva_resena(&resena(1, 2, "Muy buena", 5)).is_ok());
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(validate_nueva_resena(&resena(0, 2, "x", 5)).is_err());
        assert!(validate_nueva_resena(&resena(1, 0, "x", 5)).is_err());
        assert!(validate_nueva_resena(&resena(1, 2, "  ", 5)).is_err());
    }

    #[test]
    fn zero_rating_is_rejected_like_a_missing_one() {
        let explicit_zero = validate_nueva_resena(&resena(1, 2, "x", 0)).unwrap_err();
        let missing: NuevaResena = serde_json::from_str(
            r#"{"usuario_id":1,"pelicula_id":2,"texto":"x"}"#,
        )
        .unwrap();
        let absent = validate_nueva_resena(&missing).unwrap_err();
        assert_eq!(explicit_zero.to_string(), absent.to_string());
    }
}
