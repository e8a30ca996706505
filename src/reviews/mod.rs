use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod notify;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resenas", post(handlers::add_resena))
        .route("/resenas/:pelicula_id", get(handlers::get_resenas_pelicula))
        .route(
            "/resenas/usuario/:usuario_id",
            get(handlers::get_resenas_usuario),
        )
}
