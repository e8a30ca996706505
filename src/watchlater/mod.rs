use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ver-mas-tarde", post(handlers::add_entrada))
        .route(
            "/ver-mas-tarde/:usuario_id",
            get(handlers::list_entradas).delete(handlers::remove_entrada),
        )
}
