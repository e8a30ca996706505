use crate::state::AppState;
use axum::{routing::get, Router};

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/peliculas",
        get(handlers::list_peliculas).post(handlers::add_pelicula),
    )
}
