use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/verificar-email", get(handlers::verify_email))
        .route("/reenviar-verificacion", post(handlers::resend_verification))
        .route("/usuarios/:id/foto", put(handlers::update_photo))
        .route("/usuario/perfil", get(handlers::profile))
}
