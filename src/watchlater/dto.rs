use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Body for POST /api/ver-mas-tarde.
#[derive(Debug, Deserialize)]
pub struct NuevaEntrada {
    #[serde(default)]
    pub usuario_id: i64,
    #[serde(default)]
    pub pelicula_id: i64,
}

/// Watch-later entry joined with the movie's display fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WatchLaterItem {
    pub id: i64,
    pub pelicula_id: i64,
    pub titulo: String,
    pub anio: i32,
    pub genero: String,
    pub poster: String,
    pub fecha_agregado: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct CreatedEntrada {
    pub message: String,
    pub id: i64,
}
