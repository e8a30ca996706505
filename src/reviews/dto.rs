use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Body for POST /api/resenas. Numeric fields default to 0 so a missing id
/// or rating falls into the same rejection as an explicit zero.
#[derive(Debug, Deserialize)]
pub struct NuevaResena {
    #[serde(default)]
    pub usuario_id: i64,
    #[serde(default)]
    pub pelicula_id: i64,
    #[serde(default)]
    pub texto: String,
    #[serde(default)]
    pub calificacion: i32,
}

/// Review joined with the reviewer's display name (per-movie listing).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovieReview {
    pub id: i64,
    pub texto: String,
    pub calificacion: i32,
    pub fecha: OffsetDateTime,
    pub usuario_nombre: String,
}

/// Review joined with the movie title (per-user listing).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserReview {
    pub id: i64,
    pub texto: String,
    pub calificacion: i32,
    pub fecha: OffsetDateTime,
    pub pelicula_titulo: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResena {
    pub message: String,
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let r: NuevaResena = serde_json::from_str(r#"{"texto":"Buena"}"#).unwrap();
        assert_eq!(r.usuario_id, 0);
        assert_eq!(r.pelicula_id, 0);
        assert_eq!(r.calificacion, 0);
    }
}
