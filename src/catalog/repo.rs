use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::dto::NuevaPelicula;

/// Movie record as exposed on the wire. Created once via catalog-add,
/// immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pelicula {
    pub id: i64,
    pub titulo: String,
    pub anio: i32,
    pub director: String,
    pub elenco: String,
    pub genero: String,
    pub descripcion: String,
    pub poster: String,
    pub codigo_hash: String,
}

/// All movies, newest-id first. Full-table read on every call.
pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Pelicula>> {
    let rows = sqlx::query_as::<_, Pelicula>(
        r#"
        SELECT id, titulo, anio, director, elenco, genero, descripcion, poster, codigo_hash
        FROM peliculas
        ORDER BY id DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(db: &PgPool, p: &NuevaPelicula) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO peliculas (titulo, anio, director, elenco, genero, descripcion, poster, codigo_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(p.titulo.trim())
    .bind(p.anio.unwrap_or_default())
    .bind(p.director.trim())
    .bind(&p.elenco)
    .bind(p.genero.trim())
    .bind(&p.descripcion)
    .bind(&p.poster)
    .bind(&p.codigo_hash)
    .fetch_one(db)
    .await?;
    Ok(id)
}
