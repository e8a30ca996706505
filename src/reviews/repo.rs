use sqlx::PgPool;

use super::dto::{MovieReview, UserReview};

pub async fn create(
    db: &PgPool,
    usuario_id: i64,
    pelicula_id: i64,
    texto: &str,
    calificacion: i32,
) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO resenas (usuario_id, pelicula_id, texto, calificacion, fecha)
        VALUES ($1, $2, $3, $4, now())
        RETURNING id
        "#,
    )
    .bind(usuario_id)
    .bind(pelicula_id)
    .bind(texto)
    .bind(calificacion)
    .fetch_one(db)
    .await?;
    Ok(id)
}

/// Write-back performed by the processing function once the blob is stored.
pub async fn mark_processed(db: &PgPool, id: i64, archivo_url: &str) -> anyhow::Result<u64> {
    let res = sqlx::query(
        "UPDATE resenas SET archivo_url = $1, archivo_procesado = TRUE WHERE id = $2",
    )
    .bind(archivo_url)
    .bind(id)
    .execute(db)
    .await?;
    Ok(res.rows_affected())
}

pub async fn list_for_movie(db: &PgPool, pelicula_id: i64) -> anyhow::Result<Vec<MovieReview>> {
    let rows = sqlx::query_as::<_, MovieReview>(
        r#"
        SELECT r.id, r.texto, r.calificacion, r.fecha, u.nombre AS usuario_nombre
        FROM resenas r
        JOIN usuarios u ON r.usuario_id = u.id
        WHERE r.pelicula_id = $1
        ORDER BY r.fecha DESC
        "#,
    )
    .bind(pelicula_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_for_user(db: &PgPool, usuario_id: i64) -> anyhow::Result<Vec<UserReview>> {
    let rows = sqlx::query_as::<_, UserReview>(
        r#"
        SELECT r.id, r.texto, r.calificacion, r.fecha, p.titulo AS pelicula_titulo
        FROM resenas r
        JOIN peliculas p ON r.pelicula_id = p.id
        WHERE r.usuario_id = $1
        ORDER BY r.fecha DESC
        "#,
    )
    .bind(usuario_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
