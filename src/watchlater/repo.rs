use sqlx::PgPool;

use super::dto::WatchLaterItem;

/// Insert an entry for the (user, movie) pair. The pair carries a UNIQUE
/// constraint, so a concurrent duplicate add fails here rather than racing
/// past an existence check; callers translate the violation to the duplicate
/// error.
pub async fn add(db: &PgPool, usuario_id: i64, pelicula_id: i64) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO ver_mas_tarde (usuario_id, pelicula_id, fecha_agregado)
        VALUES ($1, $2, now())
        RETURNING id
        "#,
    )
    .bind(usuario_id)
    .bind(pelicula_id)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

pub async fn list(db: &PgPool, usuario_id: i64) -> anyhow::Result<Vec<WatchLaterItem>> {
    let rows = sqlx::query_as::<_, WatchLaterItem>(
        r#"
        SELECT v.id, v.pelicula_id, p.titulo, p.anio, p.genero, p.poster, v.fecha_agregado
        FROM ver_mas_tarde v
        JOIN peliculas p ON v.pelicula_id = p.id
        WHERE v.usuario_id = $1
        ORDER BY v.fecha_agregado DESC
        "#,
    )
    .bind(usuario_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn remove(db: &PgPool, id: i64) -> anyhow::Result<u64> {
    let res = sqlx::query("DELETE FROM ver_mas_tarde WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}
