use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub foto_perfil: Option<String>,
    pub verificado: bool,
    #[serde(skip_serializing)]
    pub token_verificacion: Option<String>,
    #[serde(skip_serializing)]
    pub token_expira: Option<OffsetDateTime>,
    pub creado: OffsetDateTime,
}

const COLUMNS: &str = "id, nombre, email, password_hash, foto_perfil, verificado, \
                       token_verificacion, token_expira, creado";

impl Usuario {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Usuario>> {
        let user = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNS} FROM usuarios WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Usuario>> {
        let user = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNS} FROM usuarios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user. A `None` token means the account starts verified
    /// (mail is not configured).
    pub async fn create(
        db: &PgPool,
        nombre: &str,
        email: &str,
        password_hash: &str,
        token: Option<&str>,
        token_expira: Option<OffsetDateTime>,
    ) -> anyhow::Result<Usuario> {
        let user = sqlx::query_as::<_, Usuario>(&format!(
            "INSERT INTO usuarios (nombre, email, password_hash, verificado, token_verificacion, token_expira) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(nombre)
        .bind(email)
        .bind(password_hash)
        .bind(token.is_none())
        .bind(token)
        .bind(token_expira)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Look up the unverified holder of a verification token. Verified users
    /// never match, which is what makes tokens single-use.
    pub async fn find_unverified_by_token(
        db: &PgPool,
        token: &str,
    ) -> anyhow::Result<Option<Usuario>> {
        let user = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNS} FROM usuarios \
             WHERE token_verificacion = $1 AND verificado = FALSE"
        ))
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Flip the verified flag and clear the token fields in one statement.
    pub async fn mark_verified(db: &PgPool, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query(
            "UPDATE usuarios \
             SET verificado = TRUE, token_verificacion = NULL, token_expira = NULL \
             WHERE id = $1 AND verificado = FALSE",
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(res.rows_affected())
    }

    /// Overwrite the verification token; the previous token becomes invalid.
    pub async fn set_verification_token(
        db: &PgPool,
        id: i64,
        token: &str,
        token_expira: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE usuarios SET token_verificacion = $1, token_expira = $2 WHERE id = $3",
        )
        .bind(token)
        .bind(token_expira)
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn update_photo(db: &PgPool, id: i64, foto_perfil: &str) -> anyhow::Result<u64> {
        let res = sqlx::query("UPDATE usuarios SET foto_perfil = $1 WHERE id = $2")
            .bind(foto_perfil)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
