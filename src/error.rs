use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Every failure a handler can surface. Converted to a JSON `{"error": ...}`
/// body at the boundary; nothing here is allowed to crash the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("El correo ya está registrado.")]
    EmailTaken,

    #[error("Token de verificación inválido.")]
    InvalidToken,

    #[error("El token de verificación ha expirado. Solicita uno nuevo.")]
    TokenExpired,

    #[error("La cuenta ya está verificada.")]
    AlreadyVerified,

    #[error("Credenciales inválidas.")]
    InvalidCredentials,

    #[error("Debes verificar tu correo antes de iniciar sesión.")]
    VerificationRequired { email: String },

    #[error("{0}")]
    NotFound(String),

    #[error("La película ya está en tu lista de ver más tarde.")]
    DuplicateEntry,

    #[error("El envío de correos no está configurado.")]
    MailUnavailable,

    #[error("No se pudo enviar el correo de verificación. Contacta a soporte.")]
    MailDelivery(anyhow::Error),

    #[error("Error interno del servidor.")]
    Database(#[from] sqlx::Error),

    #[error("Error interno del servidor.")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::InvalidToken
            | ApiError::TokenExpired
            | ApiError::AlreadyVerified
            | ApiError::DuplicateEntry => StatusCode::BAD_REQUEST,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::VerificationRequired { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MailUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MailDelivery(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Database(e) => error!(error = %e, "database error"),
            ApiError::Internal(e) => error!(error = %e, "internal error"),
            ApiError::MailDelivery(e) => error!(error = %e, "mail delivery failed"),
            _ => {}
        }

        let body = match &self {
            // The client uses the email to offer a resend prompt.
            ApiError::VerificationRequired { email } => json!({
                "error": self.to_string(),
                "requiere_verificacion": true,
                "email": email,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::EmailTaken.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::VerificationRequired {
                email: "a@b.c".into()
            }
            .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MailUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ApiError::DuplicateEntry.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::TokenExpired.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_credentials_message_is_cause_agnostic() {
        // Unknown email and wrong password must be indistinguishable.
        let unknown_email = ApiError::InvalidCredentials;
        let wrong_password = ApiError::InvalidCredentials;
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
        assert_eq!(unknown_email.status(), wrong_password.status());
    }

    #[test]
    fn internal_errors_hide_details() {
        let e = ApiError::Internal(anyhow::anyhow!("secret connection string"));
        assert!(!e.to_string().contains("secret"));
    }
}
