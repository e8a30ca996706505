use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::Engine;
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use rand::RngCore;
use regex::Regex;
use time::{Duration, OffsetDateTime};
use tracing::error;

use crate::error::ApiError;

/// Verification tokens live for 24 hours.
const TOKEN_TTL: Duration = Duration::hours(24);

/// Inline profile photos are capped at ~5 MB of data-URI text.
const MAX_FOTO_BYTES: usize = 5 * 1024 * 1024;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Issue a fresh opaque verification token and its expiry.
pub fn issue_verification_token() -> (String, OffsetDateTime) {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    (hex::encode(bytes), OffsetDateTime::now_utc() + TOKEN_TTL)
}

/// Validate an inline profile photo: a base64 `data:image/...` URI within the
/// size cap, with a payload that actually decodes.
pub fn validate_foto_perfil(data_uri: &str) -> Result<(), ApiError> {
    if data_uri.is_empty() {
        return Err(ApiError::Validation("foto_perfil es requerida.".into()));
    }
    if data_uri.len() > MAX_FOTO_BYTES {
        return Err(ApiError::Validation(
            "La imagen supera el tamaño máximo de 5MB.".into(),
        ));
    }
    if !data_uri.starts_with("data:image/") {
        return Err(ApiError::Validation(
            "foto_perfil debe ser una imagen en formato data-URI.".into(),
        ));
    }
    let payload = data_uri
        .split_once(";base64,")
        .map(|(_, p)| p)
        .ok_or_else(|| {
            ApiError::Validation("foto_perfil debe estar codificada en base64.".into())
        })?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| ApiError::Validation("La imagen no es base64 válido.".into()))?;
    Ok(())
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}

#[cfg(test)]
mod token_tests {
    use super::*;

    #[test]
    fn tokens_are_opaque_hex() {
        let (token, _) = issue_verification_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn consecutive_tokens_differ() {
        let (a, _) = issue_verification_token();
        let (b, _) = issue_verification_token();
        assert_ne!(a, b);
    }

    #[test]
    fn expiry_is_in_the_future() {
        let (_, expira) = issue_verification_token();
        let hours = (expira - OffsetDateTime::now_utc()).whole_hours();
        assert!((23..=24).contains(&hours));
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn email_regex_accepts_and_rejects() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("a.b+c@sub.dominio.mx"));
        assert!(!is_valid_email("sin-arroba"));
        assert!(!is_valid_email("dos@@x.com"));
        assert!(!is_valid_email("espacio @x.com"));
    }

    #[test]
    fn foto_accepts_a_small_png_data_uri() {
        // one transparent pixel
        let uri = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";
        assert!(validate_foto_perfil(uri).is_ok());
    }

    #[test]
    fn foto_rejects_empty_and_non_image() {
        assert!(validate_foto_perfil("").is_err());
        assert!(validate_foto_perfil("data:text/plain;base64,aG9sYQ==").is_err());
        assert!(validate_foto_perfil("hola.png").is_err());
    }

    #[test]
    fn foto_rejects_bad_base64_and_oversize() {
        assert!(validate_foto_perfil("data:image/png;base64,$$$no-es-base64$$$").is_err());
        let oversized = format!("data:image/png;base64,{}", "A".repeat(MAX_FOTO_BYTES + 1));
        assert!(validate_foto_perfil(&oversized).is_err());
    }
}
