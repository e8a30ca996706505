use serde::{Deserialize, Serialize};

use crate::reviews::dto::UserReview;

/// Request body for user registration. Fields default to empty so a missing
/// field reports the domain validation message instead of a decode rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters for GET /api/verificar-email.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResendRequest {
    #[serde(default)]
    pub email: String,
}

/// Body for PUT /api/usuarios/:id/foto — an inline `data:image/...` URI.
#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    #[serde(default)]
    pub foto_perfil: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    #[serde(default = "default_profile_id")]
    pub id: i64,
}

fn default_profile_id() -> i64 {
    1
}

/// Public part of the user returned to the client. Never carries the hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub foto_perfil: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: i64,
    pub verificacion_pendiente: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub usuario: PublicUser,
    pub resenas: Vec<UserReview>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_serializes_a_hash() {
        let user = PublicUser {
            id: 1,
            nombre: "Ana".into(),
            email: "ana@x.com".into(),
            foto_perfil: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("ana@x.com"));
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn register_request_defaults_missing_fields_to_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert!(req.nombre.is_empty());
        assert_eq!(req.email, "a@b.c");
        assert!(req.password.is_empty());
    }

    #[test]
    fn profile_params_default_to_user_one() {
        let params: ProfileParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.id, 1);
    }
}
