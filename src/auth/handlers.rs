use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, MessageResponse, PhotoRequest, ProfileParams, ProfileResponse,
            PublicUser, RegisterRequest, RegisterResponse, ResendRequest, VerifyParams,
        },
        repo::Usuario,
        service::{
            hash_password, is_valid_email, issue_verification_token, validate_foto_perfil,
            verify_password,
        },
    },
    error::{ApiError, ApiResult},
    reviews,
    state::AppState,
};

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    payload.email = payload.email.trim().to_lowercase();
    let nombre = payload.nombre.trim();

    if nombre.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Nombre, email y contraseña son requeridos.".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("El correo no es válido.".into()));
    }

    if Usuario::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    let hash = hash_password(&payload.password)?;

    let Some(mailer) = &state.mailer else {
        // No relay configured: the account starts verified and the caller is
        // told no email went out.
        let user = Usuario::create(&state.db, nombre, &payload.email, &hash, None, None).await?;
        info!(user_id = user.id, email = %user.email, "user registered, auto-verified");
        return Ok(Json(RegisterResponse {
            message: "Usuario registrado correctamente. No se envió correo de verificación."
                .into(),
            id: user.id,
            verificacion_pendiente: false,
        }));
    };

    let (token, expira) = issue_verification_token();
    let user = Usuario::create(
        &state.db,
        nombre,
        &payload.email,
        &hash,
        Some(token.as_str()),
        Some(expira),
    )
    .await?;

    if let Err(e) = mailer.send_verification(&user.email, &user.nombre, &token).await {
        // The row stays: a later resend can still complete verification.
        warn!(user_id = user.id, "registration persisted but mail failed");
        return Err(ApiError::MailDelivery(e));
    }

    info!(user_id = user.id, email = %user.email, "user registered, verification pending");
    Ok(Json(RegisterResponse {
        message: "Usuario registrado. Revisa tu correo para verificar tu cuenta.".into(),
        id: user.id,
        verificacion_pendiente: true,
    }))
}

#[instrument(skip(state))]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> ApiResult<Json<MessageResponse>> {
    let token = params
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("El token es requerido.".into()))?;

    let user = Usuario::find_unverified_by_token(&state.db, &token)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    if let Some(expira) = user.token_expira {
        if time::OffsetDateTime::now_utc() > expira {
            // The token is left in place; only a resend replaces it.
            warn!(user_id = user.id, "verification token expired");
            return Err(ApiError::TokenExpired);
        }
    }

    Usuario::mark_verified(&state.db, user.id).await?;
    info!(user_id = user.id, email = %user.email, "email verified");
    Ok(Json(MessageResponse {
        message: "Correo verificado correctamente. Ya puedes iniciar sesión.".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(mut payload): Json<ResendRequest>,
) -> ApiResult<Json<MessageResponse>> {
    payload.email = payload.email.trim().to_lowercase();
    if payload.email.is_empty() {
        return Err(ApiError::Validation("El email es requerido.".into()));
    }

    let user = Usuario::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("No existe una cuenta con ese correo.".into()))?;

    if user.verificado {
        return Err(ApiError::AlreadyVerified);
    }

    let mailer = state.mailer.as_ref().ok_or(ApiError::MailUnavailable)?;

    let (token, expira) = issue_verification_token();
    Usuario::set_verification_token(&state.db, user.id, &token, expira).await?;

    mailer
        .send_verification(&user.email, &user.nombre, &token)
        .await
        .map_err(ApiError::MailDelivery)?;

    info!(user_id = user.id, "verification email resent");
    Ok(Json(MessageResponse {
        message: "Correo de verificación reenviado.".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> ApiResult<Json<PublicUser>> {
    payload.email = payload.email.trim().to_lowercase();
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Email y contraseña son requeridos.".into()));
    }

    // Unknown email and bad password take the same exit so the response
    // cannot be used to probe which emails exist.
    let user = Usuario::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    // Verification is only enforced when a mailer exists to deliver tokens.
    if state.mailer.is_some() && !user.verificado {
        return Err(ApiError::VerificationRequired { email: user.email });
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(PublicUser {
        id: user.id,
        nombre: user.nombre,
        email: user.email,
        foto_perfil: user.foto_perfil,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PhotoRequest>,
) -> ApiResult<Json<MessageResponse>> {
    validate_foto_perfil(&payload.foto_perfil)?;

    let updated = Usuario::update_photo(&state.db, id, &payload.foto_perfil).await?;
    if updated == 0 {
        return Err(ApiError::NotFound("Usuario no encontrado.".into()));
    }

    info!(user_id = id, "profile photo updated");
    Ok(Json(MessageResponse {
        message: "Foto de perfil actualizada.".into(),
    }))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    Query(params): Query<ProfileParams>,
) -> ApiResult<Json<ProfileResponse>> {
    let user = Usuario::find_by_id(&state.db, params.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Usuario no encontrado.".into()))?;

    let resenas = reviews::repo::list_for_user(&state.db, user.id).await?;

    Ok(Json(ProfileResponse {
        usuario: PublicUser {
            id: user.id,
            nombre: user.nombre,
            email: user.email,
            foto_perfil: user.foto_perfil,
        },
        resenas,
    }))
}
