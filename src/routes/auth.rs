/// Authentication Routes
///
/// Login, access token refresh and refresh token revocation.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{Duration, Utc};
use serde::Serialize;

use crate::auth::{
    extract_bearer, generate_access_token, generate_refresh_token, hash_token,
    validate_refresh_token, verify_password,
};
use crate::configuration::JwtSettings;
use crate::domain::UserResponse;
use crate::error::{AppError, AuthError, ErrorContext};
use crate::logger::RequestId;
use crate::routes::users::CredentialsRequest;
use crate::store::Store;

/// Login response: the user plus both tokens
#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

/// Refresh response: a fresh access token
#[derive(Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /api/login
///
/// Authenticate with email and password. Returns the user together with an
/// access token (1 hour) and a refresh token (60 days).
///
/// # Errors
/// - 400: Malformed body
/// - 401: Unknown email or wrong password (same message for both)
/// - 500: Internal server error
pub async fn login(
    request_id: RequestId,
    body: web::Json<CredentialsRequest>,
    store: web::Data<dyn Store>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new(&request_id, "user_login");

    let user = store
        .find_user_by_email(body.email.trim())
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    if !verify_password(&body.password, &user.hashed_password)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = generate_access_token(&user.id, jwt_config.get_ref())?;
    let refresh_token = generate_refresh_token();
    store
        .create_refresh_token(
            &hash_token(&refresh_token),
            user.id,
            Utc::now() + Duration::seconds(jwt_config.refresh_token_expiry),
        )
        .await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User logged in successfully"
    );

    Ok(HttpResponse::Ok().json(LoginResponse {
        user: UserResponse::from(user),
        token,
        refresh_token,
    }))
}

/// POST /api/refresh
///
/// Exchange `Authorization: Bearer <refresh_token>` for a new access token.
/// The refresh token itself stays valid.
///
/// # Errors
/// - 401: Missing, unknown, revoked or expired refresh token
/// - 500: Internal server error
pub async fn refresh(
    request_id: RequestId,
    req: HttpRequest,
    store: web::Data<dyn Store>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new(&request_id, "token_refresh");

    let refresh_token = extract_bearer(req.headers())?;
    let user_id = validate_refresh_token(store.get_ref(), &refresh_token).await?;
    let token = generate_access_token(&user_id, jwt_config.get_ref())?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        "Access token refreshed"
    );

    Ok(HttpResponse::Ok().json(RefreshResponse { token }))
}

/// POST /api/revoke
///
/// Revoke `Authorization: Bearer <refresh_token>`. Revoking an already
/// revoked token succeeds.
///
/// # Errors
/// - 401: Missing header or unknown refresh token
/// - 500: Internal server error
pub async fn revoke(
    request_id: RequestId,
    req: HttpRequest,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new(&request_id, "token_revoke");

    let refresh_token = extract_bearer(req.headers())?;
    if !store.revoke_refresh_token(&hash_token(&refresh_token)).await? {
        return Err(AuthError::TokenInvalid.into());
    }

    tracing::info!(request_id = %context.request_id, "Refresh token revoked");

    Ok(HttpResponse::NoContent().finish())
}
