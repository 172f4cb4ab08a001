/// User Routes
///
/// Registration and credential updates.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{hash_password, AuthenticatedUser};
use crate::domain::UserResponse;
use crate::error::{AppError, ErrorContext};
use crate::logger::RequestId;
use crate::store::Store;
use crate::validators::is_valid_email;

/// Email and password, used by registration, login and update
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/users
///
/// # Errors
/// - 400: Malformed body, invalid email, empty password
/// - 409: Email already registered
/// - 500: Internal server error
pub async fn create_user(
    request_id: RequestId,
    body: web::Json<CredentialsRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new(&request_id, "create_user");

    let email = is_valid_email(&body.email)?;
    let hashed_password = hash_password(&body.password)?;

    let user = store
        .create_user(&email, &hashed_password)
        .await
        .map_err(|e| {
            context.log_error(&e);
            e
        })?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User registered successfully"
    );

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// PUT /api/users
///
/// **Requires valid JWT access token.** Replaces the caller's email and
/// password.
///
/// # Errors
/// - 400: Malformed body, invalid email, empty password
/// - 401: Missing or invalid token (handled by middleware)
/// - 404: The token's user no longer exists
/// - 409: Email taken by another user
pub async fn update_user(
    request_id: RequestId,
    caller: web::ReqData<AuthenticatedUser>,
    body: web::Json<CredentialsRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let AuthenticatedUser(user_id) = caller.into_inner();
    let context = ErrorContext::new(&request_id, "update_user").with_user_id(user_id);

    let email = is_valid_email(&body.email)?;
    let hashed_password = hash_password(&body.password)?;

    let user = store
        .update_user_credentials(user_id, &email, &hashed_password)
        .await
        .map_err(|e| {
            context.log_error(&e);
            e
        })?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user_id)))?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        "User credentials updated"
    );

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
