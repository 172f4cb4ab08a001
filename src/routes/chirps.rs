/// Chirp Routes
///
/// Create, list, fetch and delete chirps. Creating and deleting act on behalf
/// of the authenticated user; reading is public.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::content_filter::filter_profanity;
use crate::domain::ChirpResponse;
use crate::error::{AppError, ErrorContext};
use crate::logger::RequestId;
use crate::store::Store;
use crate::validators::{parse_sort_order, parse_uuid, validate_chirp_body, SortOrder};

#[derive(Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

#[derive(Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<String>,
    pub sort: Option<String>,
}

/// POST /api/chirps
///
/// **Requires valid JWT access token.** The body is length-checked and then
/// profanity-filtered before it is stored.
///
/// # Errors
/// - 400: Malformed body or chirp longer than 140 characters
/// - 401: Missing or invalid token (handled by middleware)
/// - 404: The token's user no longer exists
/// - 500: Internal server error
pub async fn create_chirp(
    request_id: RequestId,
    caller: web::ReqData<AuthenticatedUser>,
    body: web::Json<CreateChirpRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let AuthenticatedUser(user_id) = caller.into_inner();
    let context = ErrorContext::new(&request_id, "create_chirp").with_user_id(user_id);

    validate_chirp_body(&body.body)?;
    let cleaned = filter_profanity(&body.body);

    let chirp = store.create_chirp(user_id, &cleaned).await.map_err(|e| {
        context.log_error(&e);
        e
    })?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        chirp_id = %chirp.id,
        "Chirp created"
    );

    Ok(HttpResponse::Created().json(ChirpResponse::from(chirp)))
}

/// GET /api/chirps?author_id=<uuid>&sort=asc|desc
///
/// Chirps in creation order; `sort=desc` reverses it.
///
/// # Errors
/// - 400: Unparseable `author_id` or unknown `sort`
/// - 500: Internal server error
pub async fn list_chirps(
    query: web::Query<ListChirpsQuery>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let order = parse_sort_order(query.sort.as_deref())?;
    let author_id = query
        .author_id
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map(|raw| parse_uuid("author_id", raw))
        .transpose()?;

    let mut chirps = store.list_chirps(author_id).await?;
    if order == SortOrder::Desc {
        chirps.reverse();
    }

    let response: Vec<ChirpResponse> = chirps.into_iter().map(ChirpResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/chirps/{chirp_id}
///
/// # Errors
/// - 400: Chirp id is not a UUID
/// - 404: No such chirp
/// - 500: Internal server error
pub async fn get_chirp(
    path: web::Path<String>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = parse_uuid("chirp id", &path)?;

    let chirp = store
        .find_chirp(chirp_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Chirp {} not found", chirp_id)))?;

    Ok(HttpResponse::Ok().json(ChirpResponse::from(chirp)))
}

/// DELETE /api/chirps/{chirp_id}
///
/// **Requires valid JWT access token.** Only the author may delete a chirp.
///
/// # Errors
/// - 400: Chirp id is not a UUID
/// - 401: Missing or invalid token (handled by middleware)
/// - 403: Caller is not the author
/// - 404: No such chirp
/// - 500: Internal server error
pub async fn delete_chirp(
    request_id: RequestId,
    caller: web::ReqData<AuthenticatedUser>,
    path: web::Path<String>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let AuthenticatedUser(user_id) = caller.into_inner();
    let context = ErrorContext::new(&request_id, "delete_chirp").with_user_id(user_id);
    let chirp_id = parse_uuid("chirp id", &path)?;

    let chirp = store
        .find_chirp(chirp_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Chirp {} not found", chirp_id)))?;

    if chirp.user_id != user_id {
        let error = AppError::Forbidden("You can only delete your own chirps".to_string());
        context.log_error(&error);
        return Err(error);
    }

    // Concurrently deleted between lookup and delete
    if !store.delete_chirp(chirp_id).await? {
        return Err(AppError::not_found(format!("Chirp {} not found", chirp_id)));
    }

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        chirp_id = %chirp_id,
        "Chirp deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}
