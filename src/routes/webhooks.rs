/// Billing Webhook Routes
///
/// The billing provider notifies us about subscription changes. Only
/// `user.upgraded` changes state; every other event is acknowledged and
/// ignored.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{extract_api_key, verify_api_key};
use crate::configuration::WebhookSettings;
use crate::error::{AppError, AuthError, ErrorContext, ValidationError};
use crate::logger::RequestId;
use crate::store::Store;

pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

#[derive(Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Deserialize)]
pub struct UpgradeData {
    pub user_id: Uuid,
}

/// POST /api/polka/webhooks
///
/// Requires `Authorization: ApiKey <key>`. The body is decoded only after
/// the key is checked, and `data` only for recognised events.
///
/// # Errors
/// - 400: Body is not an event, or an upgrade event without a valid user id
/// - 401: Missing or wrong API key
/// - 404: Upgrade target does not exist
/// - 500: Internal server error
pub async fn polka_webhook(
    request_id: RequestId,
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<dyn Store>,
    webhook: web::Data<WebhookSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new(&request_id, "polka_webhook");

    let api_key = extract_api_key(req.headers())?;
    if !verify_api_key(&api_key, &webhook.polka_key) {
        return Err(AuthError::InvalidApiKey.into());
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

    if event.event != USER_UPGRADED_EVENT {
        tracing::debug!(
            request_id = %context.request_id,
            event = %event.event,
            "Ignoring webhook event"
        );
        return Ok(HttpResponse::NoContent().finish());
    }

    let data: UpgradeData = serde_json::from_value(event.data)
        .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

    if !store.upgrade_user_to_chirpy_red(data.user_id).await? {
        return Err(AppError::not_found(format!("User {} not found", data.user_id)));
    }

    tracing::info!(
        request_id = %context.request_id,
        user_id = %data.user_id,
        "User upgraded to Chirpy Red"
    );

    Ok(HttpResponse::NoContent().finish())
}
