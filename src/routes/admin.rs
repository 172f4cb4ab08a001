/// Admin Routes
///
/// Usage metrics and the development-only reset.

use actix_web::{web, HttpResponse};

use crate::configuration::ApplicationSettings;
use crate::error::AppError;
use crate::metrics::HitCounter;
use crate::store::Store;

/// GET /admin/metrics
pub async fn metrics(counter: web::Data<HitCounter>) -> HttpResponse {
    let body = format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        counter.get()
    );

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// POST /admin/reset
///
/// Zeroes the hit counter and deletes every user (chirps and refresh tokens
/// go with them). Only available when the platform is "dev".
///
/// # Errors
/// - 403: Not running on the dev platform
/// - 500: Storage failure
pub async fn reset(
    store: web::Data<dyn Store>,
    counter: web::Data<HitCounter>,
    app: web::Data<ApplicationSettings>,
) -> Result<HttpResponse, AppError> {
    if !app.is_dev() {
        return Err(AppError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    store.delete_all_users().await?;
    counter.reset();

    tracing::info!("Hit counter and users reset");

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hits reset to 0 and database reset to initial state."))
}
