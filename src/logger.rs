use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use log::{info, warn};
use std::rc::Rc;
use std::time::Instant;

use crate::error::{AppError, ErrorHandler};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Id assigned to a request by `LoggerMiddleware`
///
/// Stored in the request extensions; handlers extract it to tag their own
/// log lines with the value sent back in the `x-request-id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Falls back to a fresh id when the middleware is not installed
impl FromRequest for RequestId {
    type Error = Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate);
        std::future::ready(Ok(id))
    }
}

/// Request logging middleware
///
/// Logs method, path, status and latency of every request and tags the
/// response with an `x-request-id` header so client reports can be matched
/// against server logs. The same id is available to handlers as `RequestId`
/// and is attached to the log line of any `AppError` the request produced.
/// Query strings are not logged.
pub struct LoggerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = LoggerMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(LoggerMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start_time = Instant::now();
        let request_id = RequestId::generate();
        req.extensions_mut().insert(request_id.clone());
        let method = req.method().to_string();
        let path = req.path().to_string();

        info!("[{}] Request started: {} {}", request_id, method, path);

        let service = self.service.clone();

        Box::pin(async move {
            let mut res = match service.call(req).await {
                Ok(res) => res,
                Err(e) => {
                    if let Some(app_error) = e.as_error::<AppError>() {
                        app_error.log_error(request_id.as_str());
                    }
                    warn!(
                        "[{}] Request rejected: {} {} - {} ({}ms)",
                        request_id,
                        method,
                        path,
                        e,
                        start_time.elapsed().as_millis()
                    );
                    return Err(e);
                }
            };

            let elapsed = start_time.elapsed();
            let status = res.status();

            if let Some(app_error) = res
                .response()
                .error()
                .and_then(|e| e.as_error::<AppError>())
            {
                app_error.log_error(request_id.as_str());
            }

            if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            if status.is_server_error() {
                warn!(
                    "[{}] Request failed: {} {} - Status: {} ({}ms)",
                    request_id,
                    method,
                    path,
                    status.as_u16(),
                    elapsed.as_millis()
                );
            } else {
                info!(
                    "[{}] Request completed: {} {} - Status: {} ({}ms)",
                    request_id,
                    method,
                    path,
                    status.as_u16(),
                    elapsed.as_millis()
                );
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn test_handler_sees_the_header_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(LoggerMiddleware)
                .route("/", web::get().to(|id: RequestId| async move { id.to_string() })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .expect("missing request id header")
            .to_str()
            .unwrap()
            .to_string();
        let body = test::read_body(res).await;

        assert_eq!(std::str::from_utf8(&body).unwrap(), header);
    }

    #[actix_web::test]
    async fn test_request_id_is_read_from_extensions() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(RequestId::from("abc"));

        let id = RequestId::extract(&req).await.unwrap();

        assert_eq!(id.as_str(), "abc");
    }

    #[actix_web::test]
    async fn test_request_id_without_middleware_is_generated() {
        let req = test::TestRequest::default().to_http_request();

        let id = RequestId::extract(&req).await.unwrap();

        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }
}
