/// JWT Authentication Middleware
///
/// Validates the bearer access token from the Authorization header and injects
/// `AuthenticatedUser` into request extensions for use by route handlers.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::{extract_bearer, validate_access_token, AuthenticatedUser};
use crate::error::AppError;

/// JWT middleware for protecting resources
pub struct JwtMiddleware {
    secret: Rc<str>,
}

impl JwtMiddleware {
    /// Create new JWT middleware instance
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Rc::from(secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    secret: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authenticated = extract_bearer(req.headers())
            .and_then(|token| validate_access_token(&token, &self.secret));

        match authenticated {
            Ok(user_id) => {
                req.extensions_mut().insert(AuthenticatedUser(user_id));
                tracing::debug!(user_id = %user_id, "JWT validated successfully");

                let service = self.service.clone();
                Box::pin(async move { service.call(req).await.map(|res| res.map_into_left_body()) })
            }
            Err(e) => {
                tracing::warn!(path = %req.path(), "JWT authentication failed: {}", e);
                // Rejected as a response so outer middleware can tag and log it
                let res = req.error_response(AppError::Auth(e));
                Box::pin(async move { Ok(res.map_into_right_body()) })
            }
        }
    }
}
