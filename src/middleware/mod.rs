/// Middleware module
///
/// Authentication for resources that act on behalf of a user.

mod jwt_middleware;

pub use jwt_middleware::JwtMiddleware;
