/// File server hit counter
///
/// `HitCounter` is the only state shared between requests. It is created once
/// in `startup::run`, handed to `HitCounterMiddleware` (which increments it for
/// every request under `/app/`) and to the admin handlers (which read and
/// reset it).

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct HitCounter {
    hits: AtomicU64,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}

/// Counts every request passing through the wrapped service
pub struct HitCounterMiddleware {
    counter: Arc<HitCounter>,
}

impl HitCounterMiddleware {
    pub fn new(counter: Arc<HitCounter>) -> Self {
        Self { counter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for HitCounterMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = HitCounterMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(HitCounterMiddlewareService {
            service: Rc::new(service),
            counter: self.counter.clone(),
        }))
    }
}

pub struct HitCounterMiddlewareService<S> {
    service: Rc<S>,
    counter: Arc<HitCounter>,
}

impl<S, B> Service<ServiceRequest> for HitCounterMiddlewareService<S>
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
        let hits = self.counter.increment();
        tracing::trace!(hits, path = %req.path(), "File server hit");

        let service = self.service.clone();
        Box::pin(async move { service.call(req).await })
    }
}
