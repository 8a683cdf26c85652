//! Per-request tracing span and task-local trace id.
//!
//! Wraps the downstream future in a `fleet_request` span and in
//! [`trace_ctx::with_trace_id`] so problem-details bodies and DB error logs
//! carry the same id. Span fields name the fleet resource from
//! [`FleetTarget`] plus the `driverAction` of assignment calls.
//! Must sit inside `RequestTrace`:
//!
//! App::new()
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)
//!     .wrap(StructuredLogger)

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument};

use crate::middleware::fleet_target::{driver_action, FleetTarget};
use crate::middleware::request_trace::TraceId;
use crate::trace_ctx;

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
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
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| trace_ctx::UNKNOWN_TRACE_ID.to_string());

        let target = FleetTarget::from_path(req.path());
        let span = info_span!(
            "fleet_request",
            trace_id = %trace_id,
            http.method = %req.method(),
            url.path = %req.path(),
            fleet.resource = target.resource,
            fleet.driver_id = target.driver_id,
            fleet.car_id = target.car_id,
            fleet.driver_action = driver_action(req.query_string()),
        );

        let fut = self.service.call(req);
        Box::pin(trace_ctx::with_trace_id(trace_id, fut).instrument(span))
    }
}
