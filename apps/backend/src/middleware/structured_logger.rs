use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::middleware::fleet_target::FleetTarget;
use crate::middleware::request_trace::TraceId;

/// Emits one `fleet_request_completed` event per request; level follows the
/// status class. Requests rejected before `RequestTrace` ran log an empty
/// `trace_id`.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let target = FleetTarget::from_path(&path);

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, trace_id) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .extensions()
                        .get::<TraceId>()
                        .map(|t| t.0.clone())
                        .unwrap_or_default(),
                ),
                Err(err) => (err.as_response_error().status_code(), String::new()),
            };
            let status_code = status.as_u16();
            let duration_us = start.elapsed().as_micros() as u64;

            macro_rules! completed {
                ($level:ident) => {
                    $level!(
                        http.method = %method,
                        url.path = %path,
                        http.status_code = status_code,
                        fleet.resource = target.resource,
                        fleet.driver_id = target.driver_id,
                        fleet.car_id = target.car_id,
                        duration_us,
                        trace_id = %trace_id,
                        "fleet_request_completed"
                    )
                };
            }

            if status.is_server_error() {
                completed!(error);
            } else if status.is_client_error() {
                completed!(warn);
            } else {
                completed!(info);
            }

            result
        })
    }
}
