pub mod fleet_target;
pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

pub use fleet_target::FleetTarget;
pub use request_trace::{RequestTrace, TraceId, REQUEST_ID_HEADER};
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
