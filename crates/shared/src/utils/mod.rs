mod logs;
mod metadata;
mod metrics;
mod otel;

pub use self::logs::init_logger;
pub use self::metadata::{MetadataInjector, inject_trace_context};
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::otel::{Telemetry, TracingContext};
