/// Base URL of the task API, without a trailing path (e.g. http://localhost:8080)
pub const API_URL: &str = "API_URL";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Typically http://localhost:4317 when an OpenTelemetry
/// collector runs alongside the client. Spans are only exported when this is set.
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Typically http://localhost:4317 when an OpenTelemetry
/// collector runs alongside the client. Metrics are only exported when this is set.
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";
