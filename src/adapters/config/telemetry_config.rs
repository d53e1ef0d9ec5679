#[derive(serde::Deserialize, Debug, Clone)]
pub struct TelemetryConfig {
    /// Maximum level recorded for this crate and the HTTP layer.
    pub level: String,
    pub log_file: Box<str>,
    /// OTLP/gRPC collector; tracing export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}
