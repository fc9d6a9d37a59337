//! Prometheus text export.
//!
//! Engine crates register their collectors in the default prometheus
//! registry; this module renders whatever is registered there.

use crate::TelemetryError;
use prometheus::{Encoder, TextEncoder};

/// Render every registered metric in the Prometheus text format.
pub fn render_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
