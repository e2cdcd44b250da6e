//! Metrics collection and exposition.
//!
//! # Metrics
//! - `signal_dispatch_total` (counter): signals executed, by `kind` and
//!   `outcome` (`terminated` or `thrown`)
//! - `signal_forwarded_total` (counter): non-signal errors passed through
//! - `http_errors_total` (counter): catch-all responses, by `status`
//!
//! # Design Decisions
//! - Prometheus exporter is optional; without it every call is a no-op

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_dispatch(kind: &'static str, outcome: &'static str) {
    metrics::counter!("signal_dispatch_total", "kind" => kind, "outcome" => outcome).increment(1);
}

pub fn record_forwarded() {
    metrics::counter!("signal_forwarded_total").increment(1);
}

pub fn record_error_response(status: u16) {
    metrics::counter!("http_errors_total", "status" => status.to_string()).increment(1);
}
