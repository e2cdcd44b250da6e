//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch + catch-all produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, Prometheus exposition)
//! ```
//!
//! # Design Decisions
//! - Request ID is a field on every dispatch event
//! - Metrics are cheap (atomic increments) and no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
