//! HTTP host pipeline.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, tracing)
//!     → request.rs (request ID, RequestHead captured for terminal actions)
//!     → application routes (may raise signals)
//!     → dispatch boundary (see crate::dispatch)
//!     → sink.rs (ResponseWriter builds the terminal response)
//!     → Send to client
//! ```

pub mod request;
pub mod server;
pub mod sink;

pub use request::{RequestHead, RequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
pub use sink::{ResponseSink, ResponseWriter, SinkError, JSON_CONTENT_TYPE};
