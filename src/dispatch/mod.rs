//! Dispatch boundary.
//!
//! # Data Flow
//! ```text
//! handler returns Err(Raised)
//!     → channel.rs (placeholder response + single-use CaughtSlot)
//!     → middleware.rs dispatch_middleware
//!         → interceptor.rs: Signal → terminal action → ResponseWriter
//!                           Error  → forwarded untouched
//!     → middleware.rs catch_all_middleware (generic error rendering)
//! ```
//!
//! # Design Decisions
//! - The interceptor is a value passed into the pipeline, never a global
//! - Matching is by enum tag; the diagnostic message is never inspected
//! - Action failures become ordinary errors for the catch-all handler

pub mod channel;
pub mod interceptor;
pub mod middleware;

pub use channel::CaughtSlot;
pub use interceptor::{DispatchError, DispatchInterceptor, Dispatched};
pub use middleware::{catch_all_middleware, dispatch_middleware, ErrorPolicy};
