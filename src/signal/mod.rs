//! Response signals.
//!
//! # Data Flow
//! ```text
//! handler → helper → helper
//!     → builds RedirectSignal / JsonSignal / ResponseSignal::custom
//!     → returns Err(Raised::Signal(..)) and `?` carries it upward
//!     → handler returns Outcome<T>, axum turns Err into a placeholder response
//!     → dispatch middleware hands the signal to DispatchInterceptor
//! ```
//!
//! # Design Decisions
//! - Raising is a plain `Err` so every intermediate frame propagates it with `?`
//! - Signal kinds are a closed enum plus a `Custom` escape hatch
//! - Construction never touches the response; only invocation writes
//! - `ResponseSignal` is not an `Error`: terminating a request is not a failure

pub mod json;
pub mod redirect;
pub mod response;
pub mod types;

pub use json::JsonSignal;
pub use redirect::{RedirectSignal, RedirectStatus};
pub use response::{ResponseSignal, TerminalAction};
pub use types::{BoxError, Outcome, Raised, SignalError};
