//! Terminate an HTTP request from anywhere in the call stack.
//!
//! Helpers return [`Outcome<T>`]; raising a [`RedirectSignal`], [`JsonSignal`]
//! or custom [`ResponseSignal`] travels up through `?` to the
//! [`DispatchInterceptor`], which writes the response exactly once. Ordinary
//! errors pass through the interceptor untouched.

pub mod config;
pub mod demo;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod signal;

pub use config::ServerConfig;
pub use dispatch::{DispatchError, DispatchInterceptor, Dispatched};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use signal::{JsonSignal, Outcome, Raised, RedirectSignal, RedirectStatus, ResponseSignal};
