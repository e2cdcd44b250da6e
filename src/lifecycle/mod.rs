//! Lifecycle management.
//!
//! # Design Decisions
//! - Shutdown is a broadcast: the server and any background task subscribe
//! - Ctrl+C and an explicit trigger end the server the same way

pub mod shutdown;

pub use shutdown::Shutdown;
