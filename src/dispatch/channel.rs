//! The error channel between handlers and the dispatch boundary.
//!
//! A handler returning `Err(Raised)` produces a placeholder `500` response
//! carrying the raised value in a [`CaughtSlot`] extension. Middleware further
//! out takes the value back out; whoever takes it first owns it.

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::signal::Raised;

/// Single-use hand-off of a raised value through response extensions.
#[derive(Clone)]
pub struct CaughtSlot(Arc<Mutex<Option<Raised>>>);

impl CaughtSlot {
    fn new(raised: Raised) -> Self {
        Self(Arc::new(Mutex::new(Some(raised))))
    }

    /// Attach `raised` to `response`, replacing any earlier slot.
    pub fn arm(response: &mut Response, raised: Raised) {
        response.extensions_mut().insert(Self::new(raised));
    }

    /// Remove the raised value from `response`, if one is attached.
    /// A poisoned lock still yields the value.
    pub fn take(response: &mut Response) -> Option<Raised> {
        let slot = response.extensions_mut().remove::<CaughtSlot>()?;
        let mut guard = slot.0.lock().unwrap_or_else(PoisonError::into_inner);
        guard.take()
    }
}

impl std::fmt::Debug for CaughtSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CaughtSlot(..)")
    }
}

impl IntoResponse for Raised {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        CaughtSlot::arm(&mut response, self);
        response
    }
}
