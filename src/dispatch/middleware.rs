//! Axum middleware for the dispatch boundary and the catch-all error handler.
//!
//! Register `dispatch_middleware` after every route that may raise a signal,
//! and `catch_all_middleware` outside it:
//!
//! ```text
//! Router::new()
//!     .route(..)                                   // may raise
//!     .layer(from_fn_with_state(interceptor, dispatch_middleware))
//!     .layer(from_fn_with_state(policy, catch_all_middleware))
//! ```

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::dispatch::{CaughtSlot, DispatchInterceptor, Dispatched};
use crate::http::{RequestHead, ResponseWriter};
use crate::observability::metrics;
use crate::signal::Raised;

/// How the catch-all handler renders errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPolicy {
    /// Include the error text in the response body.
    pub expose_details: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Executes response signals raised by inner handlers.
pub async fn dispatch_middleware(
    State(interceptor): State<DispatchInterceptor>,
    request: Request,
    next: Next,
) -> Response {
    let head = RequestHead::from_request(&request);
    let mut response = next.run(request).await;

    let Some(caught) = CaughtSlot::take(&mut response) else {
        return response;
    };

    let mut writer = ResponseWriter::new();
    match interceptor.intercept(caught, &head, &mut writer, |raised| raised) {
        Ok(Dispatched::Terminated) => writer.into_response(),
        Ok(Dispatched::Forwarded(raised)) => {
            CaughtSlot::arm(&mut response, raised);
            response
        }
        // The action already ran; hand its failure to generic error handling.
        Err(e) => Raised::from(e).into_response(),
    }
}

/// Renders any error still in the channel as a `500`.
pub async fn catch_all_middleware(
    State(policy): State<ErrorPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = head_request_id(&request);
    let mut response = next.run(request).await;

    let message = match CaughtSlot::take(&mut response) {
        None => return response,
        Some(Raised::Error(err)) => {
            tracing::error!(request_id = %request_id, error = %err, "Request failed");
            err.to_string()
        }
        Some(Raised::Signal(signal)) => {
            tracing::warn!(
                request_id = %request_id,
                kind = signal.kind_name(),
                message = signal.message(),
                "Response signal reached the catch-all handler; is the dispatch interceptor registered?"
            );
            signal.message().to_string()
        }
    };

    let status = StatusCode::INTERNAL_SERVER_ERROR;
    metrics::record_error_response(status.as_u16());

    let error = if policy.expose_details {
        message
    } else {
        status.canonical_reason().unwrap_or("Internal Server Error").to_string()
    };
    (status, Json(ErrorBody { error })).into_response()
}

fn head_request_id(request: &Request) -> String {
    request
        .headers()
        .get(crate::http::X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
