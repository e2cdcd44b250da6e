//! The dispatch interceptor.

use thiserror::Error;
use tracing::{debug, error};

use crate::http::sink::SinkError;
use crate::http::{RequestHead, ResponseSink};
use crate::observability::metrics;
use crate::signal::{BoxError, Raised};

/// Failures while executing a terminal action.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The JSON payload could not be serialized.
    #[error("failed to serialize JSON payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response writer refused a write.
    #[error("response writer rejected write: {0}")]
    Sink(#[from] SinkError),

    /// The action returned without committing a body or redirect.
    #[error("terminal action returned without resolving the response")]
    Unresolved,

    /// A custom action failed.
    #[error("terminal action failed: {0}")]
    Action(#[source] BoxError),
}

/// What happened to a caught value.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatched<R> {
    /// A signal's terminal action resolved the response.
    Terminated,
    /// Not a signal; the continuation ran and returned this.
    Forwarded(R),
}

/// Recognizes response signals at the tail of the error channel and
/// executes them. Everything else is passed to the continuation unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchInterceptor;

impl DispatchInterceptor {
    pub fn new() -> Self {
        Self
    }

    /// Handle one caught value.
    ///
    /// For a signal, runs its terminal action against `sink` and never calls
    /// `next`. An action failure is returned as-is, without retry. For any
    /// other value, calls `next` with it and runs no action.
    pub fn intercept<N, R>(
        &self,
        caught: Raised,
        request: &RequestHead,
        sink: &mut dyn ResponseSink,
        next: N,
    ) -> Result<Dispatched<R>, DispatchError>
    where
        N: FnOnce(Raised) -> R,
    {
        let signal = match caught {
            Raised::Signal(signal) => signal,
            other => {
                debug!(
                    request_id = request.request_id().unwrap_or("unknown"),
                    error = %other,
                    "Forwarding non-signal error"
                );
                metrics::record_forwarded();
                return Ok(Dispatched::Forwarded(next(other)));
            }
        };

        let kind = signal.kind_name();
        debug!(
            request_id = request.request_id().unwrap_or("unknown"),
            kind,
            status = ?signal.status(),
            message = signal.message(),
            "Dispatching response signal"
        );

        let result = signal.execute(request, sink).and_then(|()| {
            if sink.is_committed() {
                Ok(())
            } else {
                Err(DispatchError::Unresolved)
            }
        });

        match result {
            Ok(()) => {
                metrics::record_dispatch(kind, "terminated");
                Ok(Dispatched::Terminated)
            }
            Err(e) => {
                error!(
                    request_id = request.request_id().unwrap_or("unknown"),
                    kind,
                    error = %e,
                    "Terminal action failed"
                );
                metrics::record_dispatch(kind, "thrown");
                Err(e)
            }
        }
    }
}
