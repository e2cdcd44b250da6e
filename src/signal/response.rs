//! The base response signal.
//!
//! # Responsibilities
//! - Carry exactly one terminal action and a diagnostic message
//! - Execute that action against a response sink, once
//!
//! # Design Decisions
//! - Built-in kinds are data (`Redirect`, `Json`); anything else is `Custom`
//! - The action is `FnOnce`, so a consumed signal cannot run twice
//! - The message is for logs only; dispatch never looks at it

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;

use crate::dispatch::DispatchError;
use crate::http::{RequestHead, ResponseSink};
use crate::signal::json::JsonPayload;
use crate::signal::redirect::RedirectStatus;
use crate::signal::{Outcome, Raised};

/// Message used when a custom signal is built without one.
pub const DEFAULT_MESSAGE: &str = "Response signal raised";

type ActionFn = dyn FnOnce(&RequestHead, &mut dyn ResponseSink) -> Result<(), DispatchError> + Send;

/// A side-effecting closure that fully resolves one response.
pub struct TerminalAction(Box<ActionFn>);

impl TerminalAction {
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce(&RequestHead, &mut dyn ResponseSink) -> Result<(), DispatchError> + Send + 'static,
    {
        Self(Box::new(action))
    }

    fn call(self, request: &RequestHead, sink: &mut dyn ResponseSink) -> Result<(), DispatchError> {
        (self.0)(request, sink)
    }
}

impl fmt::Debug for TerminalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TerminalAction(..)")
    }
}

pub(crate) enum SignalKind {
    Redirect {
        location: String,
        status: RedirectStatus,
    },
    Json {
        payload: JsonPayload,
        status: StatusCode,
    },
    Custom(TerminalAction),
}

/// "Terminate this request with this response", as a value.
pub struct ResponseSignal {
    kind: SignalKind,
    message: Cow<'static, str>,
}

impl ResponseSignal {
    pub(crate) fn from_kind(kind: SignalKind, message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            Cow::Borrowed(DEFAULT_MESSAGE)
        } else {
            message
        };
        Self { kind, message }
    }

    /// A signal running an arbitrary terminal action.
    pub fn custom<F>(action: F) -> Self
    where
        F: FnOnce(&RequestHead, &mut dyn ResponseSink) -> Result<(), DispatchError> + Send + 'static,
    {
        Self::from_kind(SignalKind::Custom(TerminalAction::new(action)), DEFAULT_MESSAGE)
    }

    /// Same as [`ResponseSignal::custom`] with an explicit diagnostic message.
    /// An empty message falls back to the default.
    pub fn custom_with_message<F>(action: F, message: impl Into<Cow<'static, str>>) -> Self
    where
        F: FnOnce(&RequestHead, &mut dyn ResponseSink) -> Result<(), DispatchError> + Send + 'static,
    {
        Self::from_kind(SignalKind::Custom(TerminalAction::new(action)), message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short label for logs and metrics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SignalKind::Redirect { .. } => "redirect",
            SignalKind::Json { .. } => "json",
            SignalKind::Custom(_) => "custom",
        }
    }

    /// Status the action will write, when known up front.
    pub fn status(&self) -> Option<StatusCode> {
        match &self.kind {
            SignalKind::Redirect { status, .. } => Some((*status).into()),
            SignalKind::Json { status, .. } => Some(*status),
            SignalKind::Custom(_) => None,
        }
    }

    /// Raise this signal from the current frame.
    pub fn raise<T>(self) -> Outcome<T> {
        Err(Raised::Signal(self))
    }

    /// Run the terminal action, consuming the signal.
    pub(crate) fn execute(
        self,
        request: &RequestHead,
        sink: &mut dyn ResponseSink,
    ) -> Result<(), DispatchError> {
        match self.kind {
            SignalKind::Redirect { location, status } => {
                sink.write_redirect(status.into(), &location)?;
                Ok(())
            }
            SignalKind::Json { payload, status } => {
                // Serialize first so a bad payload leaves the sink untouched.
                let body = payload.serialize().map_err(DispatchError::Serialize)?;
                sink.set_status(status)?;
                sink.write_json(body)?;
                Ok(())
            }
            SignalKind::Custom(action) => action.call(request, sink),
        }
    }
}

impl fmt::Debug for ResponseSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseSignal")
            .field("kind", &self.kind_name())
            .field("status", &self.status())
            .field("message", &self.message)
            .finish()
    }
}
