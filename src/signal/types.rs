//! Propagation types and construction errors.

use std::fmt;
use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::signal::{JsonSignal, RedirectSignal, ResponseSignal};

/// Boxed error carried through the error channel.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of any frame that may terminate the request early.
pub type Outcome<T> = Result<T, Raised>;

/// A value travelling up the call stack towards the dispatch boundary.
///
/// Either a response signal (terminate with this response) or an ordinary
/// error the host's error handling should see untouched.
pub enum Raised {
    Signal(ResponseSignal),
    Error(BoxError),
}

impl Raised {
    /// Wrap any ordinary error.
    pub fn other(err: impl Into<BoxError>) -> Self {
        Raised::Error(err.into())
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, Raised::Signal(_))
    }

    pub fn into_signal(self) -> Option<ResponseSignal> {
        match self {
            Raised::Signal(signal) => Some(signal),
            Raised::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Raised::Signal(_) => None,
            Raised::Error(err) => Some(err.as_ref()),
        }
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Signal(signal) => f.debug_tuple("Signal").field(signal).finish(),
            Raised::Error(err) => f.debug_tuple("Error").field(err).finish(),
        }
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Signal(signal) => f.write_str(signal.message()),
            Raised::Error(err) => write!(f, "{}", err),
        }
    }
}

impl From<ResponseSignal> for Raised {
    fn from(signal: ResponseSignal) -> Self {
        Raised::Signal(signal)
    }
}

impl From<RedirectSignal> for Raised {
    fn from(signal: RedirectSignal) -> Self {
        Raised::Signal(signal.into())
    }
}

impl From<JsonSignal> for Raised {
    fn from(signal: JsonSignal) -> Self {
        Raised::Signal(signal.into())
    }
}

impl From<BoxError> for Raised {
    fn from(err: BoxError) -> Self {
        Raised::Error(err)
    }
}

impl From<SignalError> for Raised {
    fn from(err: SignalError) -> Self {
        Raised::Error(Box::new(err))
    }
}

impl From<DispatchError> for Raised {
    fn from(err: DispatchError) -> Self {
        Raised::Error(Box::new(err))
    }
}

impl From<serde_json::Error> for Raised {
    fn from(err: serde_json::Error) -> Self {
        Raised::Error(Box::new(err))
    }
}

impl From<std::io::Error> for Raised {
    fn from(err: std::io::Error) -> Self {
        Raised::Error(Box::new(err))
    }
}

/// Errors raised while constructing a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignalError {
    /// Redirects only accept 301, 302, 303, 307 and 308.
    #[error("invalid redirect status {0}: expected one of 301, 302, 303, 307, 308")]
    InvalidRedirectStatus(u16),

    /// Not an HTTP status code at all (outside 100..=999).
    #[error("invalid HTTP status code {0}")]
    InvalidStatusCode(u16),
}
