//! Redirect signals.

use std::fmt;

use axum::http::StatusCode;

use crate::signal::response::{ResponseSignal, SignalKind};
use crate::signal::{Outcome, Raised, SignalError};

/// The redirect codes a [`RedirectSignal`] may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RedirectStatus {
    MovedPermanently,
    #[default]
    Found,
    SeeOther,
    TemporaryRedirect,
    PermanentRedirect,
}

impl RedirectStatus {
    pub const ALL: [RedirectStatus; 5] = [
        RedirectStatus::MovedPermanently,
        RedirectStatus::Found,
        RedirectStatus::SeeOther,
        RedirectStatus::TemporaryRedirect,
        RedirectStatus::PermanentRedirect,
    ];

    pub fn as_u16(self) -> u16 {
        match self {
            RedirectStatus::MovedPermanently => 301,
            RedirectStatus::Found => 302,
            RedirectStatus::SeeOther => 303,
            RedirectStatus::TemporaryRedirect => 307,
            RedirectStatus::PermanentRedirect => 308,
        }
    }
}

impl TryFrom<u16> for RedirectStatus {
    type Error = SignalError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            301 => Ok(RedirectStatus::MovedPermanently),
            302 => Ok(RedirectStatus::Found),
            303 => Ok(RedirectStatus::SeeOther),
            307 => Ok(RedirectStatus::TemporaryRedirect),
            308 => Ok(RedirectStatus::PermanentRedirect),
            other => Err(SignalError::InvalidRedirectStatus(other)),
        }
    }
}

impl From<RedirectStatus> for StatusCode {
    fn from(status: RedirectStatus) -> Self {
        match status {
            RedirectStatus::MovedPermanently => StatusCode::MOVED_PERMANENTLY,
            RedirectStatus::Found => StatusCode::FOUND,
            RedirectStatus::SeeOther => StatusCode::SEE_OTHER,
            RedirectStatus::TemporaryRedirect => StatusCode::TEMPORARY_REDIRECT,
            RedirectStatus::PermanentRedirect => StatusCode::PERMANENT_REDIRECT,
        }
    }
}

impl fmt::Display for RedirectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Terminate the request with a redirect.
///
/// The location is anything with a canonical string form (`&str`, `String`,
/// `url::Url`, ...). It is rendered once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSignal {
    location: String,
    status: RedirectStatus,
}

impl RedirectSignal {
    /// Redirect with an explicit status code.
    ///
    /// Fails unless `status` is one of 301, 302, 303, 307 or 308.
    pub fn new(location: impl fmt::Display, status: u16) -> Result<Self, SignalError> {
        let status = RedirectStatus::try_from(status)?;
        Ok(Self::with_status(location, status))
    }

    /// `302 Found` redirect.
    pub fn to(location: impl fmt::Display) -> Self {
        Self::with_status(location, RedirectStatus::default())
    }

    pub fn with_status(location: impl fmt::Display, status: RedirectStatus) -> Self {
        Self {
            location: location.to_string(),
            status,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn status(&self) -> RedirectStatus {
        self.status
    }

    pub fn raise<T>(self) -> Outcome<T> {
        Err(Raised::from(self))
    }
}

impl From<RedirectSignal> for ResponseSignal {
    fn from(signal: RedirectSignal) -> Self {
        let message = format!("Redirecting to {}", signal.location);
        ResponseSignal::from_kind(
            SignalKind::Redirect {
                location: signal.location,
                status: signal.status,
            },
            message,
        )
    }
}
