//! Response-writing primitives.
//!
//! # Responsibilities
//! - Define the sink terminal actions write through
//! - Build an axum `Response` from those writes
//! - Refuse any write after the response has been committed
//!
//! # Design Decisions
//! - A body write or a redirect write commits the response
//! - Status and headers may be set any number of times before the commit
//! - Nothing is sent from here; the host streams the finished response

use axum::{
    body::{Body, Bytes},
    http::{
        header::{self, HeaderName, HeaderValue},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Content type written by [`ResponseSink::write_json`].
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Errors reported by a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("response already committed")]
    AlreadyCommitted,

    #[error("invalid header value for {name}")]
    InvalidHeaderValue { name: HeaderName },
}

/// Writer primitives exposed by the host to terminal actions.
pub trait ResponseSink {
    fn set_status(&mut self, status: StatusCode) -> Result<(), SinkError>;

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), SinkError>;

    /// Write the body and commit.
    fn write_body(&mut self, body: Bytes) -> Result<(), SinkError>;

    /// Write an already serialized JSON body with a JSON content type, and commit.
    fn write_json(&mut self, body: Bytes) -> Result<(), SinkError>;

    /// Write a redirect (status + `Location`) and commit.
    fn write_redirect(&mut self, status: StatusCode, location: &str) -> Result<(), SinkError>;

    /// Whether a committing write has happened.
    fn is_committed(&self) -> bool;
}

/// In-memory sink producing an axum response.
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    committed: bool,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            committed: false,
        }
    }

    fn ensure_open(&self) -> Result<(), SinkError> {
        if self.committed {
            Err(SinkError::AlreadyCommitted)
        } else {
            Ok(())
        }
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink for ResponseWriter {
    fn set_status(&mut self, status: StatusCode) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.status = status;
        Ok(())
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.headers.insert(name, value);
        Ok(())
    }

    fn write_body(&mut self, body: Bytes) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.body = body;
        self.committed = true;
        Ok(())
    }

    fn write_json(&mut self, body: Bytes) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        self.write_body(body)
    }

    fn write_redirect(&mut self, status: StatusCode, location: &str) -> Result<(), SinkError> {
        self.ensure_open()?;
        let value = HeaderValue::try_from(location).map_err(|_| SinkError::InvalidHeaderValue {
            name: header::LOCATION,
        })?;
        self.status = status;
        self.headers.insert(header::LOCATION, value);
        self.body = Bytes::new();
        self.committed = true;
        Ok(())
    }

    fn is_committed(&self) -> bool {
        self.committed
    }
}

impl IntoResponse for ResponseWriter {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
