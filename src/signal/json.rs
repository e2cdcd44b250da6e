//! JSON body signals.

use std::fmt;

use axum::body::Bytes;
use axum::http::StatusCode;
use serde::Serialize;

use crate::signal::response::{ResponseSignal, SignalKind};
use crate::signal::{Outcome, Raised, SignalError};

/// Payload captured at construction, serialized only when the action runs.
pub(crate) struct JsonPayload(Box<dyn FnOnce() -> serde_json::Result<Bytes> + Send>);

impl JsonPayload {
    fn new<T>(payload: T) -> Self
    where
        T: Serialize + Send + 'static,
    {
        Self(Box::new(move || serde_json::to_vec(&payload).map(Bytes::from)))
    }

    /// Serialize in field order, exactly as `serde_json::to_vec` would.
    pub(crate) fn serialize(self) -> serde_json::Result<Bytes> {
        (self.0)()
    }
}

/// Terminate the request with a JSON body.
///
/// Any status code is accepted; a payload that fails to serialize is only
/// reported when the signal is dispatched.
pub struct JsonSignal {
    payload: JsonPayload,
    status: StatusCode,
}

impl JsonSignal {
    /// `200 OK` with `payload` as the body.
    pub fn new<T>(payload: T) -> Self
    where
        T: Serialize + Send + 'static,
    {
        Self::with_status(payload, StatusCode::OK)
    }

    pub fn with_status<T>(payload: T, status: StatusCode) -> Self
    where
        T: Serialize + Send + 'static,
    {
        Self {
            payload: JsonPayload::new(payload),
            status,
        }
    }

    /// Like [`JsonSignal::with_status`] from a raw code. Only codes outside
    /// `100..=999` are rejected.
    pub fn from_code<T>(payload: T, code: u16) -> Result<Self, SignalError>
    where
        T: Serialize + Send + 'static,
    {
        let status = StatusCode::from_u16(code).map_err(|_| SignalError::InvalidStatusCode(code))?;
        Ok(Self::with_status(payload, status))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn raise<T>(self) -> Outcome<T> {
        Err(Raised::from(self))
    }
}

impl fmt::Debug for JsonSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSignal")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl From<JsonSignal> for ResponseSignal {
    fn from(signal: JsonSignal) -> Self {
        let message = format!("Responding with JSON ({})", signal.status);
        ResponseSignal::from_kind(
            SignalKind::Json {
                payload: signal.payload,
                status: signal.status,
            },
            message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchError;
    use crate::http::sink::recording::{RecordingSink, SinkCall};
    use crate::http::RequestHead;
    use serde::ser::Error as _;
    use serde_json::json;
    use std::collections::BTreeMap;

    struct SelfReferencing;

    impl Serialize for SelfReferencing {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("reference cycle"))
        }
    }

    fn run(signal: JsonSignal) -> (RecordingSink, Result<(), DispatchError>) {
        let mut sink = RecordingSink::default();
        let result = ResponseSignal::from(signal).execute(&RequestHead::default(), &mut sink);
        (sink, result)
    }

    #[test]
    fn test_not_found_body() {
        let (sink, result) = run(JsonSignal::with_status(json!({"error": "Not found"}), StatusCode::NOT_FOUND));
        result.unwrap();
        assert_eq!(
            sink.calls,
            vec![
                SinkCall::Status(StatusCode::NOT_FOUND),
                SinkCall::Json(r#"{"error":"Not found"}"#.into()),
            ]
        );
    }

    #[test]
    fn test_default_status_is_ok() {
        let signal = JsonSignal::new(vec![1, 2, 3]);
        assert_eq!(signal.status(), StatusCode::OK);

        let (sink, result) = run(signal);
        result.unwrap();
        assert_eq!(
            sink.calls,
            vec![SinkCall::Status(StatusCode::OK), SinkCall::Json("[1,2,3]".into())]
        );
    }

    #[test]
    fn test_any_json_value() {
        let values = vec![
            json!(null),
            json!(true),
            json!(-12.5),
            json!("plain"),
            json!([1, "two", [3], {"four": 4}]),
            json!({"b": {"nested": [null]}, "a": ""}),
        ];
        for value in values {
            let expected = serde_json::to_string(&value).unwrap();
            let (sink, result) = run(JsonSignal::with_status(value, StatusCode::ACCEPTED));
            result.unwrap();
            assert_eq!(
                sink.calls,
                vec![SinkCall::Status(StatusCode::ACCEPTED), SinkCall::Json(expected)]
            );
        }
    }

    #[test]
    fn test_serializable_struct_payload() {
        #[derive(Serialize)]
        struct Problem {
            code: &'static str,
            retry_after: Option<u32>,
        }

        let payload = Problem { code: "quota", retry_after: Some(30) };
        let (sink, result) = run(JsonSignal::from_code(payload, 429).unwrap());
        result.unwrap();
        assert_eq!(
            sink.calls,
            vec![
                SinkCall::Status(StatusCode::TOO_MANY_REQUESTS),
                SinkCall::Json(r#"{"code":"quota","retry_after":30}"#.into()),
            ]
        );
    }

    #[test]
    fn test_struct_fields_keep_declaration_order() {
        #[derive(Serialize)]
        struct Problem {
            zeta: u32,
            alpha: u32,
            middle: &'static str,
        }

        let payload = Problem { zeta: 1, alpha: 2, middle: "m" };
        let expected = serde_json::to_string(&payload).unwrap();
        assert_eq!(expected, r#"{"zeta":1,"alpha":2,"middle":"m"}"#);

        let (sink, result) = run(JsonSignal::new(payload));
        result.unwrap();
        assert_eq!(
            sink.calls,
            vec![SinkCall::Status(StatusCode::OK), SinkCall::Json(expected)]
        );
    }

    #[test]
    fn test_wide_integers_are_written() {
        let payload = vec![u128::MAX];
        let expected = serde_json::to_string(&payload).unwrap();

        let (sink, result) = run(JsonSignal::new(payload));
        result.unwrap();
        assert_eq!(
            sink.calls,
            vec![SinkCall::Status(StatusCode::OK), SinkCall::Json(expected)]
        );
    }

    #[test]
    fn test_open_ended_status_codes() {
        assert_eq!(JsonSignal::from_code(json!({}), 299).unwrap().status().as_u16(), 299);
        assert_eq!(JsonSignal::from_code(json!({}), 599).unwrap().status().as_u16(), 599);
        assert_eq!(
            JsonSignal::from_code(json!({}), 1000).unwrap_err(),
            SignalError::InvalidStatusCode(1000)
        );
        assert_eq!(
            JsonSignal::from_code(json!({}), 42).unwrap_err(),
            SignalError::InvalidStatusCode(42)
        );
    }

    #[test]
    fn test_bad_payload_fails_at_dispatch_without_writing() {
        // Construction succeeds even though the payload cannot be serialized.
        let signal = JsonSignal::new(SelfReferencing);

        let (sink, result) = run(signal);
        assert!(matches!(result, Err(DispatchError::Serialize(_))));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_non_string_keys_fail_at_dispatch() {
        let mut payload = BTreeMap::new();
        payload.insert((1, 2), "pair");

        let (sink, result) = run(JsonSignal::new(payload));
        assert!(matches!(result, Err(DispatchError::Serialize(_))));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_message_names_status() {
        let signal: ResponseSignal = JsonSignal::with_status(json!(null), StatusCode::NOT_FOUND).into();
        assert_eq!(signal.message(), "Responding with JSON (404 Not Found)");
        assert_eq!(signal.kind_name(), "json");
    }
}
