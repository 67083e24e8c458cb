//! Response envelope validation and decoding.
//!
//! The server keys every payload one level under `data` and one level under
//! the operation name:
//!
//! ```text
//! {"data": {"<operationName>": <payload>}}
//! ```
//!
//! Decoding happens in two explicit steps. The body is first validated into a
//! [`ResponseEnvelope`] and then unwrapped into its single [`RootPayload`].
//! Only after that is the payload decoded into the caller's type. The root
//! key is never matched against the template; whichever single key is
//! present is taken.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{DecodeError, MalformedBody};

/// A GraphQL error returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    /// The error message.
    pub message: String,

    /// Locations in the document where the error occurred.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<GraphQLLocation>,

    /// Path to the field that caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,

    /// Additional error metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQLError {
    /// Create an error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: None,
            extensions: None,
        }
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " (at ")?;
            for (i, segment) in path.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                match segment {
                    PathSegment::Field(name) => write!(f, "{}", name)?,
                    PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphQLError {}

/// A location in a GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLLocation {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

/// A segment in an error path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A field name.
    Field(String),
    /// An array index.
    Index(usize),
}

/// The validated top level of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Entries under `data`, guaranteed to be an object.
    pub data: Map<String, Value>,
    /// Errors reported next to the data, if any.
    pub errors: Vec<GraphQLError>,
}

impl ResponseEnvelope {
    /// Parse raw bytes and validate their shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes).map_err(MalformedBody::InvalidJson)?;
        Self::from_value(value)
    }

    /// Validate an already parsed body.
    ///
    /// The top level must be an object whose `data` entry is itself a
    /// non-empty object; anything else is [`DecodeError::NoData`].
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(mut top) = value else {
            return Err(DecodeError::no_data());
        };

        // A malformed `errors` entry is not worth failing over; the data decides.
        let errors = top
            .remove("errors")
            .and_then(|errors| serde_json::from_value::<Vec<GraphQLError>>(errors).ok())
            .unwrap_or_default();

        match top.remove("data") {
            Some(Value::Object(data)) if !data.is_empty() => Ok(Self { data, errors }),
            _ => Err(DecodeError::NoData { errors }),
        }
    }

    /// Check if the server reported errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take the single entry under `data`.
    ///
    /// A `null` entry is returned as-is unless the server also reported
    /// errors, in which case it is [`DecodeError::NoData`].
    pub fn into_root(self) -> Result<RootPayload, DecodeError> {
        if self.data.len() > 1 {
            let keys = self.data.keys().cloned().collect();
            return Err(MalformedBody::MultipleRoots { keys }.into());
        }

        match self.data.into_iter().next() {
            // A null root next to server errors means the server refused.
            Some((_, Value::Null)) if !self.errors.is_empty() => Err(DecodeError::NoData {
                errors: self.errors,
            }),
            Some((operation, payload)) => Ok(RootPayload { operation, payload }),
            None => Err(DecodeError::NoData {
                errors: self.errors,
            }),
        }
    }
}

/// The single payload found under `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct RootPayload {
    /// The root key, normally the operation's field name.
    pub operation: String,
    /// The value under that key.
    pub payload: Value,
}

impl RootPayload {
    /// Decode the payload into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, DecodeError> {
        let Self { operation, payload } = self;
        T::deserialize(payload).map_err(|source| DecodeError::TypeMismatch { operation, source })
    }
}

/// Validate `bytes` and return the single root payload.
pub fn decode_envelope(bytes: &[u8]) -> Result<RootPayload, DecodeError> {
    ResponseEnvelope::from_slice(bytes)?.into_root()
}

/// Unwrap the envelope in `bytes` and decode its payload into `T`.
///
/// `T` may be a record or a sequence of records; the payload is decoded
/// structurally either way.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    decode_envelope(bytes)?.decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: String,
    }

    #[test]
    fn test_decode_single_record() {
        let record: Record = decode(br#"{"data":{"x":{"id":"4"}}}"#).unwrap();
        assert_eq!(record.id, "4");
    }

    #[test]
    fn test_decode_sequence_in_order() {
        let records: Vec<Record> = decode(br#"{"data":{"x":[{"id":"4"},{"id":"7"}]}}"#).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["4", "7"]);
    }

    #[test]
    fn test_root_key_is_not_interpreted() {
        let a: Record = decode(br#"{"data":{"userById":{"id":"1"}}}"#).unwrap();
        let b: Record = decode(br#"{"data":{"anythingElse":{"id":"1"}}}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_data_is_no_data_for_any_target() {
        let body = br#"{"other":{"x":{"id":"4"}}}"#;
        assert!(matches!(decode::<Record>(body), Err(DecodeError::NoData { .. })));
        assert!(matches!(decode::<Vec<Record>>(body), Err(DecodeError::NoData { .. })));
        assert!(matches!(decode::<Value>(body), Err(DecodeError::NoData { .. })));
    }

    #[test]
    fn test_empty_data_is_no_data() {
        assert!(matches!(decode::<Record>(br#"{"data":{}}"#), Err(DecodeError::NoData { .. })));
    }

    #[test]
    fn test_wrong_shapes_are_no_data() {
        for body in [
            &br#"{"data":null}"#[..],
            &br#"{"data":[{"id":"4"}]}"#[..],
            &br#"{"data":"x"}"#[..],
            &br#"[{"data":{"x":{"id":"4"}}}]"#[..],
            &b"42"[..],
        ] {
            assert!(
                matches!(decode::<Record>(body), Err(DecodeError::NoData { .. })),
                "body {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let result = decode::<Record>(br#"{"data":{"x":{"id":"#);
        assert!(matches!(
            result,
            Err(DecodeError::Malformed(MalformedBody::InvalidJson(_)))
        ));
    }

    #[test]
    fn test_multiple_roots_are_malformed() {
        let result = decode::<Record>(br#"{"data":{"a":{"id":"1"},"b":{"id":"2"}}}"#);
        match result {
            Err(DecodeError::Malformed(MalformedBody::MultipleRoots { keys })) => {
                assert_eq!(keys, ["a", "b"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_carries_operation() {
        let result = decode::<Record>(br#"{"data":{"userById":{"id":4}}}"#);
        match result {
            Err(DecodeError::TypeMismatch { operation, .. }) => assert_eq!(operation, "userById"),
            other => panic!("unexpected result: {other:?}"),
        }

        let result = decode::<Record>(br#"{"data":{"userById":{"name":"x"}}}"#);
        assert!(matches!(result, Err(DecodeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_server_errors_are_kept() {
        let body = json!({
            "data": null,
            "errors": [{
                "message": "User not found",
                "locations": [{"line": 1, "column": 1}],
                "path": ["userById", 0]
            }]
        });
        let err = decode::<Record>(body.to_string().as_bytes()).unwrap_err();
        let errors = err.server_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "User not found (at userById.[0])");
    }

    #[test]
    fn test_errors_alongside_data_still_decode() {
        let body = json!({
            "data": {"x": {"id": "4"}},
            "errors": [{"message": "partial"}]
        });
        let envelope = ResponseEnvelope::from_slice(body.to_string().as_bytes()).unwrap();
        assert!(envelope.has_errors());
        let record: Record = envelope.into_root().unwrap().decode().unwrap();
        assert_eq!(record.id, "4");
    }

    #[test]
    fn test_null_root_with_errors_is_no_data() {
        let body = json!({
            "data": {"userById": null},
            "errors": [{"message": "User not found"}]
        });
        let err = decode::<Option<Record>>(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(err.server_errors()[0].message, "User not found");
    }

    #[test]
    fn test_null_payload_decodes_into_option() {
        let user: Option<Record> = decode(br#"{"data":{"userById":null}}"#).unwrap();
        assert!(user.is_none());
    }
}
