//! Classified failures for GraphQL calls.

use crate::error::NetworkError;

use super::envelope::GraphQLError;

/// Why a response body could not be treated as a GraphQL envelope at all.
#[derive(Debug, thiserror::Error)]
pub enum MalformedBody {
    /// The body is not valid JSON.
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// `data` holds more than one root entry, so the payload is ambiguous.
    #[error("expected a single root under `data`, found {}", .keys.join(", "))]
    MultipleRoots { keys: Vec<String> },
}

/// Errors produced while unwrapping and decoding a response envelope.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body is not a usable envelope.
    #[error("malformed response: {0}")]
    Malformed(#[from] MalformedBody),

    /// No payload nested under `data`.
    ///
    /// Any `errors` the server reported alongside are kept.
    #[error("no data in response{}", server_messages(.errors))]
    NoData { errors: Vec<GraphQLError> },

    /// The payload does not match the requested type.
    #[error("payload of `{operation}` does not match the expected type: {source}")]
    TypeMismatch {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    pub(crate) fn no_data() -> Self {
        Self::NoData { errors: Vec::new() }
    }

    /// Errors reported by the server, if the response carried any.
    pub fn server_errors(&self) -> &[GraphQLError] {
        match self {
            Self::NoData { errors } => errors,
            _ => &[],
        }
    }
}

fn server_messages(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        let joined = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        format!(" (server reported: {joined})")
    }
}

/// The closed set of outcomes a query can fail with.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// No credential is set; the request was never sent.
    #[error("not authenticated: no token has been provided")]
    NoToken,

    /// The request did not complete, or the server replied with a non-2xx status.
    #[error("transport failure: {0}")]
    Transport(#[from] NetworkError),

    /// The response could not be turned into the requested type.
    #[error("decode failure: {0}")]
    Decode(#[from] DecodeError),

    /// The operation has no backing template yet.
    #[error("`{operation}` is not implemented")]
    NotImplemented { operation: &'static str },

    /// A caller variable could not be serialized; the request was never sent.
    #[error("variable `{name}` could not be serialized: {message}")]
    InvalidVariable { name: String, message: String },
}

impl QueryError {
    /// Short machine-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoToken => "no_token",
            Self::Transport(_) => "transport",
            Self::Decode(DecodeError::Malformed(_)) => "decode.malformed",
            Self::Decode(DecodeError::NoData { .. }) => "decode.no_data",
            Self::Decode(DecodeError::TypeMismatch { .. }) => "decode.type_mismatch",
            Self::NotImplemented { .. } => "not_implemented",
            Self::InvalidVariable { .. } => "invalid_variable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_display_includes_server_messages() {
        let err = DecodeError::NoData {
            errors: vec![GraphQLError::new("not authorized"), GraphQLError::new("bad input")],
        };
        assert_eq!(
            err.to_string(),
            "no data in response (server reported: not authorized; bad input)"
        );
        assert_eq!(DecodeError::no_data().to_string(), "no data in response");
    }

    #[test]
    fn test_multiple_roots_display() {
        let err = MalformedBody::MultipleRoots {
            keys: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "expected a single root under `data`, found a, b");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(QueryError::NoToken.kind(), "no_token");
        assert_eq!(QueryError::from(NetworkError::Timeout).kind(), "transport");
        assert_eq!(QueryError::from(DecodeError::no_data()).kind(), "decode.no_data");
        assert_eq!(
            QueryError::NotImplemented { operation: "x" }.kind(),
            "not_implemented"
        );
        let invalid = QueryError::InvalidVariable {
            name: "input".into(),
            message: "key must be a string".into(),
        };
        assert_eq!(invalid.kind(), "invalid_variable");
        assert_eq!(
            invalid.to_string(),
            "variable `input` could not be serialized: key must be a string"
        );
    }
}
