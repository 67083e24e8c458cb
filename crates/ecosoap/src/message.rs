//! Title and message pairs for showing a failed call to a person.

use std::fmt;

use ecosoap_net::graphql::{DecodeError, QueryError};

/// A short title plus a longer explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub title: String,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Fallback for failures with no better description, such as a request
    /// the app itself could not build.
    pub fn unknown() -> Self {
        Self::new(
            "An unknown error occurred.",
            "Please try again later. If the problem persists, contact us.",
        )
    }
}

impl From<&QueryError> for ErrorMessage {
    fn from(err: &QueryError) -> Self {
        match err {
            QueryError::NoToken => {
                Self::new("You're not signed in.", "Please log in and try again.")
            }
            QueryError::Transport(_) => Self::new(
                "Couldn't reach the server.",
                "Check your network connection and try again.",
            ),
            QueryError::Decode(DecodeError::NoData { errors }) if !errors.is_empty() => Self::new(
                "Unexpected response from the server.",
                format!(
                    "The server reported: {}. If the problem persists, contact us.",
                    errors[0].message
                ),
            ),
            QueryError::Decode(_) => Self::new(
                "Unexpected response from the server.",
                "Please try again later. If the problem persists, contact us.",
            ),
            QueryError::InvalidVariable { .. } => Self::unknown(),
            QueryError::NotImplemented { operation } => Self::new(
                "This feature isn't available yet.",
                format!("`{operation}` is not supported by this version of the app."),
            ),
        }
    }
}

impl From<QueryError> for ErrorMessage {
    fn from(err: QueryError) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.message)
    }
}
