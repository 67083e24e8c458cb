//! Query descriptors and the request envelope put on the wire.

use std::borrow::Cow;

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::targets;

/// Variable key under which the credential is always sent.
pub const TOKEN_KEY: &str = "token";

/// A GraphQL operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationType {
    /// A query operation (read-only).
    #[default]
    Query,
    /// A mutation operation (modifies data).
    Mutation,
}

impl OperationType {
    /// Infer the operation type from a document's leading keyword.
    pub fn infer(document: &str) -> Self {
        if document.trim_start().starts_with("mutation") {
            Self::Mutation
        } else {
            Self::Query
        }
    }

    /// Lowercase keyword, as written in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// A template plus the caller's variables for a single call.
///
/// # Example
///
/// ```ignore
/// let descriptor = QueryDescriptor::new("query($input: UserByIdInput) { ... }")
///     .operation_name("userById")
///     .variable("input", serde_json::json!({ "userId": "4" }));
/// ```
#[derive(Debug, Clone)]
pub struct QueryDescriptor {
    template: Cow<'static, str>,
    variables: Map<String, Value>,
    operation_name: Option<Cow<'static, str>>,
    operation_type: OperationType,
    rejected: Option<RejectedVariable>,
}

/// A variable that could not be represented as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedVariable {
    pub name: String,
    pub message: String,
}

impl QueryDescriptor {
    /// Create a descriptor for `template` with no variables.
    ///
    /// The operation type is inferred from the template.
    pub fn new(template: impl Into<Cow<'static, str>>) -> Self {
        let template = template.into();
        let operation_type = OperationType::infer(&template);
        Self {
            template,
            variables: Map::new(),
            operation_name: None,
            operation_type,
            rejected: None,
        }
    }

    /// Set a variable value.
    ///
    /// A value that cannot be represented as JSON poisons the descriptor: the
    /// query client refuses to send it and reports
    /// [`QueryError::InvalidVariable`](super::QueryError::InvalidVariable).
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.variables.insert(name, value);
            }
            Err(e) => {
                tracing::error!(
                    target: targets::GRAPHQL,
                    variable = %name,
                    "Failed to serialize variable: {}",
                    e
                );
                if self.rejected.is_none() {
                    self.rejected = Some(RejectedVariable {
                        name,
                        message: e.to_string(),
                    });
                }
            }
        }
        self
    }

    /// Merge a whole map of variables, replacing entries with the same name.
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables.extend(variables);
        self
    }

    /// Set the operation name, used to label log output.
    pub fn operation_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// The template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The caller-supplied variables, without the token.
    pub fn variables_map(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// The operation name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Get the operation type.
    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    /// The first variable that failed to serialize, if any.
    pub fn rejected_variable(&self) -> Option<&RejectedVariable> {
        self.rejected.as_ref()
    }
}

/// The wire body: `{"query": ..., "variables": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    /// The template text.
    pub query: String,
    /// Token plus caller variables.
    pub variables: Map<String, Value>,
}

impl RequestEnvelope {
    /// Build the envelope for `descriptor`, injecting `token`.
    ///
    /// Caller variables are laid over `{"token": token}`. Callers must not
    /// use the reserved `token` key; doing so trips a debug assertion, and in
    /// release builds the caller's value wins.
    pub fn new(token: &str, descriptor: &QueryDescriptor) -> Self {
        debug_assert!(
            !descriptor.variables.contains_key(TOKEN_KEY),
            "`{TOKEN_KEY}` is a reserved variable name"
        );

        let mut variables = Map::with_capacity(descriptor.variables.len() + 1);
        variables.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        for (name, value) in &descriptor.variables {
            variables.insert(name.clone(), value.clone());
        }

        Self {
            query: descriptor.template.to_string(),
            variables,
        }
    }

    /// The envelope as a JSON value.
    pub fn to_value(&self) -> Value {
        let mut body = Map::with_capacity(2);
        body.insert("query".to_string(), Value::String(self.query.clone()));
        body.insert("variables".to_string(), Value::Object(self.variables.clone()));
        Value::Object(body)
    }

    /// Serialize to the bytes sent as the request body.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.to_value().to_string())
    }
}
