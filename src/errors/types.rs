//! # Error Types
//!
//! Error types for route synthesis using `thiserror`.

/// Custom result type for routeplane operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for routeplane
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No endpoint could be resolved for an operation and endpoint type
    #[error("invalid endpoint specified")]
    InvalidEndpoint {
        /// Operation target the rule was being built for
        operation: String,
        /// Endpoint type that was requested
        endpoint_type: String,
    },

    /// Operation policy whose name or parameters are not understood
    #[error("Invalid operation policy '{policy}': {message}")]
    InvalidPolicy { policy: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        context: String,
    },
}

impl Error {
    /// Create an invalid endpoint error for an operation
    pub fn invalid_endpoint<O: Into<String>, E: Into<String>>(operation: O, endpoint_type: E) -> Self {
        Self::InvalidEndpoint { operation: operation.into(), endpoint_type: endpoint_type.into() }
    }

    /// Create an invalid policy error
    pub fn invalid_policy<P: Into<String>, M: Into<String>>(policy: P, message: M) -> Self {
        Self::InvalidPolicy { policy: policy.into(), message: message.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Prefix the error context (only I/O and serialization errors carry one)
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        let context = context.into();
        match &mut self {
            Error::Io { context: ctx, .. } | Error::Serialization { context: ctx, .. } => {
                *ctx = format!("{}: {}", context, ctx);
            }
            _ => {}
        }
        self
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io { source: error, context: "I/O operation failed".to_string() }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            source: Box::new(error),
            context: "JSON serialization failed".to_string(),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Serialization {
            source: Box::new(error),
            context: "YAML serialization failed".to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(format!("Validation failed: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_endpoint_message_is_short() {
        let error = Error::invalid_endpoint("/employees", "production");
        assert_eq!(error.to_string(), "invalid endpoint specified");
        if let Error::InvalidEndpoint { operation, endpoint_type } = error {
            assert_eq!(operation, "/employees");
            assert_eq!(endpoint_type, "production");
        } else {
            panic!("Expected InvalidEndpoint");
        }
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation_field("Gateway name cannot be empty", "gateway.name");
        assert!(matches!(error, Error::Validation { .. }));
        if let Error::Validation { field, .. } = error {
            assert_eq!(field, Some("gateway.name".to_string()));
        }
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io { .. }));

        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Serialization { .. }));

        let yaml_error = serde_yaml::from_str::<Vec<String>>("key: value").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(matches!(error, Error::Serialization { .. }));
    }

    #[test]
    fn context_is_prefixed() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = Error::from(io_error).with_context("Reading contract 'api.yaml'");
        assert_eq!(error.to_string(), "I/O error: Reading contract 'api.yaml': I/O operation failed");
    }
}
