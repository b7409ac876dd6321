//! Domain-level error types.
//!
//! [`Error`] is transport agnostic: inbound adapters map it to HTTP responses.
//! [`ConfigurationError`] and [`StartupError`] are the two failure classes of
//! the decoration and security components; both convert into [`Error`] or
//! abort startup respectively.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::EntityType;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Error payload returned to adapters.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use hypermedia::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("unknown method");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation failures raised by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error; a blank message is replaced by the code's name.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(ErrorValidationError::EmptyMessage) => Self {
                code,
                message: format!("{code:?}"),
                details: None,
            },
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
        } = value;
        let mut error = Error::try_new(code, message)?;
        error.details = details;
        Ok(error)
    }
}

/// Deployment defect detected while decorating a response.
///
/// Not retryable: the same record type fails on every request until the
/// projection registry is fixed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The record's type has no `baseProjection` registered.
    #[error("could not return entity of type {entity_type}, since it has no base projection")]
    MissingBaseProjection {
        /// Runtime type of the offending record.
        entity_type: EntityType,
    },
}

impl From<ConfigurationError> for Error {
    fn from(value: ConfigurationError) -> Self {
        match &value {
            ConfigurationError::MissingBaseProjection { entity_type } => {
                Error::internal(value.to_string())
                    .with_details(serde_json::json!({ "entityType": entity_type }))
            }
        }
    }
}

/// Failure to assemble the security evaluator; aborts process start.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A security configuration was detected but no strict evaluator is
    /// registered in this build.
    #[error("security configuration detected but no strict security evaluator is available")]
    StrictImplementationMissing,
    /// The strict evaluator rejected the detected configuration.
    #[error("failed to construct strict security evaluator: {message}")]
    Construction {
        /// Reason reported by the constructor.
        message: String,
    },
    /// The access rules file could not be read.
    #[error("failed to read access rules at {path}: {source}")]
    RulesRead {
        /// Configured rules path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The access rules file is not valid JSON of the expected shape.
    #[error("failed to parse access rules at {path}: {source}")]
    RulesParse {
        /// Configured rules path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn blank_messages_are_rejected_by_try_new() {
        assert_eq!(
            Error::try_new(ErrorCode::NotFound, "   "),
            Err(ErrorValidationError::EmptyMessage)
        );
    }

    #[rstest]
    fn blank_messages_fall_back_to_code_name() {
        let err = Error::new(ErrorCode::NotFound, "");
        assert_eq!(err.message(), "NotFound");
    }

    #[rstest]
    fn configuration_error_names_the_entity_type() {
        let err = ConfigurationError::MissingBaseProjection {
            entity_type: EntityType::new("Book"),
        };
        assert_eq!(
            err.to_string(),
            "could not return entity of type Book, since it has no base projection"
        );

        let mapped = Error::from(err);
        assert_eq!(mapped.code(), ErrorCode::InternalError);
        assert_eq!(
            mapped.details(),
            Some(&serde_json::json!({ "entityType": "Book" }))
        );
    }

    #[rstest]
    fn error_round_trips_through_json() {
        let err = Error::forbidden("nope");
        let json = serde_json::to_string(&err).expect("serialise");
        let back: Error = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, err);
    }

    #[rstest]
    fn deserialising_blank_message_fails() {
        let result: Result<Error, _> =
            serde_json::from_str(r#"{"code":"not_found","message":" "}"#);
        assert!(result.is_err());
    }
}
