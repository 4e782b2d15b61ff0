//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | AlreadyExists | 409 |
//! | ValidationFailed | 400 |
//! | Unavailable | 503 |

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, UserId, ValidationError};

/// Errors raised by the subscription service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// No record with this id.
    NotFound(SubscriptionId),

    /// The user already has a record.
    AlreadyExists(UserId),

    /// The update is malformed or points at an unknown plan.
    ValidationFailed { field: String, message: String },

    /// The backing store could not be reached.
    Unavailable(String),
}

impl SubscriptionError {
    pub fn not_found(id: SubscriptionId) -> Self {
        SubscriptionError::NotFound(id)
    }

    pub fn already_exists(user_id: UserId) -> Self {
        SubscriptionError::AlreadyExists(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        SubscriptionError::Unavailable(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::NotFound(_) => ErrorCode::SubscriptionNotFound,
            SubscriptionError::AlreadyExists(_) => ErrorCode::SubscriptionExists,
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::Unavailable(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::NotFound(id) => format!("Subscription not found: {}", id),
            SubscriptionError::AlreadyExists(user_id) => {
                format!("User {} already has a subscription", user_id)
            }
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SubscriptionError::Unavailable(msg) => {
                format!("Subscription store unavailable: {}", msg)
            }
        }
    }

    /// True when a fallback store may be tried.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SubscriptionError::Unavailable(_))
    }

    /// Translates a store error raised while working on a known record or user.
    pub fn from_store(err: DomainError, id: Option<SubscriptionId>, user_id: Option<UserId>) -> Self {
        match (err.code, id, user_id) {
            (ErrorCode::SubscriptionNotFound, Some(id), _) => SubscriptionError::NotFound(id),
            (ErrorCode::SubscriptionExists, _, Some(user_id)) => {
                SubscriptionError::AlreadyExists(user_id)
            }
            (ErrorCode::ValidationFailed, _, _) => SubscriptionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SubscriptionError::Unavailable(err.to_string()),
        }
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<ValidationError> for SubscriptionError {
    fn from(err: ValidationError) -> Self {
        SubscriptionError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap()
    }

    #[test]
    fn codes_match_variants() {
        assert_eq!(
            SubscriptionError::not_found(SubscriptionId::new()).code(),
            ErrorCode::SubscriptionNotFound
        );
        assert_eq!(
            SubscriptionError::already_exists(user()).code(),
            ErrorCode::SubscriptionExists
        );
        assert_eq!(
            SubscriptionError::unavailable("down").code(),
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn from_store_maps_not_found_to_known_id() {
        let id = SubscriptionId::new();
        let err = SubscriptionError::from_store(
            DomainError::new(ErrorCode::SubscriptionNotFound, "missing"),
            Some(id),
            None,
        );
        assert_eq!(err, SubscriptionError::NotFound(id));
    }

    #[test]
    fn from_store_maps_conflict_to_user() {
        let err = SubscriptionError::from_store(
            DomainError::new(ErrorCode::SubscriptionExists, "duplicate"),
            None,
            Some(user()),
        );
        assert_eq!(err, SubscriptionError::AlreadyExists(user()));
    }

    #[test]
    fn from_store_treats_database_errors_as_unavailable() {
        let err = SubscriptionError::from_store(DomainError::database("refused"), None, None);
        assert!(err.is_unavailable());
        assert_eq!(err.to_string(), "Subscription store unavailable: [DATABASE_ERROR] refused");
    }

    #[test]
    fn validation_error_keeps_field() {
        let err: SubscriptionError = ValidationError::unknown_value("planId", "x").into();
        match err {
            SubscriptionError::ValidationFailed { field, .. } => assert_eq!(field, "planId"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
