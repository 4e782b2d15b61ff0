//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, auth types and error types that form the
//! vocabulary of the SmartScale domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthSession, AuthenticatedUser, OAuthProvider, OAuthRedirect};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{SubscriptionId, UserId};
pub use timestamp::Timestamp;
