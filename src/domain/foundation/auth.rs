//! Authentication types for the domain layer.
//!
//! These types describe a signed-in user and the session handed back by the
//! auth server. They carry no provider dependencies; adapters behind the
//! `SessionValidator` and `AuthGateway` ports populate them.

use std::fmt;
use std::str::FromStr;

use super::{Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authenticated user resolved from a valid session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth server.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Display name if the provider supplied one.
    pub display_name: Option<String>,

    /// Last successful sign-in, when known.
    pub last_sign_in_at: Option<Timestamp>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: None,
            last_sign_in_at: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_last_sign_in(mut self, at: Timestamp) -> Self {
        self.last_sign_in_at = Some(at);
        self
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Session issued by the auth server after a successful sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    pub user: AuthenticatedUser,
}

/// Third-party identity providers offered on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Github,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Github => "github",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(OAuthProvider::Github),
            other => Err(ValidationError::unknown_value("provider", other)),
        }
    }
}

/// Where to send the browser to start a redirect-based sign-in.
///
/// `code_verifier` must be presented again when the callback's code is
/// exchanged for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthRedirect {
    pub url: String,
    pub code_verifier: String,
}

/// Authentication errors.
///
/// Domain-centric: they describe what went wrong from the application's
/// perspective, not the auth server's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Email/password pair rejected.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The authorization code could not be exchanged for a session.
    #[error("Code exchange failed: {0}")]
    CodeExchangeFailed(String),

    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::CodeExchangeFailed(_)
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
