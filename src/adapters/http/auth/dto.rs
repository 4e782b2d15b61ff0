//! Data Transfer Objects for auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthenticatedUser, UserId, ValidationError};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MagicLinkRequest {
    pub email: String,
}

impl MagicLinkRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)
    }
}

/// Query string the auth server appends to the callback URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::invalid_format("email", "expected name@domain")),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicLinkResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<SessionUser>,
}

impl From<Option<AuthenticatedUser>> for SessionResponse {
    fn from(user: Option<AuthenticatedUser>) -> Self {
        Self {
            authenticated: user.is_some(),
            user: user.map(|u| SessionUser {
                id: u.id,
                email: u.email,
            }),
        }
    }
}
