//! HS256 access token validation.
//!
//! The auth server signs access tokens with the project JWT secret, so they
//! can be checked locally without a network round trip.
//!
//! # Security
//!
//! - Signature verified with the shared secret
//! - Audience must match (`authenticated` by default)
//! - Expiry enforced
//! - Issuer enforced when configured

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Settings for [`JwtSessionValidator`].
#[derive(Clone)]
pub struct JwtValidatorConfig {
    pub secret: Secret<String>,
    pub audience: String,
    pub issuer: Option<String>,
}

/// Claims carried by auth server access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AccessTokenClaims {
    pub sub: String,

    #[serde(default)]
    pub aud: Audience,

    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Validates auth server access tokens locally.
pub struct JwtSessionValidator {
    config: JwtValidatorConfig,
    key: DecodingKey,
}

impl JwtSessionValidator {
    pub fn new(config: JwtValidatorConfig) -> Self {
        let key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());
        Self { config, key }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        validation
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessTokenClaims>(token, &self.key, &self.validation()).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            },
        )?;
        let claims = data.claims;

        if !claims.aud.contains(&self.config.audience) {
            tracing::warn!(
                "Audience mismatch after validation: expected '{}', got '{:?}'",
                self.config.audience,
                claims.aud
            );
            return Err(AuthError::InvalidToken);
        }

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        let mut user = AuthenticatedUser::new(user_id, claims.email.unwrap_or_default());
        if let Some(name) = claims.user_metadata.and_then(|m| m.full_name.or(m.name)) {
            user = user.with_display_name(name);
        }
        Ok(user)
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("audience", &self.config.audience)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}
