//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Which `AuthGateway` implementation to wire.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// GoTrue-compatible auth server over REST.
    #[default]
    Gotrue,
    /// In-process stand-in with a demo account. Never in production.
    Mock,
}

/// Auth server and session cookie settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub provider: AuthProvider,

    /// Auth server project URL
    #[serde(default)]
    pub base_url: String,

    /// Public API key sent with every auth server request
    #[serde(default)]
    pub anon_key: String,

    /// HS256 secret the auth server signs access tokens with
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,

    /// Expected `iss` claim, if any
    pub jwt_issuer: Option<String>,

    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Timeout for auth server calls in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AuthConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate authentication configuration
    ///
    /// The mock provider needs nothing but is refused in production.
    /// In production the auth server must be reached over HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let production = *environment == Environment::Production;

        if self.session_cookie.is_empty() {
            return Err(ValidationError::MissingRequired("SMARTSCALE__AUTH__SESSION_COOKIE"));
        }

        match self.provider {
            AuthProvider::Mock if production => Err(ValidationError::MockAuthInProduction),
            AuthProvider::Mock => Ok(()),
            AuthProvider::Gotrue => {
                if self.base_url.is_empty() {
                    return Err(ValidationError::MissingRequired("SMARTSCALE__AUTH__BASE_URL"));
                }
                if self.anon_key.is_empty() {
                    return Err(ValidationError::MissingRequired("SMARTSCALE__AUTH__ANON_KEY"));
                }
                if self.jwt_secret.is_empty() {
                    return Err(ValidationError::MissingRequired("SMARTSCALE__AUTH__JWT_SECRET"));
                }
                if production && !self.base_url.starts_with("https://") {
                    return Err(ValidationError::AuthUrlMustBeHttps);
                }
                Ok(())
            }
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProvider::default(),
            base_url: String::new(),
            anon_key: String::new(),
            jwt_secret: String::new(),
            jwt_audience: default_jwt_audience(),
            jwt_issuer: None,
            session_cookie: default_session_cookie(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

fn default_session_cookie() -> String {
    "smartscale-session".to_string()
}

fn default_timeout() -> u64 {
    10
}
