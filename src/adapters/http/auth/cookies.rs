//! Session and PKCE verifier cookies.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Default name of the PKCE verifier cookie.
pub const DEFAULT_VERIFIER_COOKIE: &str = "smartscale-code-verifier";

/// Names and flags for the cookies the auth routes set.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    pub session_name: String,
    pub verifier_name: String,
    /// Mark cookies `Secure` (HTTPS only).
    pub secure: bool,
}

impl SessionCookies {
    pub fn new(session_name: impl Into<String>, secure: bool) -> Self {
        Self {
            session_name: session_name.into(),
            verifier_name: DEFAULT_VERIFIER_COOKIE.to_string(),
            secure,
        }
    }

    pub fn session(&self, access_token: impl Into<String>) -> Cookie<'static> {
        self.build(self.session_name.clone(), access_token.into())
    }

    pub fn verifier(&self, code_verifier: impl Into<String>) -> Cookie<'static> {
        self.build(self.verifier_name.clone(), code_verifier.into())
    }

    /// Removal cookie; path must match the one used when setting.
    pub fn removal(&self, name: &str) -> Cookie<'static> {
        Cookie::build(name.to_string()).path("/").build()
    }

    fn build(&self, name: String, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}
