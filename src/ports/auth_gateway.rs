//! Auth gateway port.
//!
//! Sign-in flows are delegated to a third-party auth server. This port is the
//! surface the HTTP layer needs from it; the server's own behaviour is out of
//! scope.
//!
//! Redirect-based flows (magic link, OAuth) return a PKCE code verifier that
//! the caller keeps until the callback exchanges the code for a session.

use async_trait::async_trait;

use crate::domain::foundation::{
    AuthError, AuthSession, AuthenticatedUser, OAuthProvider, OAuthRedirect,
};

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Email/password sign-in.
    ///
    /// Returns `AuthError::InvalidCredentials` when the pair is rejected.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Sends a magic link that lands on `redirect_url`.
    ///
    /// Returns the code verifier for the eventual callback.
    async fn sign_in_with_otp(&self, email: &str, redirect_url: &str)
        -> Result<String, AuthError>;

    /// Builds the provider authorization URL for a redirect-based sign-in.
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_url: &str,
    ) -> Result<OAuthRedirect, AuthError>;

    /// Exchanges a callback code for a session.
    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<AuthSession, AuthError>;

    /// Fetches the user behind an access token from the auth server.
    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Revokes the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
