//! Mock authentication adapters.
//!
//! `MockSessionValidator` accepts a fixed set of tokens. `MockAuthGateway`
//! simulates an auth server in memory: it knows a few users, issues tokens
//! on sign-in and also validates the tokens it issued, so it can stand in for
//! both ports during local development.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_user("valid-token", AuthenticatedUser::new(user_id, "test@example.com"));
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{
    AuthError, AuthSession, AuthenticatedUser, OAuthProvider, OAuthRedirect, Timestamp, UserId,
};
use crate::ports::{AuthGateway, SessionValidator};

/// Code verifier handed out by `MockAuthGateway` for every redirect flow.
pub const MOCK_CODE_VERIFIER: &str = "mock-code-verifier";

/// Mock session validator for testing.
///
/// Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[derive(Debug, Default)]
struct GatewayState {
    /// email -> (password, user)
    accounts: HashMap<String, (String, AuthenticatedUser)>,
    /// pending callback codes
    codes: HashMap<String, AuthenticatedUser>,
    /// issued access tokens
    sessions: HashMap<String, AuthenticatedUser>,
    magic_links: Vec<(String, String)>,
    signed_out: Vec<String>,
    force_error: Option<AuthError>,
}

/// In-memory stand-in for the auth server.
#[derive(Debug, Default)]
pub struct MockAuthGateway {
    state: RwLock<GatewayState>,
}

impl MockAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an email/password account.
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        user: AuthenticatedUser,
    ) -> Self {
        self.write()
            .accounts
            .insert(email.into(), (password.into(), user));
        self
    }

    /// Registers a callback code that exchanges into a session for `user`.
    pub fn with_code(self, code: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.write().codes.insert(code.into(), user);
        self
    }

    /// Registers an already-issued access token.
    pub fn with_session(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.write().sessions.insert(token.into(), user);
        self
    }

    /// Forces every call to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        self.write().force_error = Some(error);
        self
    }

    /// `(email, redirect_url)` for every magic link requested.
    pub fn magic_links(&self) -> Vec<(String, String)> {
        self.read().magic_links.clone()
    }

    /// Tokens passed to `sign_out`, in order.
    pub fn signed_out(&self) -> Vec<String> {
        self.read().signed_out.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, GatewayState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, GatewayState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_error(&self) -> Result<(), AuthError> {
        match self.read().force_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn issue(&self, user: AuthenticatedUser) -> AuthSession {
        let user = user.with_last_sign_in(Timestamp::now());
        let token = format!("mock-{}", Uuid::new_v4());
        self.write().sessions.insert(token.clone(), user.clone());
        AuthSession {
            access_token: token,
            refresh_token: None,
            expires_in: 3600,
            user,
        }
    }

    /// A demo account for running the server without an auth server.
    pub fn with_demo_account(self) -> Self {
        let user = AuthenticatedUser::new(
            UserId::from_uuid(Uuid::from_u128(0x0f8f_ad5b_d9cb_469f_a165_7086_7728_950e)),
            "demo@smartscale.dev",
        )
        .with_display_name("Demo User");
        self.with_account("demo@smartscale.dev", "demo-password", user)
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        self.check_error()?;
        let user = match self.read().accounts.get(email) {
            Some((expected, user)) if expected == password => user.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        Ok(self.issue(user))
    }

    async fn sign_in_with_otp(
        &self,
        email: &str,
        redirect_url: &str,
    ) -> Result<String, AuthError> {
        self.check_error()?;
        self.write()
            .magic_links
            .push((email.to_string(), redirect_url.to_string()));
        Ok(MOCK_CODE_VERIFIER.to_string())
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_url: &str,
    ) -> Result<OAuthRedirect, AuthError> {
        self.check_error()?;
        Ok(OAuthRedirect {
            url: format!(
                "https://auth.mock/authorize?provider={}&redirect_to={}",
                provider,
                urlencoding::encode(redirect_url)
            ),
            code_verifier: MOCK_CODE_VERIFIER.to_string(),
        })
    }

    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        self.check_error()?;
        if code_verifier != Some(MOCK_CODE_VERIFIER) {
            return Err(AuthError::CodeExchangeFailed(
                "code verifier mismatch".to_string(),
            ));
        }
        let user = self
            .write()
            .codes
            .remove(code)
            .ok_or_else(|| AuthError::CodeExchangeFailed("unknown code".to_string()))?;
        Ok(self.issue(user))
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.check_error()?;
        self.read()
            .sessions
            .get(access_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.check_error()?;
        let mut state = self.write();
        state.sessions.remove(access_token);
        state.signed_out.push(access_token.to_string());
        Ok(())
    }
}

#[async_trait]
impl SessionValidator for MockAuthGateway {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.get_user(token).await
    }
}
