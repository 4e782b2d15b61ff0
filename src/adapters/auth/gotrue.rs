//! GoTrue-compatible auth server client.
//!
//! Implements the `AuthGateway` port against the REST API exposed under
//! `{base_url}/auth/v1`. Every request carries the project's anon key in the
//! `apikey` header. Redirect flows use PKCE with the S256 method.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;

use super::pkce::{PkcePair, CHALLENGE_METHOD};
use crate::domain::foundation::{
    AuthError, AuthSession, AuthenticatedUser, OAuthProvider, OAuthRedirect, Timestamp, UserId,
};
use crate::ports::AuthGateway;

/// Connection settings for the auth server.
#[derive(Clone)]
pub struct GoTrueConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    pub anon_key: Secret<String>,
    pub timeout: Duration,
}

impl GoTrueConfig {
    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url.trim_end_matches('/'), path)
    }
}

pub struct GoTrueAuthGateway {
    config: GoTrueConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
    user: UserResponse,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    last_sign_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    user_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

impl TryFrom<UserResponse> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(user: UserResponse) -> Result<Self, Self::Error> {
        let id = UserId::new(&user.id).map_err(|_| {
            tracing::warn!("Auth server returned invalid user id: {}", user.id);
            AuthError::InvalidToken
        })?;
        let mut out = AuthenticatedUser::new(id, user.email.unwrap_or_default());
        let name = user.user_metadata.as_ref().and_then(|m| {
            m.get("full_name")
                .or_else(|| m.get("name"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        });
        if let Some(name) = name {
            out = out.with_display_name(name);
        }
        if let Some(at) = user.last_sign_in_at {
            out = out.with_last_sign_in(Timestamp::from_datetime(at));
        }
        Ok(out)
    }
}

impl TryFrom<SessionResponse> for AuthSession {
    type Error = AuthError;

    fn try_from(session: SessionResponse) -> Result<Self, Self::Error> {
        Ok(AuthSession {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            user: session.user.try_into()?,
        })
    }
}

fn unavailable(e: reqwest::Error) -> AuthError {
    tracing::error!("Auth server request failed: {}", e);
    AuthError::service_unavailable(e.to_string())
}

impl GoTrueAuthGateway {
    pub fn new(config: GoTrueConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(unavailable)?;
        Ok(Self { config, http })
    }

    fn authorize_url(&self, provider: OAuthProvider, redirect_url: &str, challenge: &str) -> String {
        format!(
            "{}?provider={}&redirect_to={}&code_challenge={}&code_challenge_method={}",
            self.config.endpoint("authorize"),
            provider.as_str(),
            urlencoding::encode(redirect_url),
            challenge,
            CHALLENGE_METHOD
        )
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.config.endpoint(path))
            .header("apikey", self.config.anon_key.expose_secret())
    }

    /// Maps a non-success response to an error. 5xx is always
    /// `ServiceUnavailable`; 4xx becomes `client_error`.
    async fn error_from(response: reqwest::Response, client_error: fn(String) -> AuthError) -> AuthError {
        let status = response.status();
        let message = response
            .json::<ErrorResponse>()
            .await
            .unwrap_or_default()
            .into_message();
        if status.is_server_error() {
            tracing::error!("Auth server returned {}: {}", status, message);
            AuthError::service_unavailable(format!("{}: {}", status, message))
        } else {
            tracing::debug!("Auth server rejected request with {}: {}", status, message);
            client_error(message)
        }
    }

    async fn session_from(
        response: reqwest::Response,
        client_error: fn(String) -> AuthError,
    ) -> Result<AuthSession, AuthError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response, client_error).await);
        }
        let session: SessionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse auth session: {}", e);
            AuthError::service_unavailable(e.to_string())
        })?;
        session.try_into()
    }
}

#[async_trait]
impl AuthGateway for GoTrueAuthGateway {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .post("token?grant_type=password")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(unavailable)?;
        Self::session_from(response, |_| AuthError::InvalidCredentials).await
    }

    async fn sign_in_with_otp(
        &self,
        email: &str,
        redirect_url: &str,
    ) -> Result<String, AuthError> {
        let pkce = PkcePair::generate();
        let response = self
            .post(&format!("otp?redirect_to={}", urlencoding::encode(redirect_url)))
            .json(&json!({
                "email": email,
                "create_user": true,
                "code_challenge": pkce.challenge,
                "code_challenge_method": CHALLENGE_METHOD,
            }))
            .send()
            .await
            .map_err(unavailable)?;
        if !response.status().is_success() {
            return Err(Self::error_from(response, AuthError::ServiceUnavailable).await);
        }
        Ok(pkce.verifier)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_url: &str,
    ) -> Result<OAuthRedirect, AuthError> {
        let pkce = PkcePair::generate();
        Ok(OAuthRedirect {
            url: self.authorize_url(provider, redirect_url, &pkce.challenge),
            code_verifier: pkce.verifier,
        })
    }

    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        let verifier = code_verifier.ok_or_else(|| {
            AuthError::CodeExchangeFailed("missing code verifier".to_string())
        })?;
        let response = self
            .post("token?grant_type=pkce")
            .json(&json!({ "auth_code": code, "code_verifier": verifier }))
            .send()
            .await
            .map_err(unavailable)?;
        Self::session_from(response, AuthError::CodeExchangeFailed).await
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .http
            .get(self.config.endpoint("user"))
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(unavailable)?;
        if response.status() == StatusCode::UNAUTHORIZED || response.status() == StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidToken);
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response, |_| AuthError::InvalidToken).await);
        }
        let user: UserResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse auth user: {}", e);
            AuthError::service_unavailable(e.to_string())
        })?;
        user.try_into()
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .post("logout")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(unavailable)?;
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(Self::error_from(response, AuthError::ServiceUnavailable).await)
    }
}

impl std::fmt::Debug for GoTrueAuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoTrueAuthGateway")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
