//! HTTP handlers for sign-in, callback and sign-out.
//!
//! Redirect-based sign-ins (magic link, OAuth) store the PKCE code verifier
//! in a cookie; the callback reads it back when exchanging the code.

use std::sync::Arc;

use axum::extract::{Extension, Json, Path, Query, State};
use axum::http::{header::LOCATION, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::middleware::{OptionalAuth, SessionToken};
use crate::domain::foundation::{AuthError, AuthSession, OAuthProvider, ValidationError};
use crate::ports::AuthGateway;

use super::cookies::SessionCookies;
use super::dto::{CallbackQuery, LoginRequest, MagicLinkRequest, MagicLinkResponse, SessionResponse};

pub const CALLBACK_PATH: &str = "/auth/callback";
pub const LOGIN_PATH: &str = "/auth/login";
pub const HOME_PATH: &str = "/dashboard";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthAppState {
    pub gateway: Arc<dyn AuthGateway>,
    pub cookies: SessionCookies,
    /// Public base URL of this site, used to build the callback URL.
    pub site_url: String,
}

impl AuthAppState {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        cookies: SessionCookies,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            cookies,
            site_url: site_url.into(),
        }
    }

    pub fn callback_url(&self) -> String {
        format!("{}{}", self.site_url.trim_end_matches('/'), CALLBACK_PATH)
    }

    fn start_session(&self, jar: CookieJar, session: &AuthSession) -> CookieJar {
        jar.add(self.cookies.session(session.access_token.clone()))
            .remove(self.cookies.removal(&self.cookies.verifier_name))
    }
}

fn login_with_error(message: &str) -> String {
    format!("{}?error={}", LOGIN_PATH, urlencoding::encode(message))
}

// ════════════════════════════════════════════════════════════════════════════════
// Sign-in
// ════════════════════════════════════════════════════════════════════════════════

/// POST /auth/login - Email/password sign-in
pub async fn login(
    State(state): State<AuthAppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    request.validate()?;

    let session = state
        .gateway
        .sign_in_with_password(request.email.trim(), &request.password)
        .await?;

    tracing::info!(user_id = %session.user.id, "Password sign-in");
    Ok((state.start_session(jar, &session), Redirect::to(HOME_PATH)))
}

/// POST /auth/magic-link - Email a one-time sign-in link
pub async fn request_magic_link(
    State(state): State<AuthAppState>,
    jar: CookieJar,
    Json(request): Json<MagicLinkRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    request.validate()?;
    let email = request.email.trim().to_string();

    let verifier = state
        .gateway
        .sign_in_with_otp(&email, &state.callback_url())
        .await?;

    let body = MagicLinkResponse {
        message: "Check your email for the sign-in link".to_string(),
        email,
    };
    Ok((
        jar.add(state.cookies.verifier(verifier)),
        (StatusCode::ACCEPTED, Json(body)),
    ))
}

/// GET /auth/oauth/:provider - Redirect to a third-party provider
pub async fn start_oauth(
    State(state): State<AuthAppState>,
    jar: CookieJar,
    Path(provider): Path<String>,
) -> Result<impl IntoResponse, AuthApiError> {
    let provider: OAuthProvider = provider.parse()?;

    let redirect = state
        .gateway
        .sign_in_with_oauth(provider, &state.callback_url())
        .await?;

    Ok((
        jar.add(state.cookies.verifier(redirect.code_verifier)),
        Redirect::to(&redirect.url),
    ))
}

/// GET /auth/callback - Finish a magic link or OAuth sign-in
///
/// Never fails with an error page; every outcome is a redirect.
pub async fn callback(
    State(state): State<AuthAppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Response {
    if let Some(error) = query.error {
        let message = query
            .error_description
            .unwrap_or_else(|| "Authentication failed".to_string());
        tracing::warn!(error = %error, "Auth callback returned an error");
        return Redirect::temporary(&login_with_error(&message)).into_response();
    }

    let Some(code) = query.code else {
        return Redirect::temporary(LOGIN_PATH).into_response();
    };

    let verifier = jar
        .get(&state.cookies.verifier_name)
        .map(|c| c.value().to_string());

    match state
        .gateway
        .exchange_code_for_session(&code, verifier.as_deref())
        .await
    {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id, "Callback sign-in");
            (
                state.start_session(jar, &session),
                Redirect::temporary(HOME_PATH),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Code exchange failed");
            Redirect::temporary(&format!("{}?error=Authentication+failed", LOGIN_PATH))
                .into_response()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════════

/// POST /auth/signout - Revoke the session and clear cookies
pub async fn sign_out(
    State(state): State<AuthAppState>,
    jar: CookieJar,
    token: Option<Extension<SessionToken>>,
) -> Response {
    if let Some(Extension(SessionToken(token))) = token {
        if let Err(e) = state.gateway.sign_out(&token).await {
            tracing::warn!(error = %e, "Sign-out at the auth server failed");
        }
    }

    let jar = jar
        .remove(state.cookies.removal(&state.cookies.session_name))
        .remove(state.cookies.removal(&state.cookies.verifier_name));

    (jar, (StatusCode::FOUND, [(LOCATION, LOGIN_PATH)])).into_response()
}

/// GET /auth/session - Who is signed in on this request
pub async fn get_session(OptionalAuth(user): OptionalAuth) -> Json<SessionResponse> {
    Json(SessionResponse::from(user))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for auth endpoints.
#[derive(Debug)]
pub enum AuthApiError {
    Auth(AuthError),
    Validation(ValidationError),
}

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<ValidationError> for AuthApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            AuthApiError::Auth(err) => match err {
                AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
                AuthError::InvalidToken | AuthError::TokenExpired => {
                    (StatusCode::UNAUTHORIZED, "AUTH_ERROR")
                }
                AuthError::CodeExchangeFailed(_) => (StatusCode::BAD_REQUEST, "CODE_EXCHANGE_FAILED"),
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!("Auth service unavailable: {}", msg);
                    (StatusCode::SERVICE_UNAVAILABLE, "AUTH_UNAVAILABLE")
                }
            },
        };

        let message = match &self {
            AuthApiError::Validation(err) => err.to_string(),
            AuthApiError::Auth(AuthError::ServiceUnavailable(_)) => {
                "Authentication service unavailable".to_string()
            }
            AuthApiError::Auth(err) => err.to_string(),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
