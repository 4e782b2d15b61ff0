//! Session middleware and extractors for axum.
//!
//! This module provides:
//! - `session_middleware` - Layer that resolves the caller's session and injects the user
//! - `RequireAuth` - Extractor that requires authentication
//! - `OptionalAuth` - Extractor for optional authentication
//!
//! # Token sources
//!
//! API clients send `Authorization: Bearer <token>`. Browsers carry the same
//! access token in the session cookie set by `/auth/login` and
//! `/auth/callback`. A bad Bearer token is an error (401); a bad cookie just
//! means the request is anonymous, so the route guard can send the browser
//! back to the login page.
//!
//! ```text
//! Request → session_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                       route_guard_middleware / RequireAuth read it
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

use super::super::dto::ErrorResponse;

/// Session middleware state.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn SessionValidator>,
    /// Name of the cookie holding the access token.
    pub session_cookie: String,
}

impl AuthState {
    pub fn new(validator: Arc<dyn SessionValidator>, session_cookie: impl Into<String>) -> Self {
        Self {
            validator,
            session_cookie: session_cookie.into(),
        }
    }
}

/// Access token presented with the current request.
///
/// Inserted next to the `AuthenticatedUser` so sign-out can revoke it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

pub(crate) fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Resolves the session behind a Bearer token or the session cookie.
pub async fn session_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&request).map(str::to_string) {
        return match state.validator.validate(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                request.extensions_mut().insert(SessionToken(token));
                next.run(request).await
            }
            Err(e) => auth_error_response(&e),
        };
    }

    let cookie_token = CookieJar::from_headers(request.headers())
        .get(&state.session_cookie)
        .map(|c| c.value().to_string());

    if let Some(token) = cookie_token {
        match state.validator.validate(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                request.extensions_mut().insert(SessionToken(token));
            }
            Err(AuthError::ServiceUnavailable(msg)) => {
                tracing::error!(error = %msg, "Auth service unavailable, treating request as anonymous");
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session cookie");
            }
        }
    }

    next.run(request).await
}

fn auth_error_response(err: &AuthError) -> Response {
    let (status, message) = match err {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Auth service unavailable: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            )
        }
        _ => (StatusCode::UNAUTHORIZED, "Authentication failed"),
    };

    (status, Json(ErrorResponse::new("AUTH_ERROR", message))).into_response()
}

/// Extractor that requires authentication.
///
/// Returns 401 when the session middleware did not resolve a user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for optional authentication.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid session was presented.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
        };

        (status, Json(ErrorResponse::new("UNAUTHENTICATED", message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;
    use axum::body::Body;
    use axum::extract::FromRequestParts;
    use axum::http::Request as HttpRequest;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap(),
            "test@example.com",
        )
        .with_display_name("Test User")
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state = AuthState::new(Arc::new(validator), "smartscale-session");
        Router::new()
            .route(
                "/whoami",
                get(|OptionalAuth(user): OptionalAuth| async move {
                    user.map(|u| u.email).unwrap_or_else(|| "anonymous".to_string())
                }),
            )
            .layer(axum::middleware::from_fn_with_state(state, session_middleware))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn bearer_token_resolves_user() {
        let app = app(MockSessionValidator::new().with_user("valid-token", test_user()));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer valid-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "test@example.com");
    }

    #[tokio::test]
    async fn invalid_bearer_token_is_rejected() {
        let app = app(MockSessionValidator::new());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unavailable_validator_returns_503_for_bearer() {
        let app = app(
            MockSessionValidator::new()
                .with_error(AuthError::service_unavailable("auth server down")),
        );

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn session_cookie_resolves_user() {
        let app = app(MockSessionValidator::new().with_user("cookie-token", test_user()));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Cookie", "smartscale-session=cookie-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "test@example.com");
    }

    #[tokio::test]
    async fn invalid_cookie_is_treated_as_anonymous() {
        let app = app(MockSessionValidator::new());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Cookie", "smartscale-session=stale")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "anonymous");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());
        let (mut parts, _body) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        let request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
    }
}
