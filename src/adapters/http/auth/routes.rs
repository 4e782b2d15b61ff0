//! Axum router configuration for auth endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    callback, get_session, login, request_magic_link, sign_out, start_oauth, AuthAppState,
};

/// Create the auth router.
///
/// # Routes
///
/// - `POST /auth/login` - Email/password sign-in
/// - `POST /auth/magic-link` - Request a magic link
/// - `GET /auth/oauth/:provider` - Start an OAuth sign-in
/// - `GET /auth/callback` - Finish a redirect-based sign-in
/// - `POST /auth/signout` - Sign out
/// - `GET /auth/session` - Current session
pub fn auth_routes() -> Router<AuthAppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/magic-link", post(request_magic_link))
        .route("/auth/oauth/:provider", get(start_oauth))
        .route("/auth/callback", get(callback))
        .route("/auth/signout", post(sign_out))
        .route("/auth/session", get(get_session))
}

/// Auth router with state applied.
pub fn auth_router(state: AuthAppState) -> Router {
    auth_routes().with_state(state)
}
