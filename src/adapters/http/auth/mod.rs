//! HTTP adapter for authentication.
//!
//! Thin layer over the `AuthGateway` port: it turns sign-in results into a
//! session cookie and redirects. Session resolution for other routes lives in
//! `middleware::auth`.

pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod routes;

pub use cookies::{SessionCookies, DEFAULT_VERIFIER_COOKIE};
pub use dto::*;
pub use handlers::{AuthApiError, AuthAppState, CALLBACK_PATH, HOME_PATH, LOGIN_PATH};
pub use routes::{auth_router, auth_routes};
