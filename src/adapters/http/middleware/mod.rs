//! HTTP middleware for axum.
//!
//! - `auth` - Session resolution and extractors
//! - `route_guard` - Session-presence redirects

pub mod auth;
pub mod route_guard;

pub use auth::{
    session_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth, SessionToken,
};
pub use route_guard::route_guard_middleware;
