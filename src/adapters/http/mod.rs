//! HTTP adapters - axum routes, middleware and the application router.

pub mod auth;
pub mod dto;
pub mod middleware;
pub mod router;
pub mod subscription;

pub use router::{build_app, build_router, health, AppComponents, HttpSettings};
