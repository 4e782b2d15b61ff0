//! Access control for page routes.

mod route_guard;

pub use route_guard::{GuardDecision, RouteGuard};
