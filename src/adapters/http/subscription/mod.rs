//! HTTP adapter for dashboard and subscription endpoints.
//!
//! - `GET /dashboard` - Account summary and subscription card
//! - `GET /subscription` - Subscription overview (creates the free record on first visit)
//! - `GET /subscription/plans` - Available plans
//! - `GET /subscription/plans/:plan_id` - One plan

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{SubscriptionApiError, SubscriptionAppState};
pub use routes::{subscription_router, subscription_routes};
