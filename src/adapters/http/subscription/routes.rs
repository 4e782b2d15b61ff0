//! Axum router configuration for dashboard and subscription endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_dashboard, get_plan, get_subscription, list_plans, SubscriptionAppState};

/// Create the subscription router.
///
/// # Routes
///
/// ## Require a session
/// - `GET /dashboard` - Account summary and subscription card
/// - `GET /subscription` - Full subscription overview
///
/// ## Catalog (behind the route guard, no user needed)
/// - `GET /subscription/plans` - Available plans
/// - `GET /subscription/plans/:plan_id` - One plan
pub fn subscription_routes() -> Router<SubscriptionAppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/subscription", get(get_subscription))
        .route("/subscription/plans", get(list_plans))
        .route("/subscription/plans/:plan_id", get(get_plan))
}

/// Subscription router with state applied.
pub fn subscription_router(state: SubscriptionAppState) -> Router {
    subscription_routes().with_state(state)
}
