//! HTTP handlers for dashboard and subscription endpoints.
//!
//! These handlers connect Axum routes to application layer query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    GetDashboardHandler, GetSubscriptionOverviewHandler, GetSubscriptionOverviewQuery,
};
use crate::domain::foundation::ErrorCode;
use crate::domain::subscription::catalog;
use crate::ports::SubscriptionService;

use super::dto::{DashboardResponse, PlanResponse, PlansResponse, SubscriptionOverviewResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SubscriptionAppState {
    pub subscription_service: Arc<dyn SubscriptionService>,
}

impl SubscriptionAppState {
    pub fn new(subscription_service: Arc<dyn SubscriptionService>) -> Self {
        Self {
            subscription_service,
        }
    }

    pub fn overview_handler(&self) -> GetSubscriptionOverviewHandler {
        GetSubscriptionOverviewHandler::new(self.subscription_service.clone())
    }

    pub fn dashboard_handler(&self) -> GetDashboardHandler {
        GetDashboardHandler::new(self.subscription_service.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /dashboard - Account summary and subscription card
pub async fn get_dashboard(
    State(state): State<SubscriptionAppState>,
    RequireAuth(user): RequireAuth,
) -> impl IntoResponse {
    let dashboard = state.dashboard_handler().handle(&user).await;
    Json(DashboardResponse::from(dashboard))
}

/// GET /subscription - Full subscription overview
pub async fn get_subscription(
    State(state): State<SubscriptionAppState>,
    RequireAuth(user): RequireAuth,
) -> impl IntoResponse {
    let overview = state
        .overview_handler()
        .handle(GetSubscriptionOverviewQuery { user_id: user.id })
        .await;
    Json(SubscriptionOverviewResponse::from(overview))
}

/// GET /subscription/plans - Plans open for sign-up
pub async fn list_plans() -> impl IntoResponse {
    Json(PlansResponse::from_plans(catalog::list_available_plans()))
}

/// GET /subscription/plans/:plan_id - One catalog entry
pub async fn get_plan(Path(plan_id): Path<String>) -> Result<impl IntoResponse, SubscriptionApiError> {
    catalog::get_plan_by_id(&plan_id)
        .map(|plan| Json(PlanResponse::from(plan)))
        .ok_or(SubscriptionApiError::PlanNotFound(plan_id))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error for subscription endpoints.
///
/// The page loads never fail (a degraded view is served instead), so only
/// catalog lookups produce errors here.
#[derive(Debug)]
pub enum SubscriptionApiError {
    PlanNotFound(String),
}

impl IntoResponse for SubscriptionApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            SubscriptionApiError::PlanNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorCode::PlanNotFound,
                format!("Plan not found: {}", id),
            ),
        };

        let body = ErrorResponse::new(code.to_string(), message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_plan_maps_to_404_with_code() {
        let response = SubscriptionApiError::PlanNotFound("price_nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], ErrorCode::PlanNotFound.to_string());
        assert_eq!(body["message"], "Plan not found: price_nope");
    }
}
