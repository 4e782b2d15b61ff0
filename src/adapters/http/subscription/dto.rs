//! Data Transfer Objects for subscription HTTP endpoints.
//!
//! Field names are camelCase to match the stored record's JSON form.

use serde::Serialize;

use crate::application::{AccountSummary, Dashboard, SubscriptionOverview};
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{
    BillingInterval, SubscriptionFeatures, SubscriptionPlan, SubscriptionStatus,
    SubscriptionTier, UserSubscription,
};

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A catalog plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tier: SubscriptionTier,
    /// Price in cents.
    pub price: u32,
    /// e.g. "$19.00/month" or "Free".
    pub formatted_price: String,
    pub interval: BillingInterval,
    pub features: SubscriptionFeatures,
    pub is_available: bool,
    pub is_popular: bool,
}

impl From<&SubscriptionPlan> for PlanResponse {
    fn from(plan: &SubscriptionPlan) -> Self {
        Self {
            id: plan.id.to_string(),
            name: plan.name.to_string(),
            description: plan.description.to_string(),
            tier: plan.tier,
            price: plan.price,
            formatted_price: plan.formatted_price(),
            interval: plan.interval,
            features: plan.features,
            is_available: plan.is_available,
            is_popular: plan.is_popular,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanResponse>,
}

impl PlansResponse {
    pub fn from_plans<'a>(plans: impl IntoIterator<Item = &'a SubscriptionPlan>) -> Self {
        Self {
            plans: plans.into_iter().map(PlanResponse::from).collect(),
        }
    }
}

/// Full subscription page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOverviewResponse {
    pub subscription: Option<UserSubscription>,
    pub tier: SubscriptionTier,
    pub tier_name: String,
    pub status: SubscriptionStatus,
    pub plan: Option<PlanResponse>,
    pub features: SubscriptionFeatures,
    pub renews_at: Option<Timestamp>,
    pub cancel_at_period_end: bool,
    pub available_plans: Vec<PlanResponse>,
    pub can_change_plan: bool,
    pub degraded: bool,
}

impl From<SubscriptionOverview> for SubscriptionOverviewResponse {
    fn from(overview: SubscriptionOverview) -> Self {
        Self {
            tier_name: overview.tier.display_name().to_string(),
            tier: overview.tier,
            status: overview.status,
            plan: overview.plan.map(PlanResponse::from),
            features: overview.features,
            renews_at: overview.renews_at,
            cancel_at_period_end: overview.cancel_at_period_end,
            available_plans: overview
                .available_plans
                .iter()
                .copied()
                .map(PlanResponse::from)
                .collect(),
            can_change_plan: overview.can_change_plan,
            degraded: overview.degraded,
            subscription: overview.subscription,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub email: String,
    pub display_name: String,
    pub short_id: String,
    pub last_sign_in_at: Option<Timestamp>,
}

impl From<AccountSummary> for AccountResponse {
    fn from(account: AccountSummary) -> Self {
        Self {
            email: account.email,
            display_name: account.display_name,
            short_id: account.short_id,
            last_sign_in_at: account.last_sign_in_at,
        }
    }
}

/// Subscription card on the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummaryResponse {
    pub tier: SubscriptionTier,
    pub tier_name: String,
    pub status: SubscriptionStatus,
    pub features: SubscriptionFeatures,
    pub can_upgrade: bool,
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub account: AccountResponse,
    pub subscription: SubscriptionSummaryResponse,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        let overview = dashboard.subscription;
        Self {
            account: AccountResponse::from(dashboard.account),
            subscription: SubscriptionSummaryResponse {
                tier: overview.tier,
                tier_name: overview.tier.display_name().to_string(),
                status: overview.status,
                features: overview.features,
                can_upgrade: dashboard.show_upgrade,
                degraded: overview.degraded,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::catalog;

    #[test]
    fn plan_response_serializes_camel_case() {
        let plan = catalog::get_free_plan();
        let json = serde_json::to_value(PlanResponse::from(plan)).unwrap();

        assert_eq!(json["id"], "price_free_monthly");
        assert_eq!(json["formattedPrice"], "Free");
        assert_eq!(json["isAvailable"], true);
        assert_eq!(json["features"]["maxProjects"], 3);
    }

    #[test]
    fn degraded_overview_has_no_record() {
        let response = SubscriptionOverviewResponse::from(SubscriptionOverview::default_free());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["degraded"], true);
        assert!(json["subscription"].is_null());
        assert_eq!(json["tier"], "free");
        assert_eq!(json["tierName"], "Free");
    }
}
