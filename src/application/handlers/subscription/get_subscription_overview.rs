//! GetSubscriptionOverviewHandler - loads (or lazily creates) a user's
//! subscription for the dashboard and subscription pages.
//!
//! Page loads never fail because of the subscription: if the record cannot
//! be loaded or created, a default free view flagged `degraded` is returned.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::{
    catalog, SubscriptionError, SubscriptionFeatures, SubscriptionPlan, SubscriptionStatus,
    SubscriptionTier, UserSubscription,
};
use crate::ports::SubscriptionService;

/// Query to load a user's subscription overview.
#[derive(Debug, Clone)]
pub struct GetSubscriptionOverviewQuery {
    pub user_id: UserId,
}

/// Everything the subscription pages render.
#[derive(Debug, Clone)]
pub struct SubscriptionOverview {
    /// The stored record. `None` when degraded.
    pub subscription: Option<UserSubscription>,
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    /// Catalog entry for the record's plan, if the plan is still listed.
    pub plan: Option<&'static SubscriptionPlan>,
    pub features: SubscriptionFeatures,
    /// `None` for subscriptions that never expire.
    pub renews_at: Option<Timestamp>,
    pub cancel_at_period_end: bool,
    pub available_plans: Vec<&'static SubscriptionPlan>,
    /// Whether there is any other plan to switch to.
    pub can_change_plan: bool,
    /// True when the record could not be loaded and defaults are shown.
    pub degraded: bool,
}

impl SubscriptionOverview {
    fn from_record(subscription: UserSubscription) -> Self {
        let available_plans = catalog::list_available_plans();
        Self {
            tier: subscription.tier,
            status: subscription.status,
            plan: catalog::get_plan_by_id(&subscription.plan_id),
            features: subscription.tier.features(),
            renews_at: (!subscription.never_expires()).then_some(subscription.current_period_end),
            cancel_at_period_end: subscription.cancel_at_period_end,
            can_change_plan: available_plans.len() > 1,
            available_plans,
            subscription: Some(subscription),
            degraded: false,
        }
    }

    /// Free-tier defaults shown when the record is unavailable.
    pub fn default_free() -> Self {
        let plan = catalog::get_free_plan();
        let available_plans = catalog::list_available_plans();
        Self {
            subscription: None,
            tier: plan.tier,
            status: SubscriptionStatus::Active,
            plan: Some(plan),
            features: plan.features,
            renews_at: None,
            cancel_at_period_end: false,
            can_change_plan: available_plans.len() > 1,
            available_plans,
            degraded: true,
        }
    }
}

pub struct GetSubscriptionOverviewHandler {
    service: Arc<dyn SubscriptionService>,
}

impl GetSubscriptionOverviewHandler {
    pub fn new(service: Arc<dyn SubscriptionService>) -> Self {
        Self { service }
    }

    pub async fn handle(&self, query: GetSubscriptionOverviewQuery) -> SubscriptionOverview {
        match self.load_or_create(&query.user_id).await {
            Some(subscription) => SubscriptionOverview::from_record(subscription),
            None => {
                tracing::warn!(user_id = %query.user_id, "Showing default free subscription");
                SubscriptionOverview::default_free()
            }
        }
    }

    async fn load_or_create(&self, user_id: &UserId) -> Option<UserSubscription> {
        if let Some(existing) = self.service.get_user_subscription(user_id).await {
            return Some(existing);
        }

        match self.service.create_free_subscription(user_id).await {
            Ok(created) => Some(created),
            // Another request created it first.
            Err(SubscriptionError::AlreadyExists(_)) => {
                self.service.get_user_subscription(user_id).await
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Lazy subscription creation failed");
                None
            }
        }
    }
}
