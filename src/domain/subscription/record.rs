//! Per-user subscription record.
//!
//! Each user has at most one record. It is created lazily on first visit to
//! the dashboard and never destroyed.

use serde::{Deserialize, Serialize};

use super::{catalog, SubscriptionStatus, SubscriptionTier, SubscriptionUpdate};
use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};

/// How long a free subscription's billing period lasts.
pub const FREE_PERIOD_YEARS: u32 = 100;

/// A user's subscription record.
///
/// # Invariants
///
/// - `user_id` is unique across records
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan_id: String,
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    pub current_period_start: Timestamp,
    pub current_period_end: Timestamp,
    pub cancel_at_period_end: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserSubscription {
    /// Builds the free subscription every user starts with.
    ///
    /// The period effectively never ends: it runs for `FREE_PERIOD_YEARS`.
    pub fn create_free(id: SubscriptionId, user_id: UserId, now: Timestamp) -> Self {
        let plan = catalog::get_free_plan();
        Self {
            id,
            user_id,
            plan_id: plan.id.to_string(),
            tier: plan.tier,
            status: SubscriptionStatus::Active,
            current_period_start: now,
            current_period_end: now.add_years(FREE_PERIOD_YEARS),
            cancel_at_period_end: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the provided fields and stamps `updated_at`.
    pub fn apply(&mut self, update: &SubscriptionUpdate, now: Timestamp) {
        if let Some(plan_id) = &update.plan_id {
            self.plan_id = plan_id.clone();
        }
        if let Some(tier) = update.tier {
            self.tier = tier;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(start) = update.current_period_start {
            self.current_period_start = start;
        }
        if let Some(end) = update.current_period_end {
            self.current_period_end = end;
        }
        if let Some(cancel) = update.cancel_at_period_end {
            self.cancel_at_period_end = cancel;
        }
        self.updated_at = now;
    }

    /// Free subscriptions have no renewal date worth showing.
    pub fn never_expires(&self) -> bool {
        self.tier == SubscriptionTier::Free
    }

    /// True when the status is exactly `active`.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
