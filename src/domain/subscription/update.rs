//! Partial update of a subscription record.

use serde::{Deserialize, Serialize};

use super::{catalog, SubscriptionStatus, SubscriptionTier};
use crate::domain::foundation::{Timestamp, ValidationError};

/// Fields of a subscription record that callers may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionField {
    PlanId,
    Tier,
    Status,
    CurrentPeriodStart,
    CurrentPeriodEnd,
    CancelAtPeriodEnd,
}

impl SubscriptionField {
    /// Public (camelCase) field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionField::PlanId => "planId",
            SubscriptionField::Tier => "tier",
            SubscriptionField::Status => "status",
            SubscriptionField::CurrentPeriodStart => "currentPeriodStart",
            SubscriptionField::CurrentPeriodEnd => "currentPeriodEnd",
            SubscriptionField::CancelAtPeriodEnd => "cancelAtPeriodEnd",
        }
    }
}

/// A partial update. `None` fields are left untouched.
///
/// `updated_at` is not part of the update; it is always set by whoever
/// applies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<SubscriptionTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period_start: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
}

impl SubscriptionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan_id(mut self, plan_id: impl Into<String>) -> Self {
        self.plan_id = Some(plan_id.into());
        self
    }

    pub fn tier(mut self, tier: SubscriptionTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn current_period(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.current_period_start = Some(start);
        self.current_period_end = Some(end);
        self
    }

    pub fn cancel_at_period_end(mut self, cancel: bool) -> Self {
        self.cancel_at_period_end = Some(cancel);
        self
    }

    /// Fields this update will change, in declaration order.
    pub fn changed_fields(&self) -> Vec<SubscriptionField> {
        let mut fields = Vec::new();
        if self.plan_id.is_some() {
            fields.push(SubscriptionField::PlanId);
        }
        if self.tier.is_some() {
            fields.push(SubscriptionField::Tier);
        }
        if self.status.is_some() {
            fields.push(SubscriptionField::Status);
        }
        if self.current_period_start.is_some() {
            fields.push(SubscriptionField::CurrentPeriodStart);
        }
        if self.current_period_end.is_some() {
            fields.push(SubscriptionField::CurrentPeriodEnd);
        }
        if self.cancel_at_period_end.is_some() {
            fields.push(SubscriptionField::CancelAtPeriodEnd);
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Rejects updates that would leave the record's plan and tier out of
    /// step: an unknown plan, a plan or tier changed on its own, or a tier
    /// that is not the plan's tier.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.plan_id, self.tier) {
            (None, None) => {}
            (Some(plan_id), tier) => {
                let plan = catalog::get_plan_by_id(plan_id)
                    .ok_or_else(|| ValidationError::unknown_value("planId", plan_id.as_str()))?;
                if tier != Some(plan.tier) {
                    return Err(ValidationError::invalid_format(
                        "tier",
                        format!("plan {} requires tier {}", plan.id, plan.tier.as_str()),
                    ));
                }
            }
            (None, Some(_)) => {
                return Err(ValidationError::invalid_format(
                    "planId",
                    "tier changes must name the new plan",
                ));
            }
        }
        if let (Some(start), Some(end)) = (self.current_period_start, self.current_period_end) {
            if end.is_before(&start) {
                return Err(ValidationError::invalid_format(
                    "currentPeriodEnd",
                    "period end precedes period start",
                ));
            }
        }
        Ok(())
    }
}
