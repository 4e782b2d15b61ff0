//! Priced plan offering.

use serde::Serialize;

use super::{BillingInterval, SubscriptionFeatures, SubscriptionTier};

/// A priced, billed offering tied to a tier and billing interval.
///
/// Plans are immutable catalog entries; see `catalog`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tier: SubscriptionTier,
    /// Price per interval in integer cents.
    pub price: u32,
    pub interval: BillingInterval,
    pub features: SubscriptionFeatures,
    pub is_available: bool,
    pub is_popular: bool,
}

impl SubscriptionPlan {
    pub(crate) const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        tier: SubscriptionTier,
        price: u32,
        interval: BillingInterval,
    ) -> Self {
        Self {
            id,
            name,
            description,
            tier,
            price,
            interval,
            features: tier.features(),
            is_available: false,
            is_popular: false,
        }
    }

    pub(crate) const fn available(mut self) -> Self {
        self.is_available = true;
        self
    }

    pub(crate) const fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }

    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// Human readable price, e.g. `$19.00/month` or `Free`.
    pub fn formatted_price(&self) -> String {
        if self.is_free() {
            return "Free".to_string();
        }
        let unit = match self.interval {
            BillingInterval::Monthly => "month",
            BillingInterval::Yearly => "year",
        };
        format!("${}.{:02}/{}", self.price / 100, self.price % 100, unit)
    }
}
