//! Subscription status values.
//!
//! Status is a data field written by whoever updates the record (usually a
//! billing integration). No transition rules are enforced here; statuses are
//! only classified.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Billing status of a subscription record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Trialing,
    Incomplete,
}

/// Coarse classification of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Active, trialing, or awaiting first payment.
    ActiveLike,
    /// Payment overdue.
    Degraded,
    /// Canceled.
    Terminal,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 5] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Canceled,
        SubscriptionStatus::PastDue,
        SubscriptionStatus::Trialing,
        SubscriptionStatus::Incomplete,
    ];

    pub fn standing(&self) -> Standing {
        match self {
            SubscriptionStatus::Active
            | SubscriptionStatus::Trialing
            | SubscriptionStatus::Incomplete => Standing::ActiveLike,
            SubscriptionStatus::PastDue => Standing::Degraded,
            SubscriptionStatus::Canceled => Standing::Terminal,
        }
    }

    /// Exactly `active`. Trialing does not count.
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::unknown_value("status", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standing_classification() {
        use SubscriptionStatus::*;
        assert_eq!(Active.standing(), Standing::ActiveLike);
        assert_eq!(Trialing.standing(), Standing::ActiveLike);
        assert_eq!(Incomplete.standing(), Standing::ActiveLike);
        assert_eq!(PastDue.standing(), Standing::Degraded);
        assert_eq!(Canceled.standing(), Standing::Terminal);
    }

    #[test]
    fn only_active_is_active() {
        let active: Vec<_> = SubscriptionStatus::ALL
            .into_iter()
            .filter(|s| s.is_active())
            .collect();
        assert_eq!(active, vec![SubscriptionStatus::Active]);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&SubscriptionStatus::PastDue).unwrap();
        assert_eq!(json, "\"past_due\"");
    }

    #[test]
    fn parses_storage_form() {
        for status in SubscriptionStatus::ALL {
            assert_eq!(status.as_str().parse::<SubscriptionStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<SubscriptionStatus>().is_err());
    }
}
