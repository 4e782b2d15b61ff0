//! Static plan catalog.
//!
//! The catalog is fixed at compile time. Only the free monthly plan is
//! currently offered; paid plans are listed so the UI can preview them.

use super::{BillingInterval, SubscriptionPlan, SubscriptionTier};

use BillingInterval::{Monthly, Yearly};
use SubscriptionTier::{Basic, Enterprise, Free, Pro};

/// Id of the plan every new user starts on.
pub const FREE_PLAN_ID: &str = "price_free_monthly";

static PLANS: [SubscriptionPlan; 7] = [
    SubscriptionPlan::new(
        FREE_PLAN_ID,
        "Freemium",
        "Basic features for personal use",
        Free,
        0,
        Monthly,
    )
    .available(),
    SubscriptionPlan::new(
        "price_basic_monthly",
        "Basic",
        "Essential features for small teams",
        Basic,
        1900,
        Monthly,
    ),
    SubscriptionPlan::new(
        "price_pro_monthly",
        "Professional",
        "Advanced features for growing businesses",
        Pro,
        4900,
        Monthly,
    )
    .popular(),
    SubscriptionPlan::new(
        "price_enterprise_monthly",
        "Enterprise",
        "Complete solution for large organizations",
        Enterprise,
        9900,
        Monthly,
    ),
    SubscriptionPlan::new(
        "price_basic_yearly",
        "Basic",
        "Essential features for small teams",
        Basic,
        19000,
        Yearly,
    ),
    SubscriptionPlan::new(
        "price_pro_yearly",
        "Professional",
        "Advanced features for growing businesses",
        Pro,
        49000,
        Yearly,
    ),
    SubscriptionPlan::new(
        "price_enterprise_yearly",
        "Enterprise",
        "Complete solution for large organizations",
        Enterprise,
        99000,
        Yearly,
    ),
];

/// Every plan in the catalog, available or not.
pub fn all_plans() -> &'static [SubscriptionPlan] {
    &PLANS
}

/// Plans a user can currently select.
pub fn list_available_plans() -> Vec<&'static SubscriptionPlan> {
    PLANS.iter().filter(|p| p.is_available).collect()
}

/// Looks up a plan by id. Unknown ids yield `None`.
pub fn get_plan_by_id(id: &str) -> Option<&'static SubscriptionPlan> {
    PLANS.iter().find(|p| p.id == id)
}

/// The canonical free monthly plan.
pub fn get_free_plan() -> &'static SubscriptionPlan {
    &PLANS[0]
}

/// All billing intervals offered for a tier.
pub fn plans_for_tier(tier: SubscriptionTier) -> Vec<&'static SubscriptionPlan> {
    PLANS.iter().filter(|p| p.tier == tier).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn free_plan_is_canonical_entry() {
        let plan = get_free_plan();
        assert_eq!(plan.id, FREE_PLAN_ID);
        assert_eq!(plan.tier, Free);
        assert_eq!(plan.price, 0);
        assert_eq!(plan.interval, Monthly);
        assert!(plan.is_available);
    }

    #[test]
    fn only_free_plan_is_available() {
        let ids: Vec<&str> = list_available_plans().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![FREE_PLAN_ID]);
    }

    #[test]
    fn pro_monthly_is_the_only_popular_plan() {
        let popular: Vec<&str> = all_plans()
            .iter()
            .filter(|p| p.is_popular)
            .map(|p| p.id)
            .collect();
        assert_eq!(popular, vec!["price_pro_monthly"]);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<&str> = all_plans().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), all_plans().len());
    }

    #[test]
    fn every_plan_carries_its_tier_features() {
        for plan in all_plans() {
            assert_eq!(plan.features, plan.tier.features(), "plan {}", plan.id);
        }
    }

    #[test]
    fn reference_prices_in_cents() {
        let price = |id| get_plan_by_id(id).map(|p| p.price);
        assert_eq!(price("price_basic_monthly"), Some(1900));
        assert_eq!(price("price_pro_monthly"), Some(4900));
        assert_eq!(price("price_enterprise_monthly"), Some(9900));
        assert_eq!(price("price_basic_yearly"), Some(19000));
        assert_eq!(price("price_pro_yearly"), Some(49000));
        assert_eq!(price("price_enterprise_yearly"), Some(99000));
    }

    #[test]
    fn paid_tiers_offer_both_intervals() {
        for tier in [Basic, Pro, Enterprise] {
            let intervals: Vec<BillingInterval> =
                plans_for_tier(tier).iter().map(|p| p.interval).collect();
            assert_eq!(intervals, vec![Monthly, Yearly]);
        }
        assert_eq!(plans_for_tier(Free).len(), 1);
    }

    #[test]
    fn unknown_plan_is_none() {
        assert!(get_plan_by_id("price_platinum_monthly").is_none());
        assert!(get_plan_by_id("").is_none());
    }

    proptest! {
        #[test]
        fn lookup_finds_exactly_catalog_ids(id in "[a-z_]{0,30}") {
            let found = get_plan_by_id(&id);
            let in_catalog = all_plans().iter().any(|p| p.id == id);
            prop_assert_eq!(found.is_some(), in_catalog);
            if let Some(plan) = found {
                prop_assert_eq!(plan.id, id.as_str());
            }
        }

        #[test]
        fn lookup_by_catalog_index_round_trips(idx in 0usize..7) {
            let plan = &all_plans()[idx];
            prop_assert_eq!(get_plan_by_id(plan.id), Some(plan));
        }
    }
}
