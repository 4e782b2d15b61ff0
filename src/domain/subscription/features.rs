//! Tier-based feature limits.

use super::SubscriptionTier;
use serde::{Deserialize, Serialize};

/// Feature limits and flags granted by a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionFeatures {
    pub max_projects: u32,
    pub max_collaborators: u32,
    /// Storage quota in gigabytes.
    pub max_storage: u32,
    pub advanced_analytics: bool,
    pub priority_support: bool,
    pub custom_domain: bool,
    pub api_access: bool,
    pub white_labeling: bool,
}

impl SubscriptionFeatures {
    /// Get the features for a specific tier.
    ///
    /// | Tier | Projects | Collaborators | Storage (GB) | Analytics | Support | Domain | API | White label |
    /// |------|----------|---------------|--------------|-----------|---------|--------|-----|-------------|
    /// | Free | 3 | 1 | 5 | No | No | No | No | No |
    /// | Basic | 10 | 5 | 20 | No | No | No | Yes | No |
    /// | Pro | 50 | 20 | 100 | Yes | Yes | Yes | Yes | No |
    /// | Enterprise | 1000 | 100 | 500 | Yes | Yes | Yes | Yes | Yes |
    pub const fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Free => Self {
                max_projects: 3,
                max_collaborators: 1,
                max_storage: 5,
                advanced_analytics: false,
                priority_support: false,
                custom_domain: false,
                api_access: false,
                white_labeling: false,
            },
            SubscriptionTier::Basic => Self {
                max_projects: 10,
                max_collaborators: 5,
                max_storage: 20,
                advanced_analytics: false,
                priority_support: false,
                custom_domain: false,
                api_access: true,
                white_labeling: false,
            },
            SubscriptionTier::Pro => Self {
                max_projects: 50,
                max_collaborators: 20,
                max_storage: 100,
                advanced_analytics: true,
                priority_support: true,
                custom_domain: true,
                api_access: true,
                white_labeling: false,
            },
            SubscriptionTier::Enterprise => Self {
                max_projects: 1000,
                max_collaborators: 100,
                max_storage: 500,
                advanced_analytics: true,
                priority_support: true,
                custom_domain: true,
                api_access: true,
                white_labeling: true,
            },
        }
    }

    /// Check if the project limit has been reached.
    pub fn project_limit_reached(&self, current_projects: u32) -> bool {
        current_projects >= self.max_projects
    }

    /// Check if the collaborator limit has been reached.
    pub fn collaborator_limit_reached(&self, current_collaborators: u32) -> bool {
        current_collaborators >= self.max_collaborators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_features_match_table() {
        let f = SubscriptionFeatures::for_tier(SubscriptionTier::Free);
        assert_eq!((f.max_projects, f.max_collaborators, f.max_storage), (3, 1, 5));
        assert!(!f.advanced_analytics && !f.priority_support && !f.custom_domain);
        assert!(!f.api_access && !f.white_labeling);
    }

    #[test]
    fn basic_only_adds_api_access() {
        let f = SubscriptionFeatures::for_tier(SubscriptionTier::Basic);
        assert_eq!((f.max_projects, f.max_collaborators, f.max_storage), (10, 5, 20));
        assert!(f.api_access);
        assert!(!f.advanced_analytics && !f.priority_support && !f.custom_domain);
        assert!(!f.white_labeling);
    }

    #[test]
    fn pro_lacks_only_white_labeling() {
        let f = SubscriptionFeatures::for_tier(SubscriptionTier::Pro);
        assert_eq!((f.max_projects, f.max_collaborators, f.max_storage), (50, 20, 100));
        assert!(f.advanced_analytics && f.priority_support && f.custom_domain && f.api_access);
        assert!(!f.white_labeling);
    }

    #[test]
    fn enterprise_has_everything() {
        let f = SubscriptionFeatures::for_tier(SubscriptionTier::Enterprise);
        assert_eq!((f.max_projects, f.max_collaborators, f.max_storage), (1000, 100, 500));
        assert!(f.advanced_analytics && f.priority_support && f.custom_domain);
        assert!(f.api_access && f.white_labeling);
    }

    #[test]
    fn limits_never_shrink_with_rank() {
        for pair in SubscriptionTier::ALL.windows(2) {
            let lower = pair[0].features();
            let higher = pair[1].features();
            assert!(higher.max_projects > lower.max_projects);
            assert!(higher.max_collaborators > lower.max_collaborators);
            assert!(higher.max_storage > lower.max_storage);
        }
    }

    #[test]
    fn project_limit_is_inclusive() {
        let f = SubscriptionFeatures::for_tier(SubscriptionTier::Free);
        assert!(!f.project_limit_reached(2));
        assert!(f.project_limit_reached(3));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(SubscriptionTier::Free.features()).unwrap();
        assert_eq!(json["maxProjects"], 3);
        assert_eq!(json["whiteLabeling"], false);
    }
}
