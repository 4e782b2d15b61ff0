//! GetDashboardHandler - account summary plus subscription overview.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::ports::SubscriptionService;

use super::{GetSubscriptionOverviewHandler, GetSubscriptionOverviewQuery, SubscriptionOverview};

/// Account fields shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub email: String,
    pub display_name: String,
    /// First eight characters of the user id followed by `...`.
    pub short_id: String,
    pub last_sign_in_at: Option<Timestamp>,
}

impl From<&AuthenticatedUser> for AccountSummary {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            email: user.email.clone(),
            display_name: user.display_name_or_email().to_string(),
            short_id: user.id.short(),
            last_sign_in_at: user.last_sign_in_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub account: AccountSummary,
    pub subscription: SubscriptionOverview,
    /// Show the upgrade prompt to free users.
    pub show_upgrade: bool,
}

pub struct GetDashboardHandler {
    overview: GetSubscriptionOverviewHandler,
}

impl GetDashboardHandler {
    pub fn new(service: Arc<dyn SubscriptionService>) -> Self {
        Self {
            overview: GetSubscriptionOverviewHandler::new(service),
        }
    }

    pub async fn handle(&self, user: &AuthenticatedUser) -> Dashboard {
        let subscription = self
            .overview
            .handle(GetSubscriptionOverviewQuery { user_id: user.id })
            .await;
        Dashboard {
            account: AccountSummary::from(user),
            show_upgrade: !subscription.tier.is_paid(),
            subscription,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySubscriptionStore;
    use crate::application::StoreSubscriptionService;
    use crate::domain::foundation::UserId;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap(),
            "ada@example.com",
        )
        .with_last_sign_in(Timestamp::now())
    }

    #[test]
    fn account_summary_shortens_id() {
        let summary = AccountSummary::from(&user());
        assert_eq!(summary.short_id, "0f8fad5b...");
        assert_eq!(summary.display_name, "ada@example.com");
        assert!(summary.last_sign_in_at.is_some());
    }

    #[tokio::test]
    async fn free_user_sees_upgrade_prompt() {
        let service = StoreSubscriptionService::new(Arc::new(InMemorySubscriptionStore::new()));
        let handler = GetDashboardHandler::new(Arc::new(service));

        let dashboard = handler.handle(&user()).await;

        assert!(dashboard.show_upgrade);
        assert!(!dashboard.subscription.degraded);
        assert_eq!(dashboard.account.email, "ada@example.com");
    }
}
