//! UpdateSubscriptionHandler - Command handler for partial subscription updates.
//!
//! Entry point for billing integrations that change plan, status or period.

use std::sync::Arc;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::{SubscriptionError, SubscriptionUpdate, UserSubscription};
use crate::ports::SubscriptionService;

#[derive(Debug, Clone)]
pub struct UpdateSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub update: SubscriptionUpdate,
}

pub struct UpdateSubscriptionHandler {
    service: Arc<dyn SubscriptionService>,
}

impl UpdateSubscriptionHandler {
    pub fn new(service: Arc<dyn SubscriptionService>) -> Self {
        Self { service }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSubscriptionCommand,
    ) -> Result<UserSubscription, SubscriptionError> {
        if cmd.update.is_empty() {
            tracing::debug!(subscription_id = %cmd.subscription_id, "Empty subscription update");
        }
        self.service
            .update_subscription(&cmd.subscription_id, cmd.update)
            .await
    }
}
