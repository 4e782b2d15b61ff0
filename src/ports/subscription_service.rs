//! Subscription service port.
//!
//! The capability contract used by handlers and pages. Reads are soft (a
//! store failure looks like "no subscription"); writes are loud.

use async_trait::async_trait;

use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::{
    SubscriptionError, SubscriptionTier, SubscriptionUpdate, UserSubscription,
};

#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// The user's record, or `None` when absent or when the store failed.
    async fn get_user_subscription(&self, user_id: &UserId) -> Option<UserSubscription>;

    /// Creates the free subscription for a user.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` when the store enforces uniqueness and a record exists
    /// - `Unavailable` when the store cannot be reached
    async fn create_free_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<UserSubscription, SubscriptionError>;

    /// Applies a partial update to an existing record.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no record has this id
    /// - `ValidationFailed` for an unknown plan or inconsistent fields
    /// - `Unavailable` when the store cannot be reached
    async fn update_subscription(
        &self,
        id: &SubscriptionId,
        update: SubscriptionUpdate,
    ) -> Result<UserSubscription, SubscriptionError>;

    /// True only when a record exists and its status is exactly `active`.
    async fn has_active_subscription(&self, user_id: &UserId) -> bool {
        self.get_user_subscription(user_id)
            .await
            .map(|s| s.is_active())
            .unwrap_or(false)
    }

    /// The user's tier, defaulting to free.
    async fn get_user_tier(&self, user_id: &UserId) -> SubscriptionTier {
        self.get_user_subscription(user_id)
            .await
            .map(|s| s.tier)
            .unwrap_or_default()
    }
}
