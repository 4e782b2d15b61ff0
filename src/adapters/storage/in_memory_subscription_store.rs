//! In-Memory Subscription Store Adapter
//!
//! Keeps subscription records in a map owned by the store instance.
//! Used for development, tests, and as the optional fallback behind the
//! PostgreSQL store.
//!
//! Inserts are puts keyed by user: a second insert for the same user
//! replaces the first record (last write wins).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{SubscriptionUpdate, UserSubscription};
use crate::ports::SubscriptionStore;

#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionStore {
    records: Arc<RwLock<HashMap<UserId, UserSubscription>>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of all records (useful for tests)
    pub async fn snapshot(&self) -> Vec<UserSubscription> {
        self.records.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserSubscription>, DomainError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn find_by_id(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<UserSubscription>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|s| s.id == *id).cloned())
    }

    async fn insert(
        &self,
        subscription: &UserSubscription,
    ) -> Result<UserSubscription, DomainError> {
        let mut records = self.records.write().await;
        records.insert(subscription.user_id, subscription.clone());
        Ok(subscription.clone())
    }

    async fn update(
        &self,
        id: &SubscriptionId,
        update: &SubscriptionUpdate,
        updated_at: Timestamp,
    ) -> Result<UserSubscription, DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .values_mut()
            .find(|s| s.id == *id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SubscriptionNotFound,
                    format!("Subscription not found: {}", id),
                )
            })?;
        record.apply(update, updated_at);
        Ok(record.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::SubscriptionStatus;

    fn user(n: u8) -> UserId {
        UserId::new(format!("00000000-0000-4000-8000-0000000000{:02}", n)).unwrap()
    }

    fn free_for(user_id: UserId) -> UserSubscription {
        UserSubscription::create_free(SubscriptionId::new(), user_id, Timestamp::now())
    }

    #[tokio::test]
    async fn insert_then_find_by_user_and_id() {
        let store = InMemorySubscriptionStore::new();
        let sub = free_for(user(1));

        store.insert(&sub).await.unwrap();

        assert_eq!(store.find_by_user_id(&user(1)).await.unwrap(), Some(sub.clone()));
        assert_eq!(store.find_by_id(&sub.id).await.unwrap(), Some(sub));
        assert_eq!(store.find_by_user_id(&user(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn second_insert_for_user_replaces_first() {
        let store = InMemorySubscriptionStore::new();
        let first = free_for(user(1));
        let second = free_for(user(1));

        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.find_by_user_id(&user(1)).await.unwrap(), Some(second));
        assert_eq!(store.find_by_id(&first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_applies_partial_fields() {
        let store = InMemorySubscriptionStore::new();
        let sub = free_for(user(1));
        store.insert(&sub).await.unwrap();
        let later = sub.updated_at.add_years(1);

        let updated = store
            .update(
                &sub.id,
                &SubscriptionUpdate::new().status(SubscriptionStatus::PastDue),
                later,
            )
            .await
            .unwrap();

        assert_eq!(updated.status, SubscriptionStatus::PastDue);
        assert_eq!(updated.updated_at, later);
        assert_eq!(store.find_by_id(&sub.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_unknown_id_leaves_store_untouched() {
        let store = InMemorySubscriptionStore::new();
        store.insert(&free_for(user(1))).await.unwrap();
        let before = store.snapshot().await;

        let err = store
            .update(
                &SubscriptionId::new(),
                &SubscriptionUpdate::new().status(SubscriptionStatus::Canceled),
                Timestamp::now(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::SubscriptionNotFound);
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn clones_share_records() {
        let store = InMemorySubscriptionStore::new();
        let clone = store.clone();
        clone.insert(&free_for(user(3))).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}
