//! Store-backed implementation of the `SubscriptionService` port.
//!
//! The store is injected at construction time. An optional fallback store is
//! consulted once when the primary store reports an infrastructure failure;
//! not-found and already-exists results are never retried.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{SubscriptionError, SubscriptionUpdate, UserSubscription};
use crate::ports::{SubscriptionService, SubscriptionStore};

pub struct StoreSubscriptionService {
    primary: Arc<dyn SubscriptionStore>,
    fallback: Option<Arc<dyn SubscriptionStore>>,
}

impl StoreSubscriptionService {
    pub fn new(primary: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Retry infrastructure failures once against `store`.
    pub fn with_fallback(mut self, store: Arc<dyn SubscriptionStore>) -> Self {
        self.fallback = Some(store);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    async fn run<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T, DomainError>
    where
        F: Fn(Arc<dyn SubscriptionStore>) -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        match op(Arc::clone(&self.primary)).await {
            Err(e) if e.is_infrastructure() => match &self.fallback {
                Some(fallback) => {
                    tracing::warn!(
                        operation,
                        primary = self.primary.name(),
                        fallback = fallback.name(),
                        error = %e,
                        "Primary subscription store failed, using fallback"
                    );
                    op(Arc::clone(fallback)).await
                }
                None => Err(e),
            },
            other => other,
        }
    }
}

#[async_trait]
impl SubscriptionService for StoreSubscriptionService {
    async fn get_user_subscription(&self, user_id: &UserId) -> Option<UserSubscription> {
        match self
            .run("get", |store| async move { store.find_by_user_id(user_id).await })
            .await
        {
            Ok(found) => {
                tracing::debug!(user_id = %user_id, found = found.is_some(), "Loaded subscription");
                found
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to load subscription");
                None
            }
        }
    }

    async fn create_free_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<UserSubscription, SubscriptionError> {
        let new_record =
            UserSubscription::create_free(SubscriptionId::new(), *user_id, Timestamp::now());
        let record = &new_record;

        let subscription = self
            .run("create", |store| async move { store.insert(record).await })
            .await
            .map_err(|e| {
                let err = SubscriptionError::from_store(e, None, Some(*user_id));
                if err.is_unavailable() {
                    tracing::error!(user_id = %user_id, error = %err, "Failed to create subscription");
                } else {
                    tracing::warn!(user_id = %user_id, error = %err, "Subscription not created");
                }
                err
            })?;

        tracing::info!(
            user_id = %user_id,
            subscription_id = %subscription.id,
            "Created free subscription"
        );
        Ok(subscription)
    }

    async fn update_subscription(
        &self,
        id: &SubscriptionId,
        update: SubscriptionUpdate,
    ) -> Result<UserSubscription, SubscriptionError> {
        update.validate().map_err(|e| {
            tracing::warn!(subscription_id = %id, error = %e, "Rejected subscription update");
            SubscriptionError::from(e)
        })?;

        let now = Timestamp::now();
        let changes = &update;
        let updated = self
            .run("update", |store| async move { store.update(id, changes, now).await })
            .await
            .map_err(|e| {
                let err = SubscriptionError::from_store(e, Some(*id), None);
                tracing::error!(subscription_id = %id, error = %err, "Failed to update subscription");
                err
            })?;

        tracing::info!(
            subscription_id = %id,
            fields = ?update.changed_fields(),
            "Updated subscription"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySubscriptionStore;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::subscription::{
        catalog, SubscriptionStatus, SubscriptionTier, FREE_PERIOD_YEARS,
    };
    use chrono::{Datelike, Timelike};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ════════════════════════════════════════════════════════════════════════════
    // Test Stores
    // ════════════════════════════════════════════════════════════════════════════

    /// Store that is always unreachable.
    #[derive(Default)]
    struct UnreachableStore {
        calls: AtomicUsize,
    }

    impl UnreachableStore {
        fn fail(&self) -> DomainError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            DomainError::database("connection refused")
        }
    }

    #[async_trait]
    impl SubscriptionStore for UnreachableStore {
        async fn find_by_user_id(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<UserSubscription>, DomainError> {
            Err(self.fail())
        }

        async fn find_by_id(
            &self,
            _id: &SubscriptionId,
        ) -> Result<Option<UserSubscription>, DomainError> {
            Err(self.fail())
        }

        async fn insert(
            &self,
            _subscription: &UserSubscription,
        ) -> Result<UserSubscription, DomainError> {
            Err(self.fail())
        }

        async fn update(
            &self,
            _id: &SubscriptionId,
            _update: &SubscriptionUpdate,
            _updated_at: Timestamp,
        ) -> Result<UserSubscription, DomainError> {
            Err(self.fail())
        }

        fn name(&self) -> &'static str {
            "unreachable"
        }
    }

    /// Store that enforces one record per user, like the database does.
    #[derive(Default)]
    struct UniqueStore {
        inner: InMemorySubscriptionStore,
    }

    #[async_trait]
    impl SubscriptionStore for UniqueStore {
        async fn find_by_user_id(
            &self,
            user_id: &UserId,
        ) -> Result<Option<UserSubscription>, DomainError> {
            self.inner.find_by_user_id(user_id).await
        }

        async fn find_by_id(
            &self,
            id: &SubscriptionId,
        ) -> Result<Option<UserSubscription>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn insert(
            &self,
            subscription: &UserSubscription,
        ) -> Result<UserSubscription, DomainError> {
            if self.inner.find_by_user_id(&subscription.user_id).await?.is_some() {
                return Err(DomainError::new(ErrorCode::SubscriptionExists, "duplicate"));
            }
            self.inner.insert(subscription).await
        }

        async fn update(
            &self,
            id: &SubscriptionId,
            update: &SubscriptionUpdate,
            updated_at: Timestamp,
        ) -> Result<UserSubscription, DomainError> {
            self.inner.update(id, update, updated_at).await
        }

        fn name(&self) -> &'static str {
            "unique"
        }
    }

    /// Store that keeps timestamps at microsecond precision, like Postgres.
    #[derive(Default)]
    struct MicrosecondStore {
        inner: InMemorySubscriptionStore,
    }

    fn to_micros(ts: Timestamp) -> Timestamp {
        let dt = ts.into_datetime();
        let micros = dt.nanosecond() / 1_000 * 1_000;
        Timestamp::from_datetime(dt.with_nanosecond(micros).unwrap())
    }

    #[async_trait]
    impl SubscriptionStore for MicrosecondStore {
        async fn find_by_user_id(
            &self,
            user_id: &UserId,
        ) -> Result<Option<UserSubscription>, DomainError> {
            self.inner.find_by_user_id(user_id).await
        }

        async fn find_by_id(
            &self,
            id: &SubscriptionId,
        ) -> Result<Option<UserSubscription>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn insert(
            &self,
            subscription: &UserSubscription,
        ) -> Result<UserSubscription, DomainError> {
            let stored = UserSubscription {
                current_period_start: to_micros(subscription.current_period_start),
                current_period_end: to_micros(subscription.current_period_end),
                created_at: to_micros(subscription.created_at),
                updated_at: to_micros(subscription.updated_at),
                ..subscription.clone()
            };
            self.inner.insert(&stored).await
        }

        async fn update(
            &self,
            id: &SubscriptionId,
            update: &SubscriptionUpdate,
            updated_at: Timestamp,
        ) -> Result<UserSubscription, DomainError> {
            self.inner.update(id, update, to_micros(updated_at)).await
        }

        fn name(&self) -> &'static str {
            "microsecond"
        }
    }

    fn user() -> UserId {
        UserId::new("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap()
    }

    fn memory_service() -> (StoreSubscriptionService, InMemorySubscriptionStore) {
        let store = InMemorySubscriptionStore::new();
        (StoreSubscriptionService::new(Arc::new(store.clone())), store)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // In-Memory Variant
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn created_free_subscription_is_readable() {
        let (service, _) = memory_service();

        let created = service.create_free_subscription(&user()).await.unwrap();
        let fetched = service.get_user_subscription(&user()).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.tier, SubscriptionTier::Free);
        assert_eq!(fetched.status, SubscriptionStatus::Active);
        assert_eq!(fetched.plan_id, catalog::FREE_PLAN_ID);
        assert_eq!(
            fetched.current_period_end.as_datetime().year()
                - fetched.current_period_start.as_datetime().year(),
            FREE_PERIOD_YEARS as i32
        );
    }

    #[tokio::test]
    async fn create_returns_the_record_as_stored() {
        let service = StoreSubscriptionService::new(Arc::new(MicrosecondStore::default()));

        let created = service.create_free_subscription(&user()).await.unwrap();
        let fetched = service.get_user_subscription(&user()).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(created.created_at.as_datetime().nanosecond() % 1_000, 0);
    }

    #[tokio::test]
    async fn missing_subscription_is_none() {
        let (service, _) = memory_service();
        assert!(service.get_user_subscription(&user()).await.is_none());
    }

    #[tokio::test]
    async fn second_create_replaces_first_in_memory() {
        let (service, store) = memory_service();

        service.create_free_subscription(&user()).await.unwrap();
        let second = service.create_free_subscription(&user()).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(service.get_user_subscription(&user()).await, Some(second));
    }

    #[tokio::test]
    async fn update_status_changes_only_status_and_updated_at() {
        let (service, _) = memory_service();
        let created = service.create_free_subscription(&user()).await.unwrap();

        let updated = service
            .update_subscription(
                &created.id,
                SubscriptionUpdate::new().status(SubscriptionStatus::Canceled),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, SubscriptionStatus::Canceled);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(
            UserSubscription {
                status: created.status,
                updated_at: created.updated_at,
                ..updated
            },
            created
        );
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_store_unchanged() {
        let (service, store) = memory_service();
        service.create_free_subscription(&user()).await.unwrap();
        let before = store.snapshot().await;
        let unknown = SubscriptionId::new();

        let err = service
            .update_subscription(
                &unknown,
                SubscriptionUpdate::new().status(SubscriptionStatus::Canceled),
            )
            .await
            .unwrap_err();

        assert_eq!(err, SubscriptionError::NotFound(unknown));
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn update_with_unknown_plan_is_rejected_before_store() {
        let (service, _) = memory_service();
        let created = service.create_free_subscription(&user()).await.unwrap();

        let err = service
            .update_subscription(&created.id, SubscriptionUpdate::new().plan_id("price_gold"))
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::ValidationFailed { .. }));
        assert_eq!(service.get_user_subscription(&user()).await, Some(created));
    }

    #[tokio::test]
    async fn plan_change_without_tier_leaves_record_untouched() {
        let (service, _) = memory_service();
        let created = service.create_free_subscription(&user()).await.unwrap();

        let err = service
            .update_subscription(
                &created.id,
                SubscriptionUpdate::new().plan_id("price_pro_monthly"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::ValidationFailed { .. }));
        let stored = service.get_user_subscription(&user()).await.unwrap();
        assert_eq!(stored.plan_id, catalog::FREE_PLAN_ID);
        assert_eq!(stored.tier, SubscriptionTier::Free);
    }

    #[tokio::test]
    async fn tier_and_active_helpers_follow_record() {
        let (service, _) = memory_service();
        assert_eq!(service.get_user_tier(&user()).await, SubscriptionTier::Free);
        assert!(!service.has_active_subscription(&user()).await);

        let created = service.create_free_subscription(&user()).await.unwrap();
        assert!(service.has_active_subscription(&user()).await);

        service
            .update_subscription(
                &created.id,
                SubscriptionUpdate::new()
                    .plan_id("price_pro_monthly")
                    .tier(SubscriptionTier::Pro)
                    .status(SubscriptionStatus::Trialing),
            )
            .await
            .unwrap();
        assert_eq!(service.get_user_tier(&user()).await, SubscriptionTier::Pro);
        assert!(!service.has_active_subscription(&user()).await);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Persistent Variant Semantics
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn second_create_conflicts_when_store_is_unique() {
        let service = StoreSubscriptionService::new(Arc::new(UniqueStore::default()));

        let first = service.create_free_subscription(&user()).await.unwrap();
        let err = service.create_free_subscription(&user()).await.unwrap_err();

        assert_eq!(err, SubscriptionError::AlreadyExists(user()));
        assert_eq!(service.get_user_subscription(&user()).await, Some(first));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Fallback Policy
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn without_fallback_unreachable_store_is_soft_on_get_and_loud_on_create() {
        let service = StoreSubscriptionService::new(Arc::new(UnreachableStore::default()));

        assert!(service.get_user_subscription(&user()).await.is_none());
        let err = service.create_free_subscription(&user()).await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn with_fallback_records_land_in_fallback_store() {
        let primary = Arc::new(UnreachableStore::default());
        let fallback = InMemorySubscriptionStore::new();
        let service = StoreSubscriptionService::new(primary.clone())
            .with_fallback(Arc::new(fallback.clone()));

        let created = service.create_free_subscription(&user()).await.unwrap();

        assert_eq!(fallback.snapshot().await, vec![created.clone()]);
        assert_eq!(service.get_user_subscription(&user()).await, Some(created));
        assert_eq!(primary.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn not_found_is_never_retried_against_fallback() {
        let fallback = InMemorySubscriptionStore::new();
        let stray =
            UserSubscription::create_free(SubscriptionId::new(), user(), Timestamp::now());
        fallback.insert(&stray).await.unwrap();
        let service = StoreSubscriptionService::new(Arc::new(InMemorySubscriptionStore::new()))
            .with_fallback(Arc::new(fallback.clone()));

        let err = service
            .update_subscription(
                &stray.id,
                SubscriptionUpdate::new().status(SubscriptionStatus::Canceled),
            )
            .await
            .unwrap_err();

        assert_eq!(err, SubscriptionError::NotFound(stray.id));
        assert_eq!(fallback.snapshot().await, vec![stray]);
    }

    #[tokio::test]
    async fn conflict_is_never_retried_against_fallback() {
        let fallback = InMemorySubscriptionStore::new();
        let primary = UniqueStore::default();
        primary
            .insert(&UserSubscription::create_free(
                SubscriptionId::new(),
                user(),
                Timestamp::now(),
            ))
            .await
            .unwrap();
        let service = StoreSubscriptionService::new(Arc::new(primary))
            .with_fallback(Arc::new(fallback.clone()));

        let err = service.create_free_subscription(&user()).await.unwrap_err();

        assert_eq!(err, SubscriptionError::AlreadyExists(user()));
        assert!(fallback.is_empty().await);
    }
}
