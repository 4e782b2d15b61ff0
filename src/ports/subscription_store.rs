//! Subscription store port.
//!
//! Storage for `UserSubscription` records. Two adapters exist: PostgreSQL
//! (persistent, `UNIQUE(user_id)`) and an in-memory map owned by whoever
//! constructs it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{SubscriptionUpdate, UserSubscription};

/// Storage port for subscription records.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Find the record for a user. Returns `None` if the user has none.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserSubscription>, DomainError>;

    /// Find a record by id.
    async fn find_by_id(&self, id: &SubscriptionId)
        -> Result<Option<UserSubscription>, DomainError>;

    /// Insert a new record and return it as stored. Stores may normalise
    /// values on the way in (Postgres keeps microsecond timestamps).
    ///
    /// # Errors
    ///
    /// - `SubscriptionExists` if the store enforces one record per user and
    ///   the user already has one
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, subscription: &UserSubscription)
        -> Result<UserSubscription, DomainError>;

    /// Apply a partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if no record has this id; nothing is written
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        id: &SubscriptionId,
        update: &SubscriptionUpdate,
        updated_at: Timestamp,
    ) -> Result<UserSubscription, DomainError>;

    /// Short adapter name for logs.
    fn name(&self) -> &'static str;
}
