//! PostgreSQL implementation of SubscriptionStore.
//!
//! Records live in `user_subscriptions` (see `migrations/`). One row per
//! user is enforced by the `user_subscriptions_user_id_key` constraint.

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{
    SubscriptionField, SubscriptionStatus, SubscriptionTier, SubscriptionUpdate, UserSubscription,
};
use crate::ports::SubscriptionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, plan_id, tier, status, current_period_start, \
     current_period_end, cancel_at_period_end, created_at, updated_at";

const USER_ID_CONSTRAINT: &str = "user_subscriptions_user_id_key";

/// PostgreSQL implementation of the SubscriptionStore port.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: Uuid,
    plan_id: String,
    tier: String,
    status: String,
    current_period_start: DateTime<Utc>,
    current_period_end: DateTime<Utc>,
    cancel_at_period_end: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for UserSubscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(UserSubscription {
            id: SubscriptionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan_id: row.plan_id,
            tier: parse_tier(&row.tier)?,
            status: parse_status(&row.status)?,
            current_period_start: Timestamp::from_datetime(row.current_period_start),
            current_period_end: Timestamp::from_datetime(row.current_period_end),
            cancel_at_period_end: row.cancel_at_period_end,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_tier(s: &str) -> Result<SubscriptionTier, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid tier value: {}", s))
    })
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid status value: {}", s))
    })
}

/// Column written for each updatable field.
fn column_for(field: SubscriptionField) -> &'static str {
    match field {
        SubscriptionField::PlanId => "plan_id",
        SubscriptionField::Tier => "tier",
        SubscriptionField::Status => "status",
        SubscriptionField::CurrentPeriodStart => "current_period_start",
        SubscriptionField::CurrentPeriodEnd => "current_period_end",
        SubscriptionField::CancelAtPeriodEnd => "cancel_at_period_end",
    }
}

/// Builds `UPDATE ... SET <changed columns>, updated_at WHERE id RETURNING`.
fn build_update<'a>(
    id: &SubscriptionId,
    update: &'a SubscriptionUpdate,
    updated_at: Timestamp,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE user_subscriptions SET ");
    {
        let mut set = qb.separated(", ");
        for field in update.changed_fields() {
            set.push(format!("{} = ", column_for(field)));
            match field {
                SubscriptionField::PlanId => set.push_bind_unseparated(update.plan_id.as_deref()),
                SubscriptionField::Tier => {
                    set.push_bind_unseparated(update.tier.map(|t| t.as_str()))
                }
                SubscriptionField::Status => {
                    set.push_bind_unseparated(update.status.map(|s| s.as_str()))
                }
                SubscriptionField::CurrentPeriodStart => set.push_bind_unseparated(
                    update.current_period_start.map(Timestamp::into_datetime),
                ),
                SubscriptionField::CurrentPeriodEnd => set.push_bind_unseparated(
                    update.current_period_end.map(Timestamp::into_datetime),
                ),
                SubscriptionField::CancelAtPeriodEnd => {
                    set.push_bind_unseparated(update.cancel_at_period_end)
                }
            };
        }
        set.push("updated_at = ")
            .push_bind_unseparated(updated_at.into_datetime());
    }
    qb.push(" WHERE id = ").push_bind(*id.as_uuid());
    qb.push(" RETURNING ").push(COLUMNS);
    qb
}

/// `INSERT ... RETURNING` so callers get the row as Postgres stored it.
fn insert_sql() -> String {
    format!(
        "INSERT INTO user_subscriptions ({COLUMNS}) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {COLUMNS}"
    )
}

fn map_insert_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(USER_ID_CONSTRAINT) {
            return DomainError::new(
                ErrorCode::SubscriptionExists,
                "User already has a subscription",
            );
        }
    }
    DomainError::database(format!("Failed to insert subscription: {}", e))
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserSubscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM user_subscriptions WHERE user_id = $1",
            COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find subscription: {}", e)))?;

        row.map(UserSubscription::try_from).transpose()
    }

    async fn find_by_id(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<UserSubscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM user_subscriptions WHERE id = $1",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find subscription: {}", e)))?;

        row.map(UserSubscription::try_from).transpose()
    }

    async fn insert(
        &self,
        subscription: &UserSubscription,
    ) -> Result<UserSubscription, DomainError> {
        let row: SubscriptionRow = sqlx::query_as(&insert_sql())
            .bind(subscription.id.as_uuid())
            .bind(subscription.user_id.as_uuid())
            .bind(&subscription.plan_id)
            .bind(subscription.tier.as_str())
            .bind(subscription.status.as_str())
            .bind(subscription.current_period_start.as_datetime())
            .bind(subscription.current_period_end.as_datetime())
            .bind(subscription.cancel_at_period_end)
            .bind(subscription.created_at.as_datetime())
            .bind(subscription.updated_at.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;

        UserSubscription::try_from(row)
    }

    async fn update(
        &self,
        id: &SubscriptionId,
        update: &SubscriptionUpdate,
        updated_at: Timestamp,
    ) -> Result<UserSubscription, DomainError> {
        let mut qb = build_update(id, update, updated_at);
        let row: Option<SubscriptionRow> = qb
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update subscription: {}", e)))?;

        match row {
            Some(row) => UserSubscription::try_from(row),
            None => Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", id),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
