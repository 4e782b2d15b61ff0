//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! - `PostgresSubscriptionStore` - `user_subscriptions` table

mod subscription_store;

pub use subscription_store::PostgresSubscriptionStore;
