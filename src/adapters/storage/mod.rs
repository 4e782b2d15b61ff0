//! Storage Adapters
//!
//! Process-local implementations of storage ports.
//!
//! ## Available Adapters
//!
//! - **InMemorySubscriptionStore** - subscription records in a map owned by
//!   the store (testing, development, fallback)

mod in_memory_subscription_store;

pub use in_memory_subscription_store::InMemorySubscriptionStore;
