//! Subscription domain module.
//!
//! Static plan catalog plus the per-user subscription record.
//!
//! # Module Structure
//!
//! - `catalog` - the fixed list of plans and lookup functions
//! - `tier` / `features` - tier levels and the limits they grant
//! - `record` - `UserSubscription`, one per user
//! - `update` - partial updates applied to a record

pub mod catalog;
mod errors;
mod features;
mod interval;
mod plan;
mod record;
mod status;
mod tier;
mod update;

pub use errors::SubscriptionError;
pub use features::SubscriptionFeatures;
pub use interval::BillingInterval;
pub use plan::SubscriptionPlan;
pub use record::{UserSubscription, FREE_PERIOD_YEARS};
pub use status::{Standing, SubscriptionStatus};
pub use tier::SubscriptionTier;
pub use update::{SubscriptionField, SubscriptionUpdate};
