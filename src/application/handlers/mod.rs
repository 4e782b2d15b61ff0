//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod subscription;

pub use subscription::{
    AccountSummary, Dashboard, GetDashboardHandler, GetSubscriptionOverviewHandler,
    GetSubscriptionOverviewQuery, SubscriptionOverview, UpdateSubscriptionCommand,
    UpdateSubscriptionHandler,
};
