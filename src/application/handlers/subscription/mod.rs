//! Subscription handlers.
//!
//! ## Commands
//! - Partial subscription updates (billing integrations)
//!
//! ## Queries
//! - Subscription overview, with lazy free-tier creation
//! - Dashboard (account summary + overview)

mod get_dashboard;
mod get_subscription_overview;
mod update_subscription;

// Commands
pub use update_subscription::{UpdateSubscriptionCommand, UpdateSubscriptionHandler};

// Queries
pub use get_dashboard::{AccountSummary, Dashboard, GetDashboardHandler};
pub use get_subscription_overview::{
    GetSubscriptionOverviewHandler, GetSubscriptionOverviewQuery, SubscriptionOverview,
};
