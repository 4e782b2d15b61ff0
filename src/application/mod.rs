//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod subscription_service;

pub use handlers::{
    AccountSummary, Dashboard, GetDashboardHandler, GetSubscriptionOverviewHandler,
    GetSubscriptionOverviewQuery, SubscriptionOverview, UpdateSubscriptionCommand,
    UpdateSubscriptionHandler,
};
pub use subscription_service::StoreSubscriptionService;
