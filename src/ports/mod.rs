//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Subscription Ports
//!
//! - `SubscriptionStore` - record persistence (PostgreSQL or in-memory)
//! - `SubscriptionService` - get / create / update capability used by handlers
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - access token validation
//! - `AuthGateway` - sign-in flows against the auth server

mod auth_gateway;
mod session_validator;
mod subscription_service;
mod subscription_store;

pub use auth_gateway::AuthGateway;
pub use session_validator::SessionValidator;
pub use subscription_service::SubscriptionService;
pub use subscription_store::SubscriptionStore;
