//! SmartScale - SaaS starter backend
//!
//! Authentication against a hosted auth server, session-based route guarding
//! and a tiered subscription catalog with per-user subscription records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
