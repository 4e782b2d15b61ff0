//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth types, errors)
//! - `subscription` - Tiers, plans, the plan catalog and per-user records
//! - `access` - Session-based route guarding

pub mod access;
pub mod foundation;
pub mod subscription;
