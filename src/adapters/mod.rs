//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Session validation and auth server clients
//! - `http` - axum routes and middleware
//! - `postgres` - PostgreSQL subscription store
//! - `storage` - In-memory subscription store

pub mod auth;
pub mod http;
pub mod postgres;
pub mod storage;
