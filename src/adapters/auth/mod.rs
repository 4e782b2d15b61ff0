//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` and `AuthGateway` ports:
//!
//! - `jwt` - local HS256 access token validation
//! - `gotrue` - REST client for a GoTrue-compatible auth server
//! - `mock` - in-memory implementations for tests and local development

mod gotrue;
mod jwt;
mod mock;
mod pkce;

pub use gotrue::{GoTrueAuthGateway, GoTrueConfig};
pub use jwt::{JwtSessionValidator, JwtValidatorConfig};
pub use mock::{MockAuthGateway, MockSessionValidator, MOCK_CODE_VERIFIER};
