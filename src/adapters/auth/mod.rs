//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 shared-secret validation for production
//! - `mock` - Test implementation that doesn't require signed tokens

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionValidator, TrainerClaims};
pub use mock::MockSessionValidator;
