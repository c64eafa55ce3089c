//! Authentication
//!
//! - [`JwtService`] - token issuing and verification
//! - [`CurrentUser`] / [`AdminUser`] - request extractors carrying the verified identity
//! - [`password`] - argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::AdminUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
