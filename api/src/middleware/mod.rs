//! Request middleware
//!
//! - `auth` - Bearer token authentication and the [`AuthContext`] extractor
//! - `role` - Role requirements on top of an authenticated request

pub mod auth;
pub mod role;

pub use auth::{AuthContext, JwtAuth, OptionalAuth};
pub use role::RequireRole;
