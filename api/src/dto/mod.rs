//! Request and response bodies

pub mod auth;

pub use auth::{
    HealthResponse, IdentityResponse, MessageResponse, RefreshTokenRequest, RevokeRequest,
    TokenResponse, VerifyResponse,
};
pub use tg_shared::errors::ErrorResponse;
