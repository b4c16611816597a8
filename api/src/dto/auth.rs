use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tg_core::domain::entities::{AccessClaims, RegisteredClaims, TokenPair};

/// Body of `POST /api/v1/auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Optional body of `POST /api/v1/auth/revoke`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevokeRequest {
    /// Refresh token to revoke together with the presented access token
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// A freshly issued token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

/// Outcome of `GET /api/v1/auth/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub claims: AccessClaims,
    pub expires_at: DateTime<Utc>,
    /// Seconds until expiry
    pub expires_in: i64,
}

impl From<&AccessClaims> for VerifyResponse {
    fn from(claims: &AccessClaims) -> Self {
        Self {
            valid: true,
            claims: claims.clone(),
            expires_at: claims.expiry(),
            expires_in: claims.remaining_lifetime().num_seconds(),
        }
    }
}

/// The authenticated caller, as carried by the access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub subject_id: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&AccessClaims> for IdentityResponse {
    fn from(claims: &AccessClaims) -> Self {
        Self {
            subject_id: claims.subject_id.clone(),
            email: claims.email.clone(),
            roles: claims.roles.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revoke_request_body_is_optional_field() {
        let request: RevokeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.refresh_token.is_none());

        let request: RevokeRequest = serde_json::from_str(r#"{"refresh_token":"abc"}"#).unwrap();
        assert_eq!(request.refresh_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_token_response_from_pair() {
        let response = TokenResponse::from(TokenPair::new("a".into(), "r".into(), 900));
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 900);
    }
}
