//! Bearer token decoding
//!
//! Tokens are JWTs issued by the server. The client reads the payload
//! segment only; signature verification stays on the server.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::user::User;

/// Role claim value granting access to the admin dashboard.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username
    pub sub: String,
    pub id: i64,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    pub role: String,
    /// Expiry as a unix timestamp, when the server sets one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        exp_passed(self.exp, now)
    }

    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.sub,
            first_name: self.first_name,
            role: self.role,
        }
    }
}

/// Whether an `exp` claim has passed at `now`. Tokens without one never expire.
pub(crate) fn exp_passed(exp: Option<i64>, now: DateTime<Utc>) -> bool {
    exp.is_some_and(|exp| exp <= now.timestamp())
}

/// Decode the claims of `token` without verifying its signature.
///
/// Only the payload segment is read, so unsigned `header.payload` tokens
/// and tokens with trailing segments decode as well.
pub fn decode_claims(token: &str) -> Result<TokenClaims, DecodeError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() < 2 {
        return Err(DecodeError::Segments(segments.len()));
    }

    // Some issuers pad the segments even though JWT forbids it
    let payload = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;
    Ok(serde_json::from_slice(&payload)?)
}

#[cfg(test)]
pub(crate) fn unsigned_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}
