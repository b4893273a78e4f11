//! Authenticated user projection

use serde::{Deserialize, Serialize};

use crate::token::ADMIN_ROLE;

/// The user described by the current token's claims.
///
/// Built from [`crate::TokenClaims`]; the session manager never
/// publishes one that did not come from a decoded token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
