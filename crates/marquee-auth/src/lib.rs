//! Marquee Authentication
//!
//! Owns the client side of the login session:
//! - Credentials go to the Auth API, which answers with a bearer token
//! - The token is persisted and its claims decoded (never verified locally)
//! - Session state is observable and always consistent with the stored token
//! - Anything that fails to decode is treated as a logout

mod api;
mod error;
mod manager;
mod store;
mod token;
mod user;

pub use api::{
    endpoint, read_error_message, AuthApi, AuthResponse, HttpAuthApi, LoginRequest,
    RegisterRequest,
};
pub use error::{AuthError, DecodeError};
pub use manager::{SessionManager, SessionOptions};
pub use store::{MemoryTokenStore, SettingsTokenStore, TokenStore, TOKEN_KEY};
pub use token::{decode_claims, TokenClaims, ADMIN_ROLE};
pub use user::User;

pub type Result<T> = std::result::Result<T, AuthError>;
