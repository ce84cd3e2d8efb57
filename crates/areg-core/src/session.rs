//! # Authenticated Session
//!
//! The session exists only while a user is logged in. It is created from the
//! login response, its business name may be edited, and it is destroyed on
//! logout or on any authentication failure reported by the server.
//!
//! Token validity is never checked locally: a present, non-empty token is all
//! the client knows. The server decides whether it is still good.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Credentials and profile of the logged-in user.
///
/// Serialized with camelCase keys (`token`, `username`, `email`,
/// `businessName`), which is also the persisted layout. The bearer token is
/// wiped from memory when the value is dropped, and `Debug` redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token issued by the server.
    pub token: String,
    /// Display name of the user.
    #[serde(default)]
    pub username: String,
    /// Login email address.
    #[serde(default)]
    pub email: String,
    /// Name of the business the register belongs to. May be empty.
    #[serde(default)]
    pub business_name: String,
}

impl Session {
    /// Build a session from its four fields.
    pub fn new(
        token: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        business_name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            email: email.into(),
            business_name: business_name.into(),
        }
    }

    /// Whether the session carries a usable (non-empty) token.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("business_name", &self.business_name)
            .finish()
    }
}
