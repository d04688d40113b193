// crates/provider-contract/src/auth.rs
// ============================================================================
// Module: Provider Authorization Header
// Description: Builds the Authorization header value expected by the service.
// Purpose: Encode credentials in the service's split base64 format.
// Dependencies: base64, serde
// ============================================================================

//! ## Overview
//! The Provider service expects `Authorization: <b64(user)>:<b64(password)>`,
//! with each credential encoded on its own. This is not RFC 7617 Basic auth,
//! which encodes `user:password` as one string. The split format is the
//! default; [`AuthScheme::Basic`] is opt-in for services that implement the
//! standard scheme.
//!
//! Invariants:
//! - Encoding uses the standard RFC 4648 alphabet with padding and no wraps.
//! - The header value is returned verbatim; no prefix is added for the split
//!   scheme.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Username/password pair presented to the service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Auth Scheme
// ============================================================================

/// Encoding applied to credentials when building the header value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// `b64(username) + ":" + b64(password)`, sent without a prefix.
    #[default]
    SplitBase64,
    /// RFC 7617: `"Basic " + b64(username + ":" + password)`.
    Basic,
}

impl AuthScheme {
    /// Returns the stable label used in config files and transcripts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SplitBase64 => "split_base64",
            Self::Basic => "basic",
        }
    }

    /// Builds the `Authorization` header value for the credentials.
    #[must_use]
    pub fn header_value(self, credentials: &Credentials) -> String {
        match self {
            Self::SplitBase64 => build_auth_header(&credentials.username, &credentials.password),
            Self::Basic => {
                let joined = format!("{}:{}", credentials.username, credentials.password);
                format!("Basic {}", BASE64.encode(joined.as_bytes()))
            }
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Header Construction
// ============================================================================

/// Encodes username and password separately and joins them with `:`.
#[must_use]
pub fn build_auth_header(username: &str, password: &str) -> String {
    let encoded_username = BASE64.encode(username.as_bytes());
    let encoded_password = BASE64.encode(password.as_bytes());
    format!("{encoded_username}:{encoded_password}")
}
