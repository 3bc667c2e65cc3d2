//! Credential cookie configuration.

use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "access_token";

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Attributes applied to both credential cookies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Cookie `Domain` attribute. Host-only when unset.
    #[serde(default)]
    pub domain: Option<String>,
    /// Whether the `Secure` attribute is set.
    #[serde(default = "default_secure")]
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: None,
            secure: default_secure(),
        }
    }
}

fn default_secure() -> bool {
    true
}
