use serde::{Deserialize, Serialize};

use crate::{
    platform::{Duration, SystemTime},
    token::AccessToken,
};

/// The response from the client credentials token endpoint.
///
/// Stored on the [`Client`](crate::Client) and reused by authenticated
/// requests until [`expires_at`](Self::expires_at) passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppToken {
    /// The scopes granted to the application.
    #[serde(default, deserialize_with = "crate::serde_utils::scope_list")]
    pub scope: Vec<String>,
    /// Server-generated nonce.
    pub nonce: Option<String>,
    /// The access token.
    pub access_token: AccessToken,
    /// The token type, normally `Bearer`.
    pub token_type: String,
    /// The application id the token was issued to.
    pub app_id: Option<String>,
    /// Number of seconds until token expiry.
    #[serde(default)]
    pub expires_in: u64,
    /// A synthetic field set to the instant the token stops being valid.
    #[serde(skip, default = "SystemTime::now")]
    pub expires_at: SystemTime,
}

impl AppToken {
    /// Recomputes [`expires_at`](Self::expires_at) from `expires_in`, relative to now.
    pub(crate) fn stamp_received(&mut self) {
        let now = SystemTime::now();
        self.expires_at = now
            .checked_add(Duration::from_secs(self.expires_in))
            .unwrap_or(now);
    }

    /// Returns `true` once the token has expired, treating it as expired
    /// `margin` early.
    #[must_use]
    pub fn is_expired(&self, margin: Duration) -> bool {
        let deadline = self
            .expires_at
            .checked_sub(margin)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        SystemTime::now() >= deadline
    }
}
