//! Client configuration.
//!
//! [`Environment`] selects which PayPal deployment the client talks to.
//! [`ClientConfig`] bundles everything except the HTTP client, and can be
//! deserialized from whatever configuration format the embedding application
//! uses. The library itself never reads the process environment.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    base_url::{BaseUrl, IntoBaseUrl, InvalidBaseUrl},
    endpoints,
    platform::Duration,
};

/// The PayPal deployment to talk to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// `api.sandbox.paypal.com` / `www.sandbox.paypal.com`.
    #[default]
    Sandbox,
    /// `api.paypal.com` / `www.paypal.com`.
    Live,
    /// Explicit base URLs, e.g. for a proxy or a mock server.
    Custom {
        /// Base URL of the REST API.
        api: BaseUrl,
        /// Base URL used for the browser login redirect.
        identity: BaseUrl,
    },
}

impl Environment {
    /// Creates a custom environment from two base URLs.
    ///
    /// The two arguments may be of different types, e.g. a [`Url`](url::Url)
    /// and a `&str`.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL cannot be parsed.
    pub fn custom<A, I>(api: A, identity: I) -> Result<Self, InvalidBaseUrl>
    where
        A: IntoBaseUrl,
        A::Error: Into<InvalidBaseUrl>,
        I: IntoBaseUrl,
        I::Error: Into<InvalidBaseUrl>,
    {
        Ok(Self::Custom {
            api: api.into_base_url().map_err(Into::into)?,
            identity: identity.into_base_url().map_err(Into::into)?,
        })
    }

    /// Base URL of the REST API.
    #[must_use]
    pub fn api_url(&self) -> &str {
        match self {
            Self::Sandbox => endpoints::SANDBOX_API_URL,
            Self::Live => endpoints::LIVE_API_URL,
            Self::Custom { api, .. } => api.as_str(),
        }
    }

    /// Base URL of the identity (login) pages.
    #[must_use]
    pub fn identity_url(&self) -> &str {
        match self {
            Self::Sandbox => endpoints::SANDBOX_IDENTITY_URL,
            Self::Live => endpoints::LIVE_IDENTITY_URL,
            Self::Custom { identity, .. } => identity.as_str(),
        }
    }
}

/// Everything needed to build a [`Client`](crate::Client) apart from the HTTP client.
///
/// ```json
/// {
///   "environment": "live",
///   "client_id": "AZ...",
///   "client_secret": "EK...",
///   "expiry_margin_secs": 30
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// The PayPal deployment; sandbox when omitted.
    #[serde(default)]
    pub environment: Environment,
    /// The REST application's client id.
    pub client_id: String,
    /// The REST application's secret.
    #[serde(deserialize_with = "deserialize_secret")]
    pub client_secret: SecretString,
    /// How long before its reported expiry a cached token is considered stale.
    #[serde(default, rename = "expiry_margin_secs", deserialize_with = "deserialize_secs")]
    pub expiry_margin: Duration,
}

fn deserialize_secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

fn deserialize_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_secs)
}
