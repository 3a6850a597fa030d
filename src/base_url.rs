//! A validated base URL.
//!
//! [`BaseUrl`] is a newtype over [`Url`] that guarantees the URL parsed and
//! can act as a base for endpoint paths. It can be constructed from common
//! string and URL types via [`IntoBaseUrl`].

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use snafu::Snafu;
use url::Url;

/// A validated base URL, such as `https://api.sandbox.paypal.com`.
///
/// Endpoint paths are appended verbatim, so any trailing slash is dropped on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl Serialize for BaseUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.into_base_url().map_err(serde::de::Error::custom)
    }
}

impl BaseUrl {
    fn from_url(url: &Url) -> Self {
        Self(url.as_str().trim_end_matches('/').to_owned())
    }

    /// Returns the base URL as a string, without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins an endpoint path (which may carry a query string) onto the base.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined string is not a valid URL.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{path}", self.0))
    }
}

/// A base URL that failed to parse.
///
/// Every [`IntoBaseUrl`] error converts into this.
#[derive(Debug, Snafu)]
#[snafu(context(false), display("Invalid base URL"))]
pub struct InvalidBaseUrl {
    source: url::ParseError,
}

impl From<Infallible> for InvalidBaseUrl {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Conversion trait for types that can be turned into a [`BaseUrl`].
pub trait IntoBaseUrl {
    /// The error type returned if the conversion fails.
    type Error;

    /// Attempts to convert this value into a [`BaseUrl`].
    fn into_base_url(self) -> Result<BaseUrl, Self::Error>;
}

impl IntoBaseUrl for BaseUrl {
    type Error = Infallible;

    fn into_base_url(self) -> Result<BaseUrl, Self::Error> {
        Ok(self)
    }
}

impl IntoBaseUrl for Url {
    type Error = Infallible;

    fn into_base_url(self) -> Result<BaseUrl, Self::Error> {
        Ok(BaseUrl::from_url(&self))
    }
}

impl IntoBaseUrl for &str {
    type Error = url::ParseError;

    fn into_base_url(self) -> Result<BaseUrl, Self::Error> {
        Url::parse(self).map(|url| BaseUrl::from_url(&url))
    }
}

impl IntoBaseUrl for String {
    type Error = url::ParseError;

    fn into_base_url(self) -> Result<BaseUrl, Self::Error> {
        self.as_str().into_base_url()
    }
}
