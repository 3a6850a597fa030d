//! A client for the PayPal REST API.
//!
//! Covers the application access token (client credentials), the
//! "Log in with PayPal" identity flow, and payment creation, execution and
//! lookup. The HTTP transport is pluggable through [`http::HttpClient`];
//! `reqwest` is supported out of the box.

#![forbid(unsafe_code)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base_url;
mod client;
mod client_auth;
pub mod config;
pub mod endpoints;
mod error;
pub mod http;
pub mod identity;
pub mod nonce;
mod oauth;
pub mod payment;
pub mod platform;
mod serde_utils;
pub mod token;

pub use crate::base_url::{BaseUrl, IntoBaseUrl, InvalidBaseUrl};
pub use crate::client::{Client, ClientBuilder};
pub use crate::config::{ClientConfig, Environment};
pub use crate::error::{BoxedError, Error};
pub use crate::http::{ApiError, ClientError, ProviderErrorBody, RequestBody};

/// Re-export of parts of the `secrecy` crate.
pub mod secrecy {
    pub use ::secrecy::{ExposeSecret, SecretString};
}

pub use bytes::Bytes;
