//! `Authorization` header construction.
//!
//! The two token endpoints authenticate the application with HTTP Basic
//! credentials (RFC 6749 §2.3.1); every other call carries a bearer token.

use base64::prelude::*;
use http::{HeaderValue, header::InvalidHeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use url::form_urlencoded::byte_serialize;

/// Builds a `Basic` authorization header from the client id and secret.
///
/// Both values are form-encoded before being joined, as RFC 6749 requires.
/// PayPal credentials only use alphanumerics, `-` and `_`, which encode to
/// themselves, so the header matches plain `id:secret` Basic auth.
pub(crate) fn basic(
    client_id: &str,
    client_secret: &SecretString,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let client_id: String = byte_serialize(client_id.as_bytes()).collect();
    let client_secret: String = byte_serialize(client_secret.expose_secret().as_bytes()).collect();

    let credentials = format!("{client_id}:{client_secret}");
    let mut header =
        HeaderValue::from_str(&format!("Basic {}", BASE64_STANDARD.encode(credentials)))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Builds a `Bearer` authorization header from a token.
pub(crate) fn bearer(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut header = HeaderValue::from_str(&format!("Bearer {token}"))?;
    header.set_sensitive(true);
    Ok(header)
}
