//! The crate-wide [`Error`] trait.
//!
//! Every error type the client can return implements [`Error`], which adds a
//! retry hint on top of [`std::error::Error`]. Only transport failures are
//! ever retryable: PayPal's error payloads carry no transient/permanent
//! distinction, so provider errors are never flagged.
//!
//! [`ClientError`](crate::ClientError) is generic over the HTTP client's
//! error types; [`BoxedError`] erases them for callers that do not care.

use std::convert::Infallible;

use snafu::{AsErrorSource, Snafu};

use crate::{http::ApiError, platform::MaybeSendSync};

/// An error returned by this crate or by an [`HttpClient`](crate::http::HttpClient).
pub trait Error: std::error::Error + AsErrorSource + MaybeSendSync + 'static {
    /// Whether repeating the failed call may succeed.
    fn is_retryable(&self) -> bool;
}

impl Error for Infallible {
    fn is_retryable(&self) -> bool {
        false
    }
}

/// A type-erased [`Error`] that still answers [`is_retryable`](Error::is_retryable).
///
/// ```rust,no_run
/// # async fn run(client: paypal_rest::Client<reqwest::Client>) -> Result<(), paypal_rest::BoxedError> {
/// let _payment = client.payment("PAY-1").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Snafu)]
#[snafu(transparent)]
pub struct BoxedError {
    source: Box<dyn Error>,
}

impl BoxedError {
    /// Boxes any [`Error`].
    pub fn from_err<E: Error>(err: E) -> Self {
        Self {
            source: Box::new(err),
        }
    }

    /// The wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn Error + 'static) {
        self.source.as_ref()
    }
}

impl Error for BoxedError {
    fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}

impl<HttpReqErr: Error, HttpRespErr: Error> From<ApiError<HttpReqErr, HttpRespErr>>
    for BoxedError
{
    fn from(err: ApiError<HttpReqErr, HttpRespErr>) -> Self {
        Self::from_err(err)
    }
}
