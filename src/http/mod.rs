//! HTTP client and response abstractions, plus the request plumbing shared
//! by every API operation.
//!
//! The [`HttpClient`] and [`HttpResponse`] traits decouple the library from
//! any specific HTTP implementation. An implementation for `reqwest` is
//! provided behind the `http-client-reqwest-0_13` feature; timeouts, proxies
//! and connection pooling are configured on that client, not here.

mod execute;
#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "http-client-reqwest-0_13")]
mod reqwest_0_13;
mod request;

use bytes::Bytes;
use http::{HeaderMap, Request, StatusCode};

use crate::platform::{MaybeSend, MaybeSendSync};

pub use execute::{ApiError, ClientError, ProviderErrorBody};
pub(crate) use execute::{
    BadHeaderSnafu, InvalidUriSnafu, SerializeFormSnafu, SerializeJsonSnafu, decode, execute,
};
pub use request::RequestBody;
pub(crate) use request::build_request;

/// Sends HTTP requests on behalf of the [`Client`](crate::Client).
pub trait HttpClient: MaybeSendSync {
    /// Transport error, e.g. a refused connection or a timeout.
    type Error: crate::Error;

    /// The response type.
    type Response: HttpResponse;

    /// Sends `request` and returns the response, whatever its status.
    ///
    /// Only failures to obtain a response are errors; non-2xx statuses are
    /// interpreted by the caller.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + MaybeSend;
}

/// A response returned by an [`HttpClient`].
pub trait HttpResponse: MaybeSendSync {
    /// Error reading the body.
    type Error: crate::Error;

    /// The status code.
    fn status(&self) -> StatusCode;

    /// The response headers.
    fn headers(&self) -> HeaderMap;

    /// Reads the whole body.
    fn body(self) -> impl Future<Output = Result<Bytes, Self::Error>> + MaybeSend;
}
