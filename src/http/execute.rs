use bytes::Bytes;
use http::{Request, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use snafu::prelude::*;

use crate::http::{HttpClient, HttpResponse};

/// Correlation id PayPal sets on every response.
const DEBUG_ID_HEADER: &str = "paypal-debug-id";

/// Errors that can occur when calling the PayPal API.
///
/// These fall into three groups: transport failures ([`Request`](Self::Request),
/// [`ResponseBodyRead`](Self::ResponseBodyRead)), provider errors
/// ([`Provider`](Self::Provider)), and decode failures
/// ([`UnparseableErrorResponse`](Self::UnparseableErrorResponse),
/// [`Decode`](Self::Decode)). The remaining variants cover building the
/// request itself.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ApiError<HttpReqErr: crate::Error + 'static, HttpRespErr: crate::Error + 'static> {
    /// The endpoint URI could not be constructed.
    #[snafu(display("Invalid request URI"))]
    InvalidUri {
        /// The underlying error.
        source: http::uri::InvalidUri,
    },
    /// A header value could not be constructed.
    #[snafu(display("Invalid header value"))]
    BadHeader {
        /// The underlying error.
        source: http::header::InvalidHeaderValue,
    },
    /// The JSON request body could not be serialized.
    #[snafu(display("Failed to serialize JSON request body"))]
    SerializeJson {
        /// The underlying error.
        source: serde_json::Error,
    },
    /// The form request body could not be serialized.
    #[snafu(display("Failed to serialize form request body"))]
    SerializeForm {
        /// The underlying error.
        source: serde_html_form::ser::Error,
    },
    /// An error occurred when making the HTTP request.
    #[snafu(display("Failed to make HTTP request"))]
    Request {
        /// The underlying transport error.
        source: HttpReqErr,
    },
    /// An error occurred when reading the response body.
    #[snafu(display("Failed to read response body"))]
    ResponseBodyRead {
        /// The underlying transport error.
        source: HttpRespErr,
    },
    /// PayPal answered with a non-success status and an error payload.
    ///
    /// Displays as the provider's human-readable message.
    #[snafu(display("{}", body.display_message(*status)))]
    Provider {
        /// The status code of the response.
        status: StatusCode,
        /// The decoded error payload.
        body: ProviderErrorBody,
    },
    /// The response had a non-success status and a body that was not an error payload.
    #[snafu(display("Failed to parse error response: status={status}"))]
    UnparseableErrorResponse {
        /// The status code of the response.
        status: StatusCode,
        /// The raw body of the response.
        body: String,
        /// The underlying error.
        source: serde_json::Error,
    },
    /// The response had a success status but its body did not match the expected shape.
    #[snafu(display("Failed to parse response body"))]
    Decode {
        /// The raw body of the response.
        body: String,
        /// The underlying error.
        source: serde_json::Error,
    },
}

/// [`ApiError`] with the type parameters of a given [`HttpClient`].
pub type ClientError<C> =
    ApiError<<C as HttpClient>::Error, <<C as HttpClient>::Response as HttpResponse>::Error>;

impl<HttpReqErr: crate::Error + 'static, HttpRespErr: crate::Error + 'static>
    ApiError<HttpReqErr, HttpRespErr>
{
    /// Returns the provider's error payload, if PayPal sent one.
    #[must_use]
    pub fn provider_error(&self) -> Option<&ProviderErrorBody> {
        match self {
            Self::Provider { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Provider { status, .. } | Self::UnparseableErrorResponse { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl<HttpReqErr: crate::Error + 'static, HttpRespErr: crate::Error + 'static> crate::Error
    for ApiError<HttpReqErr, HttpRespErr>
{
    fn is_retryable(&self) -> bool {
        match self {
            Self::Request { source } => source.is_retryable(),
            Self::ResponseBodyRead { source } => source.is_retryable(),
            Self::InvalidUri { .. }
            | Self::BadHeader { .. }
            | Self::SerializeJson { .. }
            | Self::SerializeForm { .. }
            | Self::Provider { .. }
            | Self::UnparseableErrorResponse { .. }
            | Self::Decode { .. } => false,
        }
    }
}

/// The error payload PayPal returns with non-success responses.
///
/// The REST endpoints send `name`/`message`; the identity token service sends
/// the `OAuth2` `error`/`error_description` pair instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderErrorBody {
    /// Machine-readable error name, e.g. `VALIDATION_ERROR`.
    #[serde(default)]
    pub name: String,
    /// Human-readable error message.
    #[serde(default)]
    pub message: String,
    /// Further detail on the error.
    pub error_description: Option<String>,
    /// The `OAuth2` error code, when sent instead of `name`.
    pub error: Option<String>,
    /// PayPal's correlation id for support requests. Taken from the
    /// `Paypal-Debug-Id` header when the body has none.
    pub debug_id: Option<String>,
    /// Link to the error's documentation.
    pub information_link: Option<String>,
}

impl ProviderErrorBody {
    /// The most descriptive text available: `message`, else
    /// `error_description`, else the error name or code.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        [
            Some(self.message.as_str()),
            self.error_description.as_deref(),
            Some(self.name.as_str()),
            self.error.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
    }

    fn display_message(&self, status: StatusCode) -> String {
        self.message()
            .map_or_else(|| format!("PayPal request failed: status={status}"), str::to_owned)
    }
}

/// Sends a request and returns the raw body of a successful response.
pub(crate) async fn execute<C: HttpClient>(
    http_client: &C,
    request: Request<Bytes>,
) -> Result<Bytes, ClientError<C>> {
    tracing::debug!(method = %request.method(), uri = %request.uri(), "sending PayPal request");

    let response = http_client.execute(request).await.context(RequestSnafu)?;
    let status = response.status();
    let header_debug_id = response
        .headers()
        .get(DEBUG_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.body().await.context(ResponseBodyReadSnafu)?;

    if status.is_success() {
        return Ok(body);
    }

    let mut error_body = serde_json::from_slice::<ProviderErrorBody>(&body).context(
        UnparseableErrorResponseSnafu {
            status,
            body: String::from_utf8_lossy(&body),
        },
    )?;
    if error_body.debug_id.is_none() {
        error_body.debug_id = header_debug_id;
    }

    tracing::warn!(
        %status,
        name = %error_body.name,
        debug_id = error_body.debug_id.as_deref().unwrap_or_default(),
        "PayPal returned an error response"
    );

    ProviderSnafu {
        status,
        body: error_body,
    }
    .fail()
}

/// Decodes a successful response body.
pub(crate) fn decode<T: DeserializeOwned, HttpReqErr, HttpRespErr>(
    body: &Bytes,
) -> Result<T, ApiError<HttpReqErr, HttpRespErr>>
where
    HttpReqErr: crate::Error + 'static,
    HttpRespErr: crate::Error + 'static,
{
    serde_json::from_slice(body).context(DecodeSnafu {
        body: String::from_utf8_lossy(body),
    })
}
