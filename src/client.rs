//! The PayPal client handle.
//!
//! [`Client`] holds the application's credentials, the selected
//! [`Environment`], the HTTP client, and a single cached application token.
//! The API operations are implemented next to their types, in
//! [`identity`](crate::identity), [`payment`](crate::payment) and the
//! application token methods such as [`Client::get_access_token`].

use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

use bon::Builder;
use bytes::Bytes;
use http::{HeaderValue, Method, Request, Uri};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use snafu::ResultExt as _;

use crate::{
    client_auth,
    config::{ClientConfig, Environment},
    http::{
        BadHeaderSnafu, ClientError, HttpClient, InvalidUriSnafu, RequestBody,
        build_request, decode, execute,
    },
    platform::Duration,
    token::AppToken,
};

/// A client for the PayPal REST API.
///
/// Cloning is not supported; share the client behind an `Arc` instead. The
/// cached token slot is guarded by a mutex, but concurrent callers that find
/// it expired may each request a new token, the last response winning.
///
/// ```rust,no_run
/// use paypal_rest::{Client, Environment};
///
/// let client = Client::builder()
///     .http_client(reqwest::Client::new())
///     .environment(Environment::Sandbox)
///     .client_id("my-client-id")
///     .client_secret("my-secret")
///     .build();
/// ```
#[derive(Builder)]
pub struct Client<C: HttpClient> {
    /// The HTTP client used for every request.
    http_client: C,

    /// The PayPal deployment to talk to.
    #[builder(default)]
    environment: Environment,

    /// The REST application's client id.
    #[builder(into)]
    client_id: String,

    /// The REST application's secret.
    #[builder(with = |secret: impl Into<String>| SecretString::from(secret.into()))]
    client_secret: SecretString,

    /// How long before its reported expiry the cached token is replaced.
    #[builder(default)]
    expiry_margin: Duration,

    #[builder(skip)]
    token: Mutex<Option<AppToken>>,
}

impl<C: HttpClient> Client<C> {
    /// Creates a client from deserialized configuration.
    pub fn from_config(http_client: C, config: ClientConfig) -> Self {
        Self {
            http_client,
            environment: config.environment,
            client_id: config.client_id,
            client_secret: config.client_secret,
            expiry_margin: config.expiry_margin,
            token: Mutex::default(),
        }
    }

    /// The configured environment.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The configured client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The underlying HTTP client.
    #[must_use]
    pub fn http_client(&self) -> &C {
        &self.http_client
    }

    pub(crate) fn expiry_margin(&self) -> Duration {
        self.expiry_margin
    }

    pub(crate) fn token_slot(&self) -> MutexGuard<'_, Option<AppToken>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn api_endpoint(&self, path: &str) -> Result<Uri, ClientError<C>> {
        format!("{}{path}", self.environment.api_url())
            .parse()
            .context(InvalidUriSnafu)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        authorization: Option<HeaderValue>,
    ) -> Result<Request<Bytes>, ClientError<C>> {
        Ok(build_request(
            method,
            self.api_endpoint(path)?,
            body,
            authorization,
        ))
    }

    /// Builds a request against the API base URL without an `Authorization` header.
    ///
    /// `path` is appended to the environment's API URL and may carry a query
    /// string. `Accept`, `Accept-Language` and `Content-Type` are set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUri`](crate::ApiError::InvalidUri) if the resulting URI is invalid.
    pub fn basic_request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Request<Bytes>, ClientError<C>> {
        self.request(method, path, body, None)
    }

    /// Builds a request authenticated with the cached application token.
    ///
    /// If no token is cached, or the cached one has expired, a new one is
    /// requested first (see [`get_access_token`](Self::get_access_token)).
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is invalid or the token request fails.
    pub async fn auth_request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Request<Bytes>, ClientError<C>> {
        let token = self.bearer_token().await?;
        self.bearer_request(method, path, body, token.expose_token())
    }

    /// Builds a POST request authenticated with the client id and secret.
    pub(crate) fn client_auth_request(
        &self,
        path: &str,
        body: RequestBody,
    ) -> Result<Request<Bytes>, ClientError<C>> {
        let authorization =
            client_auth::basic(&self.client_id, &self.client_secret).context(BadHeaderSnafu)?;
        self.request(Method::POST, path, body, Some(authorization))
    }

    /// Builds a request authenticated with an explicit bearer token.
    pub(crate) fn bearer_request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        token: &str,
    ) -> Result<Request<Bytes>, ClientError<C>> {
        let authorization = client_auth::bearer(token).context(BadHeaderSnafu)?;
        self.request(method, path, body, Some(authorization))
    }

    /// Sends a request, returning the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`](crate::ApiError::Request) or [`ApiError::ResponseBodyRead`](crate::ApiError::ResponseBodyRead) on
    /// transport failures, [`ApiError::Provider`](crate::ApiError::Provider) when PayPal responds with a
    /// non-success status, and [`ApiError::UnparseableErrorResponse`](crate::ApiError::UnparseableErrorResponse) when
    /// that response is not a PayPal error payload.
    pub async fn execute(&self, request: Request<Bytes>) -> Result<Bytes, ClientError<C>> {
        execute(&self.http_client, request).await
    }

    /// Sends a request and decodes the JSON body of a successful response.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus [`ApiError::Decode`](crate::ApiError::Decode) if the body
    /// does not match `T`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: Request<Bytes>,
    ) -> Result<T, ClientError<C>> {
        let body = self.execute(request).await?;
        decode(&body)
    }
}

impl<C: HttpClient> fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("environment", &self.environment)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .field("expiry_margin", &self.expiry_margin)
            .finish_non_exhaustive()
    }
}
