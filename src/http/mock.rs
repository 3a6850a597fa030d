//! An in-memory [`HttpClient`] for unit tests.
//!
//! Responses are routed by request path and replayed for every matching
//! request; every request is recorded for later inspection.

use std::{
    convert::Infallible,
    sync::{Mutex, PoisonError},
};

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode, Uri};
use snafu::Snafu;

use crate::http::{HttpClient, HttpResponse};

#[derive(Debug, Snafu)]
#[snafu(display("mock transport error"))]
pub(crate) struct MockTransportError;

impl crate::Error for MockTransportError {
    fn is_retryable(&self) -> bool {
        true
    }
}

/// A request as seen by the mock.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct Route {
    path: String,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

#[derive(Debug, Default)]
pub(crate) struct MockHttpClient {
    routes: Vec<Route>,
    requests: Mutex<Vec<RecordedRequest>>,
    failing: bool,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every request fails at the transport level.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Answers requests for `path` with `status` and `body`.
    pub fn route(self, path: &str, status: u16, body: &str) -> Self {
        self.route_with_headers(path, status, &[], body)
    }

    /// Like [`route`](Self::route), also sending response headers.
    pub fn route_with_headers(
        mut self,
        path: &str,
        status: u16,
        headers: &[(&'static str, &'static str)],
        body: &str,
    ) -> Self {
        self.routes.push(Route {
            path: path.to_owned(),
            status: StatusCode::from_u16(status).unwrap(),
            headers: headers
                .iter()
                .map(|&(name, value)| {
                    (
                        HeaderName::from_static(name),
                        HeaderValue::from_static(value),
                    )
                })
                .collect(),
            body: Bytes::copy_from_slice(body.as_bytes()),
        });
        self
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.uri.path() == path)
            .collect()
    }
}

pub(crate) struct MockResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl HttpClient for MockHttpClient {
    type Error = MockTransportError;
    type Response = MockResponse;

    async fn execute(&self, request: Request<Bytes>) -> Result<Self::Response, Self::Error> {
        let (parts, body) = request.into_parts();
        let path = parts.uri.path().to_owned();

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            });

        if self.failing {
            return Err(MockTransportError);
        }

        let response = self
            .routes
            .iter()
            .find(|route| route.path == path)
            .map_or_else(
                || MockResponse {
                    status: StatusCode::NOT_FOUND,
                    headers: HeaderMap::new(),
                    body: Bytes::from_static(
                        br#"{"name":"RESOURCE_NOT_FOUND","message":"no mock route"}"#,
                    ),
                },
                |route| MockResponse {
                    status: route.status,
                    headers: route.headers.clone(),
                    body: route.body.clone(),
                },
            );

        Ok(response)
    }
}

impl HttpResponse for MockResponse {
    type Error = Infallible;

    fn status(&self) -> StatusCode {
        self.status
    }

    fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }

    async fn body(self) -> Result<Bytes, Self::Error> {
        Ok(self.body)
    }
}
