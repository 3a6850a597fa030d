use bytes::Bytes;
use http::{
    HeaderValue, Method, Request, Uri,
    header::{ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE},
};
use serde::Serialize;

const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const LANGUAGE: &str = "en_US";

/// The body of an outgoing API request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body. Sent with a JSON content type, as the API expects.
    #[default]
    Empty,
    /// A JSON document.
    Json(Bytes),
    /// An `application/x-www-form-urlencoded` body.
    Form(String),
}

impl RequestBody {
    /// Serializes `value` as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(|v| Self::Json(v.into()))
    }

    /// Serializes `value` as a form body.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not a flat sequence of key/value pairs.
    pub fn form<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_html_form::ser::Error> {
        serde_html_form::to_string(value).map(Self::Form)
    }

    fn content_type(&self) -> HeaderValue {
        match self {
            Self::Empty | Self::Json(_) => HeaderValue::from_static(APPLICATION_JSON),
            Self::Form(_) => HeaderValue::from_static(FORM_URLENCODED),
        }
    }

    fn into_bytes(self) -> Bytes {
        match self {
            Self::Empty => Bytes::new(),
            Self::Json(bytes) => bytes,
            Self::Form(form) => form.into(),
        }
    }
}

/// Builds a request carrying the headers every PayPal call sends.
pub(crate) fn build_request(
    method: Method,
    uri: Uri,
    body: RequestBody,
    authorization: Option<HeaderValue>,
) -> Request<Bytes> {
    let (mut parts, ()) = Request::new(()).into_parts();
    parts.method = method;
    parts.uri = uri;

    parts
        .headers
        .insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    parts
        .headers
        .insert(ACCEPT_LANGUAGE, HeaderValue::from_static(LANGUAGE));
    parts.headers.insert(CONTENT_TYPE, body.content_type());

    if let Some(authorization) = authorization {
        parts.headers.insert(AUTHORIZATION, authorization);
    }

    Request::from_parts(parts, body.into_bytes())
}
