use serde::Serialize;
use snafu::prelude::*;
use url::Url;

use crate::{base_url::IntoBaseUrl as _, client::Client, endpoints, http::HttpClient, nonce};

/// Errors building the login URL.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum LoginUrlError {
    /// The identity base URL could not be joined with the authorize path.
    #[snafu(display("Invalid login URL"))]
    InvalidUrl {
        /// The underlying error.
        source: url::ParseError,
    },
    /// The query parameters could not be encoded.
    #[snafu(display("Encoding of the login parameters failed"))]
    EncodeQuery {
        /// The underlying error.
        source: serde_html_form::ser::Error,
    },
}

impl crate::Error for LoginUrlError {
    fn is_retryable(&self) -> bool {
        false
    }
}

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    client_id: &'a str,
    response_type: &'static str,
    scope: String,
    state: &'a str,
    nonce: String,
    redirect_uri: &'a str,
}

impl<C: HttpClient> Client<C> {
    /// Returns the URL to send the user's browser to.
    ///
    /// The query carries the client id, `response_type=token`, the
    /// space-joined `scopes`, `state`, a fresh nonce and `redirect_uri`.
    /// No request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity base URL is not a valid URL base.
    pub fn login_url<S: AsRef<str>>(
        &self,
        state: &str,
        redirect_uri: &str,
        scopes: &[S],
    ) -> Result<Url, LoginUrlError> {
        let payload = LoginPayload {
            client_id: self.client_id(),
            response_type: "token",
            scope: scopes
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" "),
            state,
            nonce: nonce::create_nonce(),
            redirect_uri,
        };
        let query = serde_html_form::to_string(&payload).context(EncodeQuerySnafu)?;

        let mut url = self
            .environment()
            .identity_url()
            .into_base_url()
            .and_then(|base| base.endpoint_url(endpoints::IDENTITY_AUTHORIZE))
            .context(InvalidUrlSnafu)?;
        url.set_query(Some(&query));
        Ok(url)
    }
}
