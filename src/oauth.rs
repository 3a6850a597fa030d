//! Application access tokens (RFC 6749 §4.4, client credentials).
//!
//! The token is requested with the application's client id and secret,
//! cached on the [`Client`], and reused by every authenticated call until it
//! expires. Expiry is checked on use; there is no background refresh.

use serde::Serialize;
use snafu::ResultExt as _;

use crate::{
    client::Client,
    endpoints,
    http::{ClientError, HttpClient, RequestBody, SerializeFormSnafu},
    token::{AccessToken, AppToken},
};

/// Client credentials grant body.
#[derive(Debug, Serialize)]
struct ClientCredentialsForm {
    grant_type: &'static str,
}

impl<C: HttpClient> Client<C> {
    /// Requests a new application access token and caches it on the client.
    ///
    /// The expiry instant is computed from the reported `expires_in` seconds
    /// relative to the time the response was received. Any previously cached
    /// token is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, PayPal rejects the credentials,
    /// or the response cannot be decoded. The cached token is left untouched.
    pub async fn get_access_token(&self) -> Result<AppToken, ClientError<C>> {
        let body = RequestBody::form(&ClientCredentialsForm {
            grant_type: "client_credentials",
        })
        .context(SerializeFormSnafu)?;

        let request = self.client_auth_request(endpoints::OAUTH_TOKEN, body)?;
        let mut token: AppToken = self.execute_json(request).await?;
        token.stamp_received();

        tracing::debug!(
            expires_in = token.expires_in,
            app_id = token.app_id.as_deref().unwrap_or_default(),
            "obtained PayPal access token"
        );

        *self.token_slot() = Some(token.clone());
        Ok(token)
    }

    /// Returns the cached application token, whether or not it has expired.
    #[must_use]
    pub fn cached_access_token(&self) -> Option<AppToken> {
        self.token_slot().clone()
    }

    /// Drops the cached application token; the next authenticated call
    /// requests a new one.
    pub fn clear_access_token(&self) {
        self.token_slot().take();
    }

    /// Returns a usable bearer token, requesting a new one if the cache is
    /// empty or expired.
    pub(crate) async fn bearer_token(&self) -> Result<AccessToken, ClientError<C>> {
        if let Some(token) = self.fresh_cached_token() {
            return Ok(token);
        }

        tracing::debug!("cached PayPal access token missing or expired, requesting a new one");
        Ok(self.get_access_token().await?.access_token)
    }

    fn fresh_cached_token(&self) -> Option<AccessToken> {
        self.token_slot()
            .as_ref()
            .filter(|token| !token.is_expired(self.expiry_margin()))
            .map(|token| token.access_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use http::{Method, header::AUTHORIZATION};

    use super::*;
    use crate::{client::tests::client, http::mock::MockHttpClient};

    const TOKEN: &str = r#"{
        "scope": "https://uri.paypal.com/services/payments/payment openid",
        "access_token": "T",
        "token_type": "Bearer",
        "app_id": "APP-1",
        "expires_in": 3600
    }"#;

    const EXPIRED_TOKEN: &str = r#"{"access_token": "T0", "token_type": "Bearer", "expires_in": 0}"#;

    #[tokio::test]
    async fn grant_sends_basic_auth_and_form() {
        let client = client(MockHttpClient::new().route("/v1/oauth2/token", 200, TOKEN));

        let token = client.get_access_token().await.unwrap();
        assert_eq!(token.access_token.expose_token(), "T");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(
            token.scope,
            vec!["https://uri.paypal.com/services/payments/payment", "openid"]
        );

        let requests = client.http_client().requests_to("/v1/oauth2/token");
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.header("authorization"), Some("Basic Y2xpZW50OnNlY3JldA=="));
        assert_eq!(
            request.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.body_str(), "grant_type=client_credentials");
    }

    #[tokio::test]
    async fn grant_caches_token() {
        let client = client(MockHttpClient::new().route("/v1/oauth2/token", 200, TOKEN));
        assert!(client.cached_access_token().is_none());

        client.get_access_token().await.unwrap();

        let cached = client.cached_access_token().unwrap();
        assert_eq!(cached.access_token.expose_token(), "T");
        assert_eq!(cached.app_id.as_deref(), Some("APP-1"));
    }

    #[tokio::test]
    async fn authenticated_request_carries_bearer_token() {
        let client = client(MockHttpClient::new().route("/v1/oauth2/token", 200, TOKEN));

        let request = client
            .auth_request(Method::GET, "/v1/payments/payment/PAY-1", RequestBody::Empty)
            .await
            .unwrap();

        assert_eq!(request.headers()[AUTHORIZATION], "Bearer T");
    }

    #[tokio::test]
    async fn unexpired_token_is_reused() {
        let client = client(MockHttpClient::new().route("/v1/oauth2/token", 200, TOKEN));

        client.get_access_token().await.unwrap();
        for _ in 0..3 {
            client
                .auth_request(Method::GET, "/v1/payments/payment/PAY-1", RequestBody::Empty)
                .await
                .unwrap();
        }

        assert_eq!(client.http_client().requests_to("/v1/oauth2/token").len(), 1);
    }

    #[tokio::test]
    async fn expired_token_triggers_one_refresh_per_call() {
        let client = client(MockHttpClient::new().route("/v1/oauth2/token", 200, EXPIRED_TOKEN));

        client.get_access_token().await.unwrap();
        assert_eq!(client.http_client().requests_to("/v1/oauth2/token").len(), 1);

        let request = client
            .auth_request(Method::GET, "/v1/payments/payment/PAY-1", RequestBody::Empty)
            .await
            .unwrap();

        assert_eq!(request.headers()[AUTHORIZATION], "Bearer T0");
        assert_eq!(client.http_client().requests_to("/v1/oauth2/token").len(), 2);
    }

    #[tokio::test]
    async fn expiry_margin_forces_early_refresh() {
        let client = Client::builder()
            .http_client(MockHttpClient::new().route("/v1/oauth2/token", 200, TOKEN))
            .environment(crate::Environment::custom("http://api.mock", "http://www.mock").unwrap())
            .client_id("client")
            .client_secret("secret")
            .expiry_margin(crate::platform::Duration::from_secs(7200))
            .build();

        client.get_access_token().await.unwrap();
        client
            .auth_request(Method::GET, "/v1/payments/payment/PAY-1", RequestBody::Empty)
            .await
            .unwrap();

        assert_eq!(client.http_client().requests_to("/v1/oauth2/token").len(), 2);
    }

    #[tokio::test]
    async fn clearing_forces_a_new_grant() {
        let client = client(MockHttpClient::new().route("/v1/oauth2/token", 200, TOKEN));

        client.get_access_token().await.unwrap();
        client.clear_access_token();
        assert!(client.cached_access_token().is_none());

        client
            .auth_request(Method::GET, "/v1/payments/payment/PAY-1", RequestBody::Empty)
            .await
            .unwrap();

        assert_eq!(client.http_client().requests_to("/v1/oauth2/token").len(), 2);
    }

    #[tokio::test]
    async fn failed_grant_keeps_previous_token() {
        let client = client(MockHttpClient::new().route(
            "/v1/oauth2/token",
            401,
            r#"{"error":"invalid_client","error_description":"Client Authentication failed"}"#,
        ));

        let err = client.get_access_token().await.unwrap_err();
        assert_eq!(err.to_string(), "Client Authentication failed");
        assert!(client.cached_access_token().is_none());
    }
}
