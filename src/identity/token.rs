use serde::{Deserialize, Serialize};
use snafu::ResultExt as _;

use crate::{
    client::Client,
    endpoints,
    http::{ClientError, HttpClient, RequestBody, SerializeFormSnafu},
    token::{AccessToken, RefreshToken},
};

/// The response from the identity token service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityTokenResponse {
    /// The token type, normally `Bearer`.
    pub token_type: String,
    /// Lifetime of the access token in seconds, as sent by PayPal.
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_in: Option<String>,
    /// Token for [`token_from_refresh_token`](crate::Client::token_from_refresh_token).
    ///
    /// Only sent for the authorization code exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,
    /// The user's access token, for [`user_info`](crate::Client::user_info).
    pub access_token: AccessToken,
    /// The granted scopes, space-separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Server-generated nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// `OpenID` Connect ID token, when the `openid` scope was granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "grant_type", rename_all = "snake_case")]
enum IdentityGrant<'a> {
    AuthorizationCode { code: &'a str, redirect_uri: &'a str },
    RefreshToken { refresh_token: &'a str },
}

impl<C: HttpClient> Client<C> {
    /// Exchanges the authorization code from the login redirect for tokens.
    ///
    /// `redirect_uri` must match the one used in the login URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, PayPal rejects the code, or the
    /// response cannot be decoded.
    pub async fn token_from_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<IdentityTokenResponse, ClientError<C>> {
        self.identity_token(&IdentityGrant::AuthorizationCode { code, redirect_uri })
            .await
    }

    /// Obtains a new user access token from a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, PayPal rejects the refresh
    /// token, or the response cannot be decoded.
    pub async fn token_from_refresh_token(
        &self,
        refresh_token: &RefreshToken,
    ) -> Result<IdentityTokenResponse, ClientError<C>> {
        self.identity_token(&IdentityGrant::RefreshToken {
            refresh_token: refresh_token.expose_token(),
        })
        .await
    }

    async fn identity_token(
        &self,
        grant: &IdentityGrant<'_>,
    ) -> Result<IdentityTokenResponse, ClientError<C>> {
        let body = RequestBody::form(grant).context(SerializeFormSnafu)?;
        let request = self.client_auth_request(endpoints::IDENTITY_TOKEN, body)?;
        self.execute_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use http::Method;

    use super::*;
    use crate::{client::tests::client, http::mock::MockHttpClient};

    const PATH: &str = "/v1/identity/openidconnect/tokenservice";

    const CODE_RESPONSE: &str = r#"{
        "token_type": "Bearer",
        "expires_in": "28800",
        "refresh_token": "R-1",
        "access_token": "U-1",
        "scope": "openid email",
        "nonce": "n",
        "id_token": "eyJ0"
    }"#;

    #[tokio::test]
    async fn code_exchange_sends_basic_auth_and_encoded_form() {
        let client = client(MockHttpClient::new().route(PATH, 200, CODE_RESPONSE));

        let response = client
            .token_from_code("C 1&x", "https://cb/return")
            .await
            .unwrap();
        assert_eq!(response.access_token.expose_token(), "U-1");
        assert_eq!(response.refresh_token.unwrap().expose_token(), "R-1");
        assert_eq!(response.expires_in.as_deref(), Some("28800"));
        assert_eq!(response.id_token.as_deref(), Some("eyJ0"));

        let requests = client.http_client().requests_to(PATH);
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.header("authorization"), Some("Basic Y2xpZW50OnNlY3JldA=="));
        assert_eq!(
            request.body_str(),
            "grant_type=authorization_code&code=C+1%26x&redirect_uri=https%3A%2F%2Fcb%2Freturn"
        );
    }

    #[tokio::test]
    async fn refresh_exchange_sends_refresh_token() {
        let client = client(MockHttpClient::new().route(
            PATH,
            200,
            r#"{"token_type":"Bearer","expires_in":28800,"access_token":"U-2"}"#,
        ));

        let response = client
            .token_from_refresh_token(&RefreshToken::from("R-1"))
            .await
            .unwrap();
        assert_eq!(response.access_token.expose_token(), "U-2");
        assert_eq!(response.expires_in.as_deref(), Some("28800"));
        assert!(response.refresh_token.is_none());

        let request = &client.http_client().requests_to(PATH)[0];
        assert_eq!(
            request.body_str(),
            "grant_type=refresh_token&refresh_token=R-1"
        );
    }

    #[tokio::test]
    async fn identity_exchange_does_not_touch_app_token() {
        let client = client(MockHttpClient::new().route(PATH, 200, CODE_RESPONSE));

        client.token_from_code("C", "https://cb").await.unwrap();

        assert!(client.cached_access_token().is_none());
        assert!(client.http_client().requests_to("/v1/oauth2/token").is_empty());
    }

    #[tokio::test]
    async fn rejected_code_surfaces_provider_error() {
        let client = client(MockHttpClient::new().route(
            PATH,
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid authorization code"}"#,
        ));

        let err = client.token_from_code("bad", "https://cb").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid authorization code");
        assert_eq!(err.provider_error().unwrap().error.as_deref(), Some("invalid_grant"));
    }
}
