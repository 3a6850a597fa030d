use http::Method;
use serde::{Deserialize, Serialize};

use crate::{
    client::Client,
    endpoints,
    http::{ClientError, HttpClient, RequestBody},
    token::AccessToken,
};

/// The logged-in user's profile.
///
/// Which fields are present depends on the scopes the user consented to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    /// Identifier of the user, as a URL.
    pub user_id: Option<String>,
    /// Subject identifier.
    pub sub: Option<String>,
    /// Full name.
    pub name: Option<String>,
    /// Given name.
    pub given_name: Option<String>,
    /// Family name.
    pub family_name: Option<String>,
    /// Middle name.
    pub middle_name: Option<String>,
    /// Profile picture URL.
    pub picture: Option<String>,
    /// Primary email address.
    pub email: Option<String>,
    /// Whether PayPal has verified the email address.
    #[serde(deserialize_with = "crate::serde_utils::lenient_bool")]
    pub email_verified: bool,
    /// Gender.
    pub gender: Option<String>,
    /// Birth date, `YYYY-MM-DD`.
    pub birthdate: Option<String>,
    /// Time zone, e.g. `America/Los_Angeles`.
    pub zoneinfo: Option<String>,
    /// Locale, e.g. `en_US`.
    pub locale: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Whether the PayPal account is verified.
    #[serde(deserialize_with = "crate::serde_utils::lenient_bool")]
    pub verified_account: bool,
    /// Postal address.
    pub address: Option<Address>,
    /// `PERSONAL` or `BUSINESS`.
    pub account_type: Option<String>,
    /// Age range, e.g. `31-35`.
    pub age_range: Option<String>,
    /// The user's payer id.
    pub payer_id: Option<String>,
}

/// A postal address from [`UserInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Street and house number.
    pub street_address: Option<String>,
    /// City.
    pub locality: Option<String>,
    /// State or province.
    pub region: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Two-letter country code.
    pub country: Option<String>,
}

impl<C: HttpClient> Client<C> {
    /// Fetches the profile of the user who owns `access_token`.
    ///
    /// `access_token` is the user token from
    /// [`token_from_code`](Self::token_from_code), not the application token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, PayPal rejects the token, or
    /// the response cannot be decoded.
    pub async fn user_info(&self, access_token: &AccessToken) -> Result<UserInfo, ClientError<C>> {
        let request = self.bearer_request(
            Method::POST,
            endpoints::IDENTITY_USER_INFO,
            RequestBody::Empty,
            access_token.expose_token(),
        )?;
        self.execute_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{client::tests::client, http::mock::MockHttpClient};

    const PATH: &str = "/v1/identity/openidconnect/userinfo/";

    #[tokio::test]
    async fn user_info_uses_the_callers_token() {
        let client = client(
            MockHttpClient::new()
                .route("/v1/oauth2/token", 200, r#"{"access_token":"APP","token_type":"Bearer","expires_in":3600}"#)
                .route(
                    PATH,
                    200,
                    r#"{
                        "user_id": "https://www.paypal.com/webapps/auth/identity/user/abc",
                        "name": "Ann Smith",
                        "email": "ann@example.com",
                        "email_verified": true,
                        "address": {"locality": "San Jose", "country": "US"},
                        "payer_id": "PAYER-1"
                    }"#,
                ),
        );
        client.get_access_token().await.unwrap();

        let info = client.user_info(&AccessToken::from("USER")).await.unwrap();
        assert_eq!(info.name.as_deref(), Some("Ann Smith"));
        assert!(info.email_verified);
        assert!(!info.verified_account);
        assert_eq!(info.address.unwrap().locality.as_deref(), Some("San Jose"));
        assert_eq!(info.payer_id.as_deref(), Some("PAYER-1"));

        let requests = client.http_client().requests_to(PATH);
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.uri.query(), Some("schema=openid"));
        assert_eq!(request.header("authorization"), Some("Bearer USER"));
    }

    #[test]
    fn verified_account_sent_as_string() {
        let info: UserInfo =
            serde_json::from_str(r#"{"verified_account": "true", "email_verified": false}"#)
                .unwrap();
        assert!(info.verified_account);
        assert!(!info.email_verified);
    }

    #[test]
    fn empty_profile_decodes() {
        let info: UserInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info, UserInfo::default());
    }
}
