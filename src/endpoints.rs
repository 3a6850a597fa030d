//! PayPal base URLs and endpoint paths.

use url::form_urlencoded::byte_serialize;

/// API base URL for the sandbox environment.
pub const SANDBOX_API_URL: &str = "https://api.sandbox.paypal.com";
/// API base URL for the live environment.
pub const LIVE_API_URL: &str = "https://api.paypal.com";
/// Identity (browser login) base URL for the sandbox environment.
pub const SANDBOX_IDENTITY_URL: &str = "https://www.sandbox.paypal.com";
/// Identity (browser login) base URL for the live environment.
pub const LIVE_IDENTITY_URL: &str = "https://www.paypal.com";

/// Client credentials token endpoint.
pub const OAUTH_TOKEN: &str = "/v1/oauth2/token";
/// Identity authorization endpoint, relative to the identity base URL.
pub const IDENTITY_AUTHORIZE: &str = "/signin/authorize";
/// Identity token service, used for code and refresh token exchanges.
pub const IDENTITY_TOKEN: &str = "/v1/identity/openidconnect/tokenservice";
/// Identity user info endpoint.
pub const IDENTITY_USER_INFO: &str = "/v1/identity/openidconnect/userinfo/?schema=openid";
/// Payment creation endpoint.
pub const PAYMENT_CREATE: &str = "/v1/payments/payment";

/// Path of the payment resource with the given id.
pub(crate) fn payment_info(payment_id: &str) -> String {
    format!("{PAYMENT_CREATE}/{}", encode_segment(payment_id))
}

/// Path of the execute action for the payment with the given id.
pub(crate) fn payment_execute(payment_id: &str) -> String {
    format!("{PAYMENT_CREATE}/{}/execute", encode_segment(payment_id))
}

fn encode_segment(segment: &str) -> String {
    byte_serialize(segment.as_bytes()).collect()
}
