//! "Log in with PayPal".
//!
//! The browser is sent to [`login_url`](crate::Client::login_url); PayPal
//! redirects back with an authorization code, which
//! [`token_from_code`](crate::Client::token_from_code) exchanges for an
//! [`IdentityTokenResponse`]. The resulting access token is then used with
//! [`user_info`](crate::Client::user_info), and the refresh token with
//! [`token_from_refresh_token`](crate::Client::token_from_refresh_token).

mod login;
mod token;
mod user_info;

pub use login::LoginUrlError;
pub use token::IdentityTokenResponse;
pub use user_info::{Address, UserInfo};
