//! Tokens issued by PayPal.
//!
//! [`AccessToken`] and [`RefreshToken`] wrap their values in a
//! [`SecretString`](secrecy::SecretString) so they never show up in `Debug`
//! output or logs. [`AppToken`] is the client-credentials response cached on
//! the [`Client`](crate::Client).

mod access_token;
mod app_token;
mod refresh_token;

pub use access_token::AccessToken;
pub use app_token::AppToken;
pub use refresh_token::RefreshToken;
