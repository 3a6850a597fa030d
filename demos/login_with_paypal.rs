use std::io::BufRead as _;

use paypal_rest::{Client, Environment};
use snafu::prelude::*;

const REDIRECT_URI: &str = "http://localhost:8080/login/callback";

#[snafu::report]
#[tokio::main]
pub async fn main() -> Result<(), snafu::Whatever> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client_id =
        std::env::var("PAYPAL_CLIENT_ID").whatever_context("Failed to get PAYPAL_CLIENT_ID")?;
    let client_secret =
        std::env::var("PAYPAL_SECRET").whatever_context("Failed to get PAYPAL_SECRET")?;

    let client = Client::builder()
        .http_client(reqwest::Client::new())
        .environment(Environment::Sandbox)
        .client_id(client_id)
        .client_secret(client_secret)
        .build();

    let login_url = client
        .login_url("demo-state", REDIRECT_URI, &["openid", "profile", "email"])
        .whatever_context("Building login URL failed")?;
    println!("Log in at: {login_url}");
    println!("Paste the `code` parameter from the redirect:");

    let mut code = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut code)
        .whatever_context("Failed to read code")?;

    let tokens = client
        .token_from_code(code.trim(), REDIRECT_URI)
        .await
        .whatever_context("Exchanging code failed")?;

    let user = client
        .user_info(&tokens.access_token)
        .await
        .whatever_context("Fetching user info failed")?;
    println!(
        "Logged in as {} <{}>",
        user.name.as_deref().unwrap_or("unknown"),
        user.email.as_deref().unwrap_or("no email")
    );

    if let Some(refresh_token) = &tokens.refresh_token {
        let refreshed = client
            .token_from_refresh_token(refresh_token)
            .await
            .whatever_context("Refreshing token failed")?;
        println!(
            "Refreshed user token, expires in {}s",
            refreshed.expires_in.as_deref().unwrap_or("?")
        );
    }

    Ok(())
}
