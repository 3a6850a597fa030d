use paypal_rest::{
    Client, Environment,
    payment::{Amount, Payer, Payment, RedirectUrls, Transaction},
};
use snafu::prelude::*;

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

    let payment = Payment::builder()
        .intent("sale")
        .payer(Payer::with_method("paypal"))
        .transactions(vec![
            Transaction::builder()
                .amount(Amount::builder().currency("USD").total("7.47").build())
                .description("Demo purchase")
                .build(),
        ])
        .redirect_urls(RedirectUrls::new(
            "http://localhost:8080/return",
            "http://localhost:8080/cancel",
        ))
        .build();

    let created = client
        .create_payment(&payment)
        .await
        .whatever_context("Creating payment failed")?;

    println!("Payment {} is {}", created.id, created.state);
    if let Some(url) = created.approval_url() {
        println!("Approve it at: {url}");
    }

    if let Ok(payer_id) = std::env::var("PAYPAL_PAYER_ID") {
        let executed = client
            .execute_payment(&created.id, &payer_id)
            .await
            .whatever_context("Executing payment failed")?;
        println!("Executed payment {}: approved = {}", executed.id, executed.is_approved());
    }

    Ok(())
}
