//! Payments (`/v1/payments/payment`).
//!
//! A PayPal payment is created, approved by the buyer in the browser via
//! [`PaymentResponse::approval_url`], and then executed with the payer id
//! PayPal appends to the return URL.

mod model;

use http::Method;
use serde::Serialize;
use snafu::ResultExt as _;

pub use model::{
    Amount, Details, Item, ItemList, Link, Payer, PayerInfo, Payment, PaymentOptions,
    PaymentResponse, RedirectUrls, RelatedResources, Sale, Transaction,
};

use crate::{
    client::Client,
    endpoints,
    http::{ClientError, HttpClient, RequestBody, SerializeJsonSnafu},
};

#[derive(Debug, Serialize)]
struct ExecutePayment<'a> {
    payer_id: &'a str,
}

impl<C: HttpClient> Client<C> {
    /// Creates a payment.
    ///
    /// For PayPal payments the returned state is `created`; send the buyer
    /// to [`approval_url`](PaymentResponse::approval_url), then call
    /// [`execute_payment`](Self::execute_payment).
    ///
    /// # Errors
    ///
    /// Returns an error if the token grant or the request fails, or PayPal
    /// rejects the payment.
    pub async fn create_payment(
        &self,
        payment: &Payment,
    ) -> Result<PaymentResponse, ClientError<C>> {
        let body = RequestBody::json(payment).context(SerializeJsonSnafu)?;
        let request = self
            .auth_request(Method::POST, endpoints::PAYMENT_CREATE, body)
            .await?;
        let response: PaymentResponse = self.execute_json(request).await?;

        tracing::debug!(payment_id = %response.id, state = %response.state, "created payment");
        Ok(response)
    }

    /// Executes a payment the buyer has approved.
    ///
    /// The response's state is returned as-is; check
    /// [`is_approved`](PaymentResponse::is_approved).
    ///
    /// # Errors
    ///
    /// Returns an error if the token grant or the request fails, or PayPal
    /// refuses to execute the payment.
    pub async fn execute_payment(
        &self,
        payment_id: &str,
        payer_id: &str,
    ) -> Result<PaymentResponse, ClientError<C>> {
        let body = RequestBody::json(&ExecutePayment { payer_id }).context(SerializeJsonSnafu)?;
        let request = self
            .auth_request(Method::POST, &endpoints::payment_execute(payment_id), body)
            .await?;
        let response: PaymentResponse = self.execute_json(request).await?;

        tracing::debug!(payment_id = %response.id, state = %response.state, "executed payment");
        Ok(response)
    }

    /// Looks up a payment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the token grant or the request fails, or the
    /// payment does not exist.
    pub async fn payment(&self, payment_id: &str) -> Result<PaymentResponse, ClientError<C>> {
        let request = self
            .auth_request(
                Method::GET,
                &endpoints::payment_info(payment_id),
                RequestBody::Empty,
            )
            .await?;
        self.execute_json(request).await
    }
}
