use bon::Builder;
use serde::{Deserialize, Serialize};

/// A payment to create.
///
/// ```rust
/// use paypal_rest::payment::{Amount, Payer, Payment, RedirectUrls, Transaction};
///
/// let payment = Payment::builder()
///     .intent("sale")
///     .payer(Payer::with_method("paypal"))
///     .transactions(vec![
///         Transaction::builder()
///             .amount(Amount::builder().currency("USD").total("10.00").build())
///             .description("Order #1")
///             .build(),
///     ])
///     .redirect_urls(RedirectUrls::new("https://shop/return", "https://shop/cancel"))
///     .build();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Payment {
    /// `sale`, `authorize` or `order`.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub intent: String,
    /// Who pays, and how.
    #[builder(default)]
    pub payer: Payer,
    /// What is being paid for.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
    /// Where the buyer returns to after approving or cancelling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_urls: Option<RedirectUrls>,
    /// Free-form note shown to the payer.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_to_payer: Option<String>,
}

/// The payment source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    /// `paypal` or `credit_card`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Payer status, `VERIFIED` or `UNVERIFIED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Details of the payer, filled in by PayPal after approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_info: Option<PayerInfo>,
}

impl Payer {
    /// A payer using the given payment method.
    #[must_use]
    pub fn with_method(payment_method: impl Into<String>) -> Self {
        Self {
            payment_method: Some(payment_method.into()),
            ..Self::default()
        }
    }
}

/// Details of the payer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerInfo {
    /// The payer id, needed to execute the payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A single purchase within a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Transaction {
    /// Total amount and its breakdown.
    #[serde(default)]
    pub amount: Amount,
    /// Description shown to the payer.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Note to the merchant.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_to_payee: Option<String>,
    /// Free-form merchant data.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    /// Merchant invoice number, unique per merchant account.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Text shown on the payer's card statement.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_descriptor: Option<String>,
    /// Restrictions on how the payer may fund the payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_options: Option<PaymentOptions>,
    /// Items purchased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<ItemList>,
    /// URL for instant payment notifications.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// URL of the merchant's order page.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_url: Option<String>,
    /// Sales and other resources created by executing the payment.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_resources: Vec<RelatedResources>,
}

/// A monetary amount.
///
/// Amounts are decimal strings, e.g. `"10.00"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct Amount {
    /// Three-letter ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub currency: String,
    /// Total, including the [`details`](Self::details).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub total: String,
    /// Breakdown of the total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

/// Breakdown of an [`Amount`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Details {
    /// Sum of the item prices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<String>,
    /// Shipping fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<String>,
    /// Tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<String>,
    /// Handling fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handling_fee: Option<String>,
    /// Discount on the shipping fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_discount: Option<String>,
    /// Shipping insurance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
    /// Gift wrapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_wrap: Option<String>,
}

/// Funding restrictions for a [`Transaction`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOptions {
    /// e.g. `INSTANT_FUNDING_SOURCE` or `IMMEDIATE_PAY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_payment_method: Option<String>,
}

/// The items of a [`Transaction`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    /// The items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    /// Shipping method used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    /// Phone number for the shipment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_phone_number: Option<String>,
}

/// A purchased item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Item {
    /// Stock keeping unit.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Item name.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Item description.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of units, as a decimal string.
    #[builder(into)]
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<String>,
    /// Price per unit.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Three-letter ISO 4217 currency code.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Tax per unit.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<String>,
    /// URL of the item's page.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A resource created by executing a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedResources {
    /// The sale, for payments with intent `sale`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<Sale>,
}

/// A completed sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sale {
    /// The sale id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Merchant reference of the purchase unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_unit_reference_id: Option<String>,
    /// Amount collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// How the payment was made, e.g. `INSTANT_TRANSFER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
    /// `completed`, `pending`, `refunded`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Why the sale is pending or reversed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    /// Expected clearing time for eCheck payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clearing_time: Option<String>,
    /// Receipt id shown to the payer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    /// Id of the payment this sale belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_payment: Option<String>,
    /// Creation time, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Last update time, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

/// Where the buyer is sent after approving or cancelling the payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
    /// Redirect target after approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Redirect target after cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

impl RedirectUrls {
    /// Sets both redirect targets.
    #[must_use]
    pub fn new(return_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            return_url: Some(return_url.into()),
            cancel_url: Some(cancel_url.into()),
        }
    }
}

/// A HATEOAS link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    #[serde(default)]
    pub href: String,
    /// Relation, e.g. `self`, `approval_url` or `execute`.
    #[serde(default)]
    pub rel: String,
    /// HTTP method to use with the link.
    #[serde(default)]
    pub method: String,
}

/// A payment as returned by PayPal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentResponse {
    /// The payment id.
    pub id: String,
    /// Creation time, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Last update time, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    /// `created`, `approved` or `failed`.
    pub state: String,
    /// The intent the payment was created with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// The payer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    /// The transactions, with related resources once executed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
    /// Reason for a `failed` state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// The redirect URLs the payment was created with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_urls: Option<RedirectUrls>,
    /// Follow-up actions.
    pub links: Vec<Link>,
}

impl PaymentResponse {
    /// Returns the first link with relation `rel`.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    /// Returns the URL the buyer must visit to approve the payment.
    #[must_use]
    pub fn approval_url(&self) -> Option<&str> {
        self.link("approval_url").map(|link| link.href.as_str())
    }

    /// Returns `true` once the payment has been executed successfully.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.state == "approved"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unset_fields_are_omitted() {
        let payment = Payment::builder()
            .intent("sale")
            .payer(Payer::with_method("paypal"))
            .transactions(vec![
                Transaction::builder()
                    .amount(Amount::builder().currency("USD").total("10.00").build())
                    .build(),
            ])
            .redirect_urls(RedirectUrls::new("https://shop/return", "https://shop/cancel"))
            .build();

        assert_eq!(
            serde_json::to_value(&payment).unwrap(),
            json!({
                "intent": "sale",
                "payer": {"payment_method": "paypal"},
                "transactions": [{"amount": {"currency": "USD", "total": "10.00"}}],
                "redirect_urls": {
                    "return_url": "https://shop/return",
                    "cancel_url": "https://shop/cancel"
                }
            })
        );
    }

    #[test]
    fn item_quantity_accepts_numbers() {
        let item: Item = serde_json::from_str(r#"{"name":"hat","quantity":2}"#).unwrap();
        assert_eq!(item.quantity.as_deref(), Some("2"));

        let item: Item = serde_json::from_str(r#"{"name":"hat","quantity":"3"}"#).unwrap();
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"name": "hat", "quantity": "3"})
        );
    }

    #[test]
    fn response_helpers() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "id": "PAY-1",
            "state": "created",
            "intent": "sale",
            "links": [
                {"href": "https://api/v1/payments/payment/PAY-1", "rel": "self", "method": "GET"},
                {"href": "https://www.paypal.com/approve?token=EC-1", "rel": "approval_url", "method": "REDIRECT"},
                {"href": "https://api/v1/payments/payment/PAY-1/execute", "rel": "execute", "method": "POST"}
            ]
        }))
        .unwrap();

        assert_eq!(
            response.approval_url(),
            Some("https://www.paypal.com/approve?token=EC-1")
        );
        assert_eq!(response.link("execute").unwrap().method, "POST");
        assert!(response.link("refund").is_none());
        assert!(!response.is_approved());
    }

    #[test]
    fn executed_payment_exposes_sale() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "id": "PAY-1",
            "state": "approved",
            "transactions": [{
                "amount": {"currency": "USD", "total": "10.00"},
                "related_resources": [{
                    "sale": {"id": "SALE-1", "state": "completed", "parent_payment": "PAY-1"}
                }]
            }]
        }))
        .unwrap();

        assert!(response.is_approved());
        let sale = response.transactions[0].related_resources[0]
            .sale
            .as_ref()
            .unwrap();
        assert_eq!(sale.id.as_deref(), Some("SALE-1"));
        assert_eq!(sale.parent_payment.as_deref(), Some("PAY-1"));
    }

    #[test]
    fn sparse_transactions_and_links_decode_to_defaults() {
        let response: PaymentResponse = serde_json::from_str(
            r#"{"id":"PAY-1","state":"created","transactions":[{"description":"x"}],"links":[{"href":"h"}]}"#,
        )
        .unwrap();

        assert_eq!(response.transactions[0].amount, Amount::default());
        assert_eq!(response.transactions[0].description.as_deref(), Some("x"));
        assert_eq!(response.links[0].href, "h");
        assert!(response.links[0].rel.is_empty());
        assert!(response.approval_url().is_none());
    }

    #[test]
    fn unset_intent_is_omitted() {
        assert_eq!(
            serde_json::to_value(Payment::default()).unwrap(),
            json!({"payer": {}})
        );
    }
}
