//! Wire representation of a gateway reply.
//!
//! The same envelope is shared by every SOAP operation and each operation fills
//! a different subset of it, so every field is optional. Unknown fields are
//! ignored and a `null` decodes exactly like an omitted field. A field whose
//! value has an unexpected type also decodes as absent (numbers are accepted
//! where text is expected), so one malformed field never hides the `return`
//! block of the reply.

use secrecy::SecretString;
use serde::Deserialize;

use crate::custom_serde::{self, NumericText};

/// Decoded reply envelope.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    #[serde(rename = "return", default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub return_status: Option<ReturnStatus>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub transaction: Option<TransactionPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub account: Option<AccountPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub billing_plan: Option<BillingPlanPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub product: Option<ProductPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub autobill: Option<AutoBillPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub payment_method: Option<PaymentMethodPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub session: Option<WebSessionPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub refunds: Option<Vec<RefundPayload>>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub transactions: Option<Vec<TransactionPayload>>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub autobills: Option<Vec<AutoBillPayload>>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub payment_methods: Option<Vec<PaymentMethodPayload>>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub chargebacks: Option<Vec<ChargebackPayload>>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub total_tax: Option<NumericText>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub score: Option<NumericText>,
}

/// The `return` block carried by every well-formed reply.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatus {
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub return_code: Option<NumericText>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub return_string: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub soap_id: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub merchant_transaction_id: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub amount: Option<NumericText>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub account: Option<AccountPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub source_payment_method: Option<PaymentMethodPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub status_log: Option<Vec<TransactionStatusPayload>>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub transaction_items: Option<Vec<TransactionItemPayload>>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub source_ip: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub timestamp: Option<String>,
}

/// One entry of a transaction's status log, newest first.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusPayload {
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItemPayload {
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub price: Option<NumericText>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub quantity: Option<NumericText>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub merchant_account_id: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::secret_string::deserialize")]
    pub email_address: Option<SecretString>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub payment_methods: Option<Vec<PaymentMethodPayload>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingPlanPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub merchant_billing_plan_id: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub periods: Option<Vec<BillingPlanPeriodPayload>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingPlanPeriodPayload {
    #[serde(rename = "type", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub period_type: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub quantity: Option<NumericText>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub prices: Option<Vec<PricePayload>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePayload {
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub amount: Option<NumericText>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub merchant_product_id: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub default_billing_plan: Option<BillingPlanPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub prices: Option<Vec<PricePayload>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBillPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub merchant_auto_bill_id: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub account: Option<AccountPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub billing_plan: Option<BillingPlanPayload>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub items: Option<Vec<AutoBillItemPayload>>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub payment_method: Option<PaymentMethodPayload>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub start_timestamp: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub end_timestamp: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBillItemPayload {
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub product: Option<ProductPayload>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub merchant_payment_method_id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub method_type: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::lenient_bool::deserialize")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub credit_card: Option<CreditCardPayload>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPayload {
    /// Masked account number, e.g. `XXXXXXXXXXXX1111`.
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub account: Option<String>,
    /// Expiration in `YYYYMM` form.
    #[serde(default, deserialize_with = "custom_serde::secret_string::deserialize")]
    pub expiration_date: Option<SecretString>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub amount: Option<NumericText>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub transaction: Option<TransactionPayload>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargebackPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::tolerant::deserialize")]
    pub amount: Option<NumericText>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub reason_code: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub case_number: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub merchant_transaction_id: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub processor_received_timestamp: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub status_changed_timestamp: Option<String>,
}

/// Hosted-order web session. Sessions only ever carry a gateway reference.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSessionPayload {
    #[serde(rename = "VID", default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "custom_serde::scalar_string::deserialize")]
    pub return_url: Option<String>,
}
