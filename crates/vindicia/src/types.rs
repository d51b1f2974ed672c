//! Domain entities materialized from gateway replies.
//!
//! Entities are immutable values. `id` is always the identifier the merchant
//! supplied in the request; `reference` is always the gateway-assigned `VID`
//! and is only known once a call has succeeded.

use std::fmt;

use secrecy::SecretString;
use strum::EnumString;
use time::OffsetDateTime;

/// An amount together with its currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Price {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionItem {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: Option<String>,
    pub reference: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub customer_id: Option<String>,
    pub customer_reference: Option<String>,
    pub payment_method_id: Option<String>,
    pub payment_method_reference: Option<String>,
    /// Most recent entry of the status log.
    pub status: Option<String>,
    pub ip_address: Option<String>,
    pub items: Vec<TransactionItem>,
    pub created_at: Option<OffsetDateTime>,
}

impl Transaction {
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

#[derive(Clone, Debug)]
pub struct Customer {
    pub id: Option<String>,
    pub reference: Option<String>,
    pub name: Option<String>,
    pub email: Option<SecretString>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl Customer {
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub id: Option<String>,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    /// Billing period unit of the first period, e.g. `Month`.
    pub interval: Option<String>,
    pub interval_count: Option<i64>,
    pub prices: Vec<Price>,
}

impl Plan {
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: Option<String>,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub default_plan_id: Option<String>,
    pub prices: Vec<Price>,
}

impl Product {
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Lifecycle state of an autobill.
#[derive(Clone, Debug, PartialEq, Eq, EnumString)]
pub enum SubscriptionStatus {
    #[strum(serialize = "Pending Activation")]
    PendingActivation,
    #[strum(serialize = "Active")]
    Active,
    #[strum(serialize = "Pending Cancel")]
    PendingCancel,
    #[strum(serialize = "Pending Customer Action")]
    PendingCustomerAction,
    #[strum(serialize = "Cancelled")]
    Cancelled,
    #[strum(serialize = "Stopped")]
    Stopped,
    #[strum(serialize = "Upgraded")]
    Upgraded,
    #[strum(serialize = "Legacy Suspended")]
    LegacySuspended,
    /// A state this client does not know about yet.
    #[strum(default)]
    Unknown(String),
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PendingActivation => "Pending Activation",
            Self::Active => "Active",
            Self::PendingCancel => "Pending Cancel",
            Self::PendingCustomerAction => "Pending Customer Action",
            Self::Cancelled => "Cancelled",
            Self::Stopped => "Stopped",
            Self::Upgraded => "Upgraded",
            Self::LegacySuspended => "Legacy Suspended",
            Self::Unknown(status) => status,
        }
    }

    /// Whether the autobill will still bill the customer.
    pub fn is_billing(&self) -> bool {
        matches!(
            self,
            Self::Active | Self::PendingCancel | Self::PendingCustomerAction
        )
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subscription {
    pub id: Option<String>,
    pub reference: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub customer_id: Option<String>,
    pub customer_reference: Option<String>,
    pub plan_id: Option<String>,
    pub product_id: Option<String>,
    pub payment_method_id: Option<String>,
    pub currency: Option<String>,
    pub starts_at: Option<OffsetDateTime>,
    pub ends_at: Option<OffsetDateTime>,
}

impl Subscription {
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Card data safe to keep around. The expiry is redacted from `Debug` output.
#[derive(Clone, Debug)]
pub struct CardDetails {
    pub last_four: Option<String>,
    pub expiry_month: Option<SecretString>,
    pub expiry_year: Option<SecretString>,
}

#[derive(Clone, Debug)]
pub struct PaymentMethod {
    pub id: Option<String>,
    pub reference: Option<String>,
    /// Gateway payment method type, e.g. `CreditCard`, `PayPal`, `ApplePay`.
    pub method_type: Option<String>,
    pub active: Option<bool>,
    pub card: Option<CardDetails>,
}

impl PaymentMethod {
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// A refund. Refunds carry gateway-assigned data only.
#[derive(Clone, Debug, PartialEq)]
pub struct Refund {
    pub reference: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
    pub transaction_id: Option<String>,
    pub transaction_reference: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

impl Refund {
    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// A chargeback. Chargebacks carry gateway-assigned data only.
#[derive(Clone, Debug, PartialEq)]
pub struct Chargeback {
    pub reference: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub reason_code: Option<String>,
    pub case_number: Option<String>,
    pub transaction_id: Option<String>,
    pub processor_received_at: Option<OffsetDateTime>,
    pub status_changed_at: Option<OffsetDateTime>,
}

impl Chargeback {
    pub fn get_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}
