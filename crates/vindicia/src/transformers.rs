//! Mapping from wire payload fragments to domain entities.
//!
//! Every conversion is total: a fragment carrying only some of its fields maps
//! to an entity whose remaining fields are `None` or empty.

use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};

use crate::{
    custom_serde::{rfc3339, NumericText},
    payload, types,
};

/// Builds domain entities out of payload fragments.
///
/// The response facade calls these once per cached slot.
pub trait EntityBuilder {
    fn build_transaction(&self, item: &payload::TransactionPayload) -> types::Transaction;
    fn build_customer(&self, item: &payload::AccountPayload) -> types::Customer;
    fn build_plan(&self, item: &payload::BillingPlanPayload) -> types::Plan;
    fn build_product(&self, item: &payload::ProductPayload) -> types::Product;
    fn build_subscription(&self, item: &payload::AutoBillPayload) -> types::Subscription;
    fn build_payment_method(&self, item: &payload::PaymentMethodPayload) -> types::PaymentMethod;
    fn build_refund(&self, item: &payload::RefundPayload) -> types::Refund;
    fn build_chargeback(&self, item: &payload::ChargebackPayload) -> types::Chargeback;
}

/// Builder backed by the `From` conversions in this module.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectMapper;

impl EntityBuilder for ObjectMapper {
    fn build_transaction(&self, item: &payload::TransactionPayload) -> types::Transaction {
        item.into()
    }

    fn build_customer(&self, item: &payload::AccountPayload) -> types::Customer {
        item.into()
    }

    fn build_plan(&self, item: &payload::BillingPlanPayload) -> types::Plan {
        item.into()
    }

    fn build_product(&self, item: &payload::ProductPayload) -> types::Product {
        item.into()
    }

    fn build_subscription(&self, item: &payload::AutoBillPayload) -> types::Subscription {
        item.into()
    }

    fn build_payment_method(&self, item: &payload::PaymentMethodPayload) -> types::PaymentMethod {
        item.into()
    }

    fn build_refund(&self, item: &payload::RefundPayload) -> types::Refund {
        item.into()
    }

    fn build_chargeback(&self, item: &payload::ChargebackPayload) -> types::Chargeback {
        item.into()
    }
}

fn amount(value: Option<&NumericText>) -> Option<f64> {
    value.and_then(NumericText::as_f64)
}

fn prices(items: Option<&Vec<payload::PricePayload>>) -> Vec<types::Price> {
    items
        .map(|prices| prices.iter().map(types::Price::from).collect())
        .unwrap_or_default()
}

impl From<&payload::PricePayload> for types::Price {
    fn from(item: &payload::PricePayload) -> Self {
        Self {
            amount: amount(item.amount.as_ref()),
            currency: item.currency.clone(),
        }
    }
}

impl From<&payload::TransactionItemPayload> for types::TransactionItem {
    fn from(item: &payload::TransactionItemPayload) -> Self {
        Self {
            sku: item.sku.clone(),
            name: item.name.clone(),
            price: amount(item.price.as_ref()),
            quantity: item.quantity.as_ref().and_then(NumericText::as_i64),
        }
    }
}

impl From<&payload::TransactionPayload> for types::Transaction {
    fn from(item: &payload::TransactionPayload) -> Self {
        let latest_status = item
            .status_log
            .as_ref()
            .and_then(|log| log.first())
            .and_then(|entry| entry.status.clone());

        Self {
            id: item.merchant_transaction_id.clone(),
            reference: item.vid.clone(),
            amount: amount(item.amount.as_ref()),
            currency: item.currency.clone(),
            customer_id: item
                .account
                .as_ref()
                .and_then(|account| account.merchant_account_id.clone()),
            customer_reference: item.account.as_ref().and_then(|account| account.vid.clone()),
            payment_method_id: item
                .source_payment_method
                .as_ref()
                .and_then(|method| method.merchant_payment_method_id.clone()),
            payment_method_reference: item
                .source_payment_method
                .as_ref()
                .and_then(|method| method.vid.clone()),
            status: latest_status,
            ip_address: item.source_ip.clone(),
            items: item
                .transaction_items
                .as_ref()
                .map(|items| items.iter().map(types::TransactionItem::from).collect())
                .unwrap_or_default(),
            created_at: rfc3339::parse_optional(item.timestamp.as_deref()),
        }
    }
}

impl From<&payload::AccountPayload> for types::Customer {
    fn from(item: &payload::AccountPayload) -> Self {
        Self {
            id: item.merchant_account_id.clone(),
            reference: item.vid.clone(),
            name: item.name.clone(),
            email: item.email_address.clone(),
            payment_methods: item
                .payment_methods
                .as_ref()
                .map(|methods| methods.iter().map(types::PaymentMethod::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<&payload::BillingPlanPayload> for types::Plan {
    fn from(item: &payload::BillingPlanPayload) -> Self {
        let first_period = item.periods.as_ref().and_then(|periods| periods.first());

        Self {
            id: item.merchant_billing_plan_id.clone(),
            reference: item.vid.clone(),
            description: item.description.clone(),
            status: item.status.clone(),
            interval: first_period.and_then(|period| period.period_type.clone()),
            interval_count: first_period
                .and_then(|period| period.quantity.as_ref())
                .and_then(NumericText::as_i64),
            prices: prices(first_period.and_then(|period| period.prices.as_ref())),
        }
    }
}

impl From<&payload::ProductPayload> for types::Product {
    fn from(item: &payload::ProductPayload) -> Self {
        Self {
            id: item.merchant_product_id.clone(),
            reference: item.vid.clone(),
            description: item.description.clone(),
            status: item.status.clone(),
            default_plan_id: item
                .default_billing_plan
                .as_ref()
                .and_then(|plan| plan.merchant_billing_plan_id.clone()),
            prices: prices(item.prices.as_ref()),
        }
    }
}

impl From<&payload::AutoBillPayload> for types::Subscription {
    fn from(item: &payload::AutoBillPayload) -> Self {
        let product_id = item
            .items
            .as_ref()
            .and_then(|items| items.first())
            .and_then(|entry| entry.product.as_ref())
            .and_then(|product| product.merchant_product_id.clone());

        Self {
            id: item.merchant_auto_bill_id.clone(),
            reference: item.vid.clone(),
            status: item
                .status
                .as_deref()
                .and_then(|status| types::SubscriptionStatus::from_str(status).ok()),
            customer_id: item
                .account
                .as_ref()
                .and_then(|account| account.merchant_account_id.clone()),
            customer_reference: item.account.as_ref().and_then(|account| account.vid.clone()),
            plan_id: item
                .billing_plan
                .as_ref()
                .and_then(|plan| plan.merchant_billing_plan_id.clone()),
            product_id,
            payment_method_id: item
                .payment_method
                .as_ref()
                .and_then(|method| method.merchant_payment_method_id.clone()),
            currency: item.currency.clone(),
            starts_at: rfc3339::parse_optional(item.start_timestamp.as_deref()),
            ends_at: rfc3339::parse_optional(item.end_timestamp.as_deref()),
        }
    }
}

impl From<&payload::CreditCardPayload> for types::CardDetails {
    fn from(item: &payload::CreditCardPayload) -> Self {
        let last_four = item.account.as_deref().and_then(|account| {
            let digits = account.len().checked_sub(4)?;
            account.get(digits..).map(str::to_owned)
        });
        // YYYYMM
        let expiration = item
            .expiration_date
            .as_ref()
            .map(|date| date.expose_secret().as_str())
            .filter(|date| date.len() == 6 && date.chars().all(|c| c.is_ascii_digit()));

        Self {
            last_four,
            expiry_month: expiration
                .and_then(|date| date.get(4..))
                .map(|month| SecretString::new(month.to_owned())),
            expiry_year: expiration
                .and_then(|date| date.get(..4))
                .map(|year| SecretString::new(year.to_owned())),
        }
    }
}

impl From<&payload::PaymentMethodPayload> for types::PaymentMethod {
    fn from(item: &payload::PaymentMethodPayload) -> Self {
        Self {
            id: item.merchant_payment_method_id.clone(),
            reference: item.vid.clone(),
            method_type: item.method_type.clone(),
            active: item.active,
            card: item.credit_card.as_ref().map(types::CardDetails::from),
        }
    }
}

impl From<&payload::RefundPayload> for types::Refund {
    fn from(item: &payload::RefundPayload) -> Self {
        Self {
            reference: item.vid.clone(),
            amount: amount(item.amount.as_ref()),
            currency: item.currency.clone(),
            reason: item.note.clone(),
            status: item.status.clone(),
            transaction_id: item
                .transaction
                .as_ref()
                .and_then(|transaction| transaction.merchant_transaction_id.clone()),
            transaction_reference: item
                .transaction
                .as_ref()
                .and_then(|transaction| transaction.vid.clone()),
            created_at: rfc3339::parse_optional(item.timestamp.as_deref()),
        }
    }
}

impl From<&payload::ChargebackPayload> for types::Chargeback {
    fn from(item: &payload::ChargebackPayload) -> Self {
        Self {
            reference: item.vid.clone(),
            amount: amount(item.amount.as_ref()),
            currency: item.currency.clone(),
            status: item.status.clone(),
            reason_code: item.reason_code.clone(),
            case_number: item.case_number.clone(),
            transaction_id: item.merchant_transaction_id.clone(),
            processor_received_at: rfc3339::parse_optional(
                item.processor_received_timestamp.as_deref(),
            ),
            status_changed_at: rfc3339::parse_optional(item.status_changed_timestamp.as_deref()),
        }
    }
}
