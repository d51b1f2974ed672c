//! Request bodies for the supported operations.

use secrecy::SecretString;
use serde::Serialize;

use super::GatewayRequest;
use crate::{custom_serde, errors::GatewayError};

const APPLE_PAY_INITIATIVE: &str = "web";
const APPLE_PAY_METHOD_TYPE: &str = "ApplePay";

fn required<T: Clone>(
    value: Option<&T>,
    field_name: &'static str,
) -> Result<T, error_stack::Report<GatewayError>> {
    value
        .cloned()
        .ok_or_else(|| GatewayError::MissingRequiredField { field_name }.into())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePaySessionRequest {
    merchant_identifier: String,
    display_name: String,
    initiative: &'static str,
    initiative_context: String,
}

impl TryFrom<&GatewayRequest> for ApplePaySessionRequest {
    type Error = error_stack::Report<GatewayError>;
    fn try_from(item: &GatewayRequest) -> Result<Self, Self::Error> {
        let apple_pay = &item.settings.apple_pay;
        Ok(Self {
            merchant_identifier: required(
                apple_pay.merchant_identifier.as_ref(),
                "apple_pay.merchant_identifier",
            )?,
            display_name: required(apple_pay.display_name.as_ref(), "apple_pay.display_name")?,
            initiative: APPLE_PAY_INITIATIVE,
            initiative_context: required(apple_pay.domain_name.as_ref(), "apple_pay.domain_name")?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_account_id: Option<String>,
    #[serde(rename = "VID", skip_serializing_if = "Option::is_none")]
    vid: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayToken {
    #[serde(serialize_with = "custom_serde::expose_json")]
    payment_instrument_token: SecretString,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePaymentMethod {
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_payment_method_id: Option<String>,
    #[serde(rename = "type")]
    method_type: &'static str,
    apple_pay: ApplePayToken,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_transaction_id: Option<String>,
    amount: String,
    currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<AccountReference>,
    source_payment_method: SourcePaymentMethod,
}

/// Body of `Transaction.auth`.
#[derive(Debug, Serialize)]
pub struct AuthorizeRequest {
    transaction: AuthorizeTransaction,
}

impl TryFrom<&GatewayRequest> for AuthorizeRequest {
    type Error = error_stack::Report<GatewayError>;
    fn try_from(item: &GatewayRequest) -> Result<Self, Self::Error> {
        let params = &item.parameters;
        let account = (params.customer_id.is_some() || params.customer_reference.is_some()).then(|| {
            AccountReference {
                merchant_account_id: params.customer_id.clone(),
                vid: params.customer_reference.clone(),
            }
        });

        Ok(Self {
            transaction: AuthorizeTransaction {
                merchant_transaction_id: params.transaction_id.clone(),
                amount: required(params.amount.as_ref(), "amount")?,
                currency: required(params.currency.as_ref(), "currency")?,
                account,
                source_payment_method: SourcePaymentMethod {
                    merchant_payment_method_id: params.payment_method_id.clone(),
                    method_type: APPLE_PAY_METHOD_TYPE,
                    apple_pay: ApplePayToken {
                        payment_instrument_token: required(
                            params.apple_pay_token.as_ref(),
                            "apple_pay_token",
                        )?,
                    },
                },
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_transaction_id: Option<String>,
    #[serde(rename = "VID", skip_serializing_if = "Option::is_none")]
    vid: Option<String>,
}

/// Body of `Transaction.capture`.
#[derive(Debug, Serialize)]
pub struct CaptureRequest {
    transactions: Vec<TransactionReference>,
}

impl TryFrom<&GatewayRequest> for CaptureRequest {
    type Error = error_stack::Report<GatewayError>;
    fn try_from(item: &GatewayRequest) -> Result<Self, Self::Error> {
        let params = &item.parameters;
        if params.transaction_id.is_none() && params.transaction_reference.is_none() {
            return Err(GatewayError::MissingRequiredField {
                field_name: "transaction_id",
            }
            .into());
        }

        Ok(Self {
            transactions: vec![TransactionReference {
                merchant_transaction_id: params.transaction_id.clone(),
                vid: params.transaction_reference.clone(),
            }],
        })
    }
}
