//! Outbound side of the client: operations, request parameters and the Apple
//! Pay gateway. Sending a request is left to the caller's transport.

pub mod requests;

use error_stack::{report, ResultExt};
use secrecy::SecretString;
use serde::Deserialize;

use crate::{
    configs::GatewaySettings,
    consts, custom_serde,
    errors::{CustomResult, GatewayError, ResponseError},
    logger,
    response::Response,
};

/// Gateway call a request performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Operation {
    /// Merchant validation with Apple, posted to the validation URL handed out
    /// by Apple Pay JS.
    ApplePaySession,
    /// `Transaction.auth`
    Authorize,
    /// `Transaction.capture`
    Capture,
}

impl Operation {
    /// SOAP object and method, `None` for calls that do not go to the gateway.
    pub fn soap_call(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::ApplePaySession => None,
            Self::Authorize => Some(("Transaction", "auth")),
            Self::Capture => Some(("Transaction", "capture")),
        }
    }
}

/// Parameters accepted by the gateway operations. Each operation reads the
/// subset it needs.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentParameters {
    pub transaction_id: Option<String>,
    pub transaction_reference: Option<String>,
    /// Decimal amount as a string, e.g. `"10.00"`.
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub customer_id: Option<String>,
    pub customer_reference: Option<String>,
    pub payment_method_id: Option<String>,
    /// Opaque payment token produced by Apple Pay, as the serialized JSON
    /// document handed out by Apple Pay JS.
    #[serde(default, deserialize_with = "custom_serde::secret_json::deserialize")]
    pub apple_pay_token: Option<SecretString>,
    pub validation_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct GatewayRequest {
    operation: Operation,
    parameters: PaymentParameters,
    settings: GatewaySettings,
}

impl GatewayRequest {
    pub fn new(operation: Operation, parameters: PaymentParameters, settings: GatewaySettings) -> Self {
        Self {
            operation,
            parameters,
            settings,
        }
    }

    pub fn get_operation(&self) -> Operation {
        self.operation
    }

    pub fn get_parameters(&self) -> &PaymentParameters {
        &self.parameters
    }

    pub fn get_settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Payment method id this request operates on; used to pick the right
    /// payment method out of the reply.
    pub fn get_payment_method_id(&self) -> Option<&str> {
        self.parameters.payment_method_id.as_deref()
    }

    /// URL the request must be posted to.
    pub fn get_url(&self) -> CustomResult<String, GatewayError> {
        match self.operation.soap_call() {
            Some((object, method)) => Ok(format!(
                "{}/v{}/{object}.{method}",
                self.settings.endpoint(),
                self.settings.api_version.replace('.', "_"),
            )),
            None => self.parameters.validation_url.clone().ok_or_else(|| {
                report!(GatewayError::MissingRequiredField {
                    field_name: "validation_url",
                })
            }),
        }
    }

    /// JSON body handed to the transport.
    pub fn get_request_body(&self) -> CustomResult<serde_json::Value, GatewayError> {
        let body = match self.operation {
            Operation::ApplePaySession => {
                serde_json::to_value(requests::ApplePaySessionRequest::try_from(self)?)
            }
            Operation::Authorize => serde_json::to_value(requests::AuthorizeRequest::try_from(self)?),
            Operation::Capture => serde_json::to_value(requests::CaptureRequest::try_from(self)?),
        };

        body.change_context(GatewayError::RequestEncodingFailed)
            .attach_printable_lazy(|| format!("Unable to encode {} request", self.operation))
    }

    /// Wrap the transport's decoded reply for typed access.
    pub fn build_response(&self, body: &[u8]) -> CustomResult<Response, ResponseError> {
        logger::debug!(operation = %self.operation, "building response for gateway reply");
        Response::from_slice(body, self.parameters.payment_method_id.clone())
    }
}

/// Apple Pay flavour of the gateway.
#[derive(Clone, Debug, Default)]
pub struct ApplePayGateway {
    settings: GatewaySettings,
}

impl ApplePayGateway {
    pub fn new(settings: GatewaySettings) -> Self {
        Self { settings }
    }

    pub fn name(&self) -> &'static str {
        consts::APPLE_PAY_GATEWAY_NAME
    }

    /// Start an Apple Pay purchase by validating the merchant with Apple.
    pub fn authorize(&self, parameters: PaymentParameters) -> GatewayRequest {
        self.create_request(Operation::ApplePaySession, parameters)
    }

    /// Authorize the Apple Pay payment token with the gateway.
    pub fn complete_authorize(&self, parameters: PaymentParameters) -> GatewayRequest {
        self.create_request(Operation::Authorize, parameters)
    }

    /// Capture a previously authorized Apple Pay purchase.
    pub fn capture(&self, parameters: PaymentParameters) -> GatewayRequest {
        self.create_request(Operation::Capture, parameters)
    }

    fn create_request(&self, operation: Operation, parameters: PaymentParameters) -> GatewayRequest {
        GatewayRequest::new(operation, parameters, self.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::configs::Environment;

    #[test]
    fn soap_url_includes_version_and_call() {
        let request = ApplePayGateway::default().capture(PaymentParameters::default());
        assert_eq!(
            request.get_url().unwrap(),
            format!("{}/v18_0/Transaction.capture", consts::SANDBOX_ENDPOINT)
        );
    }

    #[test]
    fn production_settings_change_the_endpoint() {
        let settings = GatewaySettings {
            environment: Environment::Production,
            ..GatewaySettings::default()
        };
        let request = ApplePayGateway::new(settings).complete_authorize(PaymentParameters::default());
        assert!(request.get_url().unwrap().starts_with(consts::PRODUCTION_ENDPOINT));
    }

    #[test]
    fn apple_session_posts_to_validation_url() {
        let gateway = ApplePayGateway::default();
        let request = gateway.authorize(PaymentParameters {
            validation_url: Some("https://apple-pay-gateway.apple.com/paymentservices/startSession".to_owned()),
            ..PaymentParameters::default()
        });
        assert_eq!(
            request.get_url().unwrap(),
            "https://apple-pay-gateway.apple.com/paymentservices/startSession"
        );

        let missing = gateway.authorize(PaymentParameters::default()).get_url().unwrap_err();
        assert!(matches!(
            missing.current_context(),
            GatewayError::MissingRequiredField { field_name: "validation_url" }
        ));
    }

    #[test]
    fn gateway_name() {
        assert_eq!(ApplePayGateway::default().name(), "Vindicia Apple Pay");
    }

    #[test]
    fn response_carries_the_declared_payment_method_id() {
        let request = ApplePayGateway::default().complete_authorize(PaymentParameters {
            payment_method_id: Some("pm-9".to_owned()),
            ..PaymentParameters::default()
        });
        let response = request
            .build_response(br#"{"return":{"returnCode":"200","returnString":"OK","soapId":"s-1"}}"#)
            .unwrap();

        assert_eq!(response.get_declared_payment_method_id(), Some("pm-9"));
        assert!(response.is_successful().unwrap());
    }
}
