//! Typed access to a single gateway reply.
//!
//! A [`Response`] owns the decoded payload of one call. Entity accessors build
//! their value on first use and hand out the cached value afterwards; each slot
//! is a [`OnceCell`], so concurrent first access still builds only once.

use error_stack::{report, ResultExt};
use once_cell::sync::OnceCell;

use crate::{
    consts,
    custom_serde::NumericText,
    errors::{CustomResult, ResponseError},
    ext_traits::ByteSliceExt,
    logger,
    payload::{ResponsePayload, ReturnStatus},
    transformers::{EntityBuilder, ObjectMapper},
    types,
};

#[derive(Debug)]
pub struct Response<B = ObjectMapper> {
    data: ResponsePayload,
    /// Payment method id declared by the request that produced this reply.
    payment_method_id: Option<String>,
    builder: B,
    transaction: OnceCell<Option<types::Transaction>>,
    customer: OnceCell<Option<types::Customer>>,
    plan: OnceCell<Option<types::Plan>>,
    product: OnceCell<Option<types::Product>>,
    subscription: OnceCell<Option<types::Subscription>>,
    payment_method: OnceCell<Option<types::PaymentMethod>>,
    refunds: OnceCell<Option<Vec<types::Refund>>>,
    transactions: OnceCell<Option<Vec<types::Transaction>>>,
    subscriptions: OnceCell<Option<Vec<types::Subscription>>>,
    payment_methods: OnceCell<Option<Vec<types::PaymentMethod>>>,
    chargebacks: OnceCell<Option<Vec<types::Chargeback>>>,
}

impl Response<ObjectMapper> {
    pub fn new(data: ResponsePayload, payment_method_id: Option<String>) -> Self {
        Self::with_builder(data, payment_method_id, ObjectMapper)
    }

    /// Decode a JSON reply body.
    pub fn from_slice(
        body: &[u8],
        payment_method_id: Option<String>,
    ) -> CustomResult<Self, ResponseError> {
        let data = body
            .parse_struct("ResponsePayload")
            .change_context(ResponseError::ResponseDeserializationFailed)?;
        Ok(Self::new(data, payment_method_id))
    }
}

fn memoize<'a, P, T>(
    cell: &'a OnceCell<Option<T>>,
    fragment: Option<&P>,
    entity: &'static str,
    build: impl FnOnce(&P) -> T,
) -> Option<&'a T> {
    cell.get_or_init(|| {
        fragment.map(|item| {
            logger::debug!(entity, "building entity from response payload");
            build(item)
        })
    })
    .as_ref()
}

fn memoize_all<'a, P, T>(
    cell: &'a OnceCell<Option<Vec<T>>>,
    fragments: Option<&Vec<P>>,
    entity: &'static str,
    build: impl Fn(&P) -> T,
) -> Option<&'a [T]> {
    cell.get_or_init(|| {
        fragments.map(|items| {
            logger::debug!(entity, count = items.len(), "building entities from response payload");
            items.iter().map(&build).collect()
        })
    })
    .as_deref()
}

impl<B> Response<B> {
    pub fn with_builder(data: ResponsePayload, payment_method_id: Option<String>, builder: B) -> Self {
        Self {
            data,
            payment_method_id,
            builder,
            transaction: OnceCell::new(),
            customer: OnceCell::new(),
            plan: OnceCell::new(),
            product: OnceCell::new(),
            subscription: OnceCell::new(),
            payment_method: OnceCell::new(),
            refunds: OnceCell::new(),
            transactions: OnceCell::new(),
            subscriptions: OnceCell::new(),
            payment_methods: OnceCell::new(),
            chargebacks: OnceCell::new(),
        }
    }

    /// Raw decoded payload.
    pub fn data(&self) -> &ResponsePayload {
        &self.data
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn get_declared_payment_method_id(&self) -> Option<&str> {
        self.payment_method_id.as_deref()
    }

    fn get_return_status(&self, field_name: &'static str) -> CustomResult<&ReturnStatus, ResponseError> {
        self.data
            .return_status
            .as_ref()
            .ok_or_else(|| report!(ResponseError::InvalidResponse { field_name }))
    }

    fn get_return_code(&self) -> CustomResult<&NumericText, ResponseError> {
        self.get_return_status("code")?
            .return_code
            .as_ref()
            .ok_or_else(|| report!(ResponseError::InvalidResponse { field_name: "code" }))
    }

    /// Whether the gateway reported success. Fails when the reply carries no code.
    pub fn is_successful(&self) -> CustomResult<bool, ResponseError> {
        Ok(self.get_return_code()?.as_i64() == Some(consts::SUCCESS_CODE))
    }

    /// Status text from the gateway. Fails when absent.
    pub fn get_message(&self) -> CustomResult<&str, ResponseError> {
        self.get_return_status("message")?
            .return_string
            .as_deref()
            .ok_or_else(|| report!(ResponseError::InvalidResponse { field_name: "message" }))
    }

    /// Raw status code from the gateway. Fails when absent.
    pub fn get_code(&self) -> CustomResult<&str, ResponseError> {
        self.get_return_code().map(NumericText::as_str)
    }

    /// SOAP correlation id. Fails when absent.
    pub fn get_soap_id(&self) -> CustomResult<&str, ResponseError> {
        self.get_return_status("soap id")?
            .soap_id
            .as_deref()
            .ok_or_else(|| report!(ResponseError::InvalidResponse { field_name: "soap id" }))
    }

    /// A failed call whose validation code and message point at the card
    /// verification number.
    pub fn is_cvv_validation_failure(&self) -> CustomResult<bool, ResponseError> {
        Ok(!self.is_successful()?
            && consts::VALIDATION_FAILURE_CODES.contains(&self.get_code()?)
            && self.get_message()?.contains(consts::CVN_FAILURE_MARKER))
    }

    /// Status of the autobill, read straight from the payload so it is
    /// available even when the rest of the fragment is unusable.
    pub fn get_subscription_status(&self) -> Option<&str> {
        self.data.autobill.as_ref()?.status.as_deref()
    }

    /// Reference of the hosted web session. Web sessions have no id.
    pub fn get_web_session_reference(&self) -> Option<&str> {
        self.data.session.as_ref()?.vid.as_deref()
    }

    /// Total sales tax, as returned by a sales tax calculation.
    pub fn get_sales_tax(&self) -> Option<f64> {
        let total_tax = self.data.total_tax.as_ref()?;
        let value = total_tax.as_f64();
        if value.is_none() {
            logger::warn!(total_tax = %total_tax, "ignoring non-numeric sales tax");
        }
        value
    }

    /// Estimated chargeback probability from 0 (best) to
    /// [`RISK_SCORE_MAX`](consts::RISK_SCORE_MAX) (worst).
    ///
    /// [`RISK_SCORE_NO_OPINION`](consts::RISK_SCORE_NO_OPINION) means the
    /// gateway has no opinion (missing IP and/or incomplete address);
    /// [`RISK_SCORE_ERROR`](consts::RISK_SCORE_ERROR) means a transient error
    /// and the originating call should be retried later. Scores outside that
    /// range, however large, are clamped into it.
    #[allow(clippy::as_conversions)]
    pub fn get_risk_score(&self) -> Option<i64> {
        let score = self.data.score.as_ref()?;
        match score.as_f64() {
            Some(value) => Some(
                value
                    .trunc()
                    .clamp(consts::RISK_SCORE_ERROR as f64, consts::RISK_SCORE_MAX as f64)
                    as i64,
            ),
            None => {
                logger::warn!(score = %score, "ignoring non-numeric risk score");
                None
            }
        }
    }
}

impl<B: EntityBuilder> Response<B> {
    pub fn get_transaction(&self) -> Option<&types::Transaction> {
        memoize(
            &self.transaction,
            self.data.transaction.as_ref(),
            "transaction",
            |item| self.builder.build_transaction(item),
        )
    }

    /// Gateway reference of the transaction.
    pub fn get_transaction_reference(&self) -> Option<&str> {
        self.get_transaction().and_then(types::Transaction::get_reference)
    }

    /// Merchant id of the transaction. When a new transaction is created the
    /// gateway generates this with the merchant's configured prefix.
    pub fn get_transaction_id(&self) -> Option<&str> {
        self.get_transaction().and_then(types::Transaction::get_id)
    }

    pub fn get_customer(&self) -> Option<&types::Customer> {
        memoize(
            &self.customer,
            self.data.account.as_ref(),
            "customer",
            |item| self.builder.build_customer(item),
        )
    }

    pub fn get_customer_reference(&self) -> Option<&str> {
        self.get_customer().and_then(types::Customer::get_reference)
    }

    pub fn get_customer_id(&self) -> Option<&str> {
        self.get_customer().and_then(types::Customer::get_id)
    }

    pub fn get_plan(&self) -> Option<&types::Plan> {
        memoize(
            &self.plan,
            self.data.billing_plan.as_ref(),
            "plan",
            |item| self.builder.build_plan(item),
        )
    }

    pub fn get_plan_reference(&self) -> Option<&str> {
        self.get_plan().and_then(types::Plan::get_reference)
    }

    pub fn get_plan_id(&self) -> Option<&str> {
        self.get_plan().and_then(types::Plan::get_id)
    }

    pub fn get_product(&self) -> Option<&types::Product> {
        memoize(
            &self.product,
            self.data.product.as_ref(),
            "product",
            |item| self.builder.build_product(item),
        )
    }

    pub fn get_product_reference(&self) -> Option<&str> {
        self.get_product().and_then(types::Product::get_reference)
    }

    pub fn get_product_id(&self) -> Option<&str> {
        self.get_product().and_then(types::Product::get_id)
    }

    pub fn get_subscription(&self) -> Option<&types::Subscription> {
        memoize(
            &self.subscription,
            self.data.autobill.as_ref(),
            "subscription",
            |item| self.builder.build_subscription(item),
        )
    }

    pub fn get_subscription_reference(&self) -> Option<&str> {
        self.get_subscription().and_then(types::Subscription::get_reference)
    }

    pub fn get_subscription_id(&self) -> Option<&str> {
        self.get_subscription().and_then(types::Subscription::get_id)
    }

    /// The payment method this reply is about.
    ///
    /// Falls back to the account's payment methods when the reply has no
    /// top-level payment method: the gateway returns every method on the
    /// account, so the one whose merchant id matches the id declared by the
    /// originating request is selected.
    pub fn get_payment_method(&self) -> Option<&types::PaymentMethod> {
        self.payment_method
            .get_or_init(|| {
                if let Some(item) = self.data.payment_method.as_ref() {
                    logger::debug!(entity = "payment_method", "building entity from response payload");
                    return Some(self.builder.build_payment_method(item));
                }

                let declared_id = self.payment_method_id.as_deref()?;
                let item = self
                    .data
                    .account
                    .as_ref()?
                    .payment_methods
                    .as_ref()?
                    .iter()
                    .find(|method| method.merchant_payment_method_id.as_deref() == Some(declared_id))?;

                logger::debug!(
                    entity = "payment_method",
                    payment_method_id = declared_id,
                    "building entity from account payment methods"
                );
                Some(self.builder.build_payment_method(item))
            })
            .as_ref()
    }

    pub fn get_payment_method_id(&self) -> Option<&str> {
        self.get_payment_method().and_then(types::PaymentMethod::get_id)
    }

    pub fn get_payment_method_reference(&self) -> Option<&str> {
        self.get_payment_method().and_then(types::PaymentMethod::get_reference)
    }

    pub fn get_refunds(&self) -> Option<&[types::Refund]> {
        memoize_all(
            &self.refunds,
            self.data.refunds.as_ref(),
            "refund",
            |item| self.builder.build_refund(item),
        )
    }

    pub fn get_transactions(&self) -> Option<&[types::Transaction]> {
        memoize_all(
            &self.transactions,
            self.data.transactions.as_ref(),
            "transaction",
            |item| self.builder.build_transaction(item),
        )
    }

    pub fn get_subscriptions(&self) -> Option<&[types::Subscription]> {
        memoize_all(
            &self.subscriptions,
            self.data.autobills.as_ref(),
            "subscription",
            |item| self.builder.build_subscription(item),
        )
    }

    pub fn get_payment_methods(&self) -> Option<&[types::PaymentMethod]> {
        memoize_all(
            &self.payment_methods,
            self.data.payment_methods.as_ref(),
            "payment_method",
            |item| self.builder.build_payment_method(item),
        )
    }

    pub fn get_chargebacks(&self) -> Option<&[types::Chargeback]> {
        memoize_all(
            &self.chargebacks,
            self.data.chargebacks.as_ref(),
            "chargeback",
            |item| self.builder.build_chargeback(item),
        )
    }
}
