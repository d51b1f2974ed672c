#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{json, Value};
use vindicia::{
    consts,
    errors::{CustomResult, ResponseError},
    payload::{self, ResponsePayload},
    types, EntityBuilder, ObjectMapper, Response,
};

/// Delegates to [`ObjectMapper`] and counts every build.
#[derive(Debug, Default)]
struct CountingBuilder {
    builds: AtomicUsize,
}

impl CountingBuilder {
    fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.builds.fetch_add(1, Ordering::SeqCst);
    }
}

impl EntityBuilder for CountingBuilder {
    fn build_transaction(&self, item: &payload::TransactionPayload) -> types::Transaction {
        self.count();
        ObjectMapper.build_transaction(item)
    }

    fn build_customer(&self, item: &payload::AccountPayload) -> types::Customer {
        self.count();
        ObjectMapper.build_customer(item)
    }

    fn build_plan(&self, item: &payload::BillingPlanPayload) -> types::Plan {
        self.count();
        ObjectMapper.build_plan(item)
    }

    fn build_product(&self, item: &payload::ProductPayload) -> types::Product {
        self.count();
        ObjectMapper.build_product(item)
    }

    fn build_subscription(&self, item: &payload::AutoBillPayload) -> types::Subscription {
        self.count();
        ObjectMapper.build_subscription(item)
    }

    fn build_payment_method(&self, item: &payload::PaymentMethodPayload) -> types::PaymentMethod {
        self.count();
        ObjectMapper.build_payment_method(item)
    }

    fn build_refund(&self, item: &payload::RefundPayload) -> types::Refund {
        self.count();
        ObjectMapper.build_refund(item)
    }

    fn build_chargeback(&self, item: &payload::ChargebackPayload) -> types::Chargeback {
        self.count();
        ObjectMapper.build_chargeback(item)
    }
}

fn payload(value: Value) -> ResponsePayload {
    serde_json::from_value(value).expect("valid payload fixture")
}

fn response(value: Value) -> Response {
    Response::new(payload(value), None)
}

fn status(code: &str, message: &str) -> Value {
    json!({ "returnCode": code, "returnString": message, "soapId": "soap-1" })
}

fn assert_invalid_response<T: std::fmt::Debug>(
    result: CustomResult<T, ResponseError>,
    expected_field: &str,
) {
    let error = result.unwrap_err();
    match error.current_context() {
        ResponseError::InvalidResponse { field_name } => assert_eq!(*field_name, expected_field),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn success_code_is_successful() {
    let response = response(json!({ "return": status("200", "OK") }));

    assert!(response.is_successful().unwrap());
    assert_eq!(response.get_code().unwrap(), "200");
    assert_eq!(response.get_message().unwrap(), "OK");
    assert_eq!(response.get_soap_id().unwrap(), "soap-1");
}

#[test]
fn any_other_code_is_unsuccessful() {
    for code in ["400", "404", "408", "500", "201"] {
        let response = response(json!({ "return": status(code, "Failure") }));
        assert!(!response.is_successful().unwrap(), "code {code}");
    }
}

#[test]
fn missing_status_block_fails_every_status_accessor() {
    let response = response(json!({ "transaction": { "VID": "vid-1" } }));

    assert_invalid_response(response.get_code(), "code");
    assert_invalid_response(response.get_message(), "message");
    assert_invalid_response(response.is_successful(), "code");
    assert_invalid_response(response.get_soap_id(), "soap id");
    assert_invalid_response(response.is_cvv_validation_failure(), "code");

    // entity accessors still work
    assert_eq!(response.get_transaction_reference(), Some("vid-1"));
}

#[test]
fn cvv_failure_needs_all_three_conditions() {
    let cases = [
        ("408", "CVN check failed", true),
        ("409", "Failed CVN match", true),
        ("408", "Invalid account", false),
        ("400", "CVN check failed", false),
        ("200", "CVN check failed", false),
    ];

    for (code, message, expected) in cases {
        let response = response(json!({ "return": status(code, message) }));
        assert_eq!(
            response.is_cvv_validation_failure().unwrap(),
            expected,
            "code {code}, message {message:?}"
        );
    }
}

#[test]
fn entity_accessors_build_once() {
    let response = Response::with_builder(
        payload(json!({
            "return": status("200", "OK"),
            "transaction": { "VID": "vid-txn", "merchantTransactionId": "txn-1" },
            "account": { "VID": "vid-acct", "merchantAccountId": "cust-1" },
            "autobill": { "VID": "vid-ab", "merchantAutoBillId": "sub-1", "status": "Active" },
        })),
        None,
        CountingBuilder::default(),
    );

    let first = response.get_transaction().cloned();
    let second = response.get_transaction().cloned();
    assert_eq!(first, second);
    assert_eq!(response.get_transaction_id(), Some("txn-1"));
    assert_eq!(response.get_transaction_reference(), Some("vid-txn"));
    assert_eq!(response.builder().builds(), 1);

    assert_eq!(response.get_customer_id(), Some("cust-1"));
    assert_eq!(response.get_customer_reference(), Some("vid-acct"));
    assert_eq!(response.get_subscription_id(), Some("sub-1"));
    assert_eq!(response.get_subscription_reference(), Some("vid-ab"));
    assert!(response.get_subscription().is_some());
    assert_eq!(response.builder().builds(), 3);
}

#[test]
fn collection_accessors_build_once() {
    let response = Response::with_builder(
        payload(json!({
            "refunds": [{ "VID": "rf-1" }, { "VID": "rf-2" }],
        })),
        None,
        CountingBuilder::default(),
    );

    assert_eq!(response.get_refunds().map(<[_]>::len), Some(2));
    assert_eq!(response.get_refunds().map(<[_]>::len), Some(2));
    assert_eq!(response.builder().builds(), 2);
}

#[test]
fn absent_entities_do_not_build() {
    let response = Response::with_builder(
        payload(json!({ "return": status("200", "OK") })),
        Some("pm-1".to_owned()),
        CountingBuilder::default(),
    );

    assert!(response.get_transaction().is_none());
    assert!(response.get_customer().is_none());
    assert!(response.get_plan().is_none());
    assert!(response.get_product().is_none());
    assert!(response.get_subscription().is_none());
    assert!(response.get_payment_method().is_none());
    assert!(response.get_plan_id().is_none());
    assert!(response.get_product_reference().is_none());
    assert!(response.get_payment_method_id().is_none());
    assert!(response.get_subscription_status().is_none());
    assert!(response.get_sales_tax().is_none());
    assert!(response.get_risk_score().is_none());
    assert_eq!(response.builder().builds(), 0);
}

#[test]
fn omitted_and_empty_collections_are_distinct() {
    let empty = response(json!({
        "refunds": [],
        "transactions": [],
        "autobills": [],
        "paymentMethods": [],
        "chargebacks": [],
    }));
    let omitted = response(json!({}));

    assert_eq!(empty.get_refunds().map(<[_]>::len), Some(0));
    assert_eq!(empty.get_transactions().map(<[_]>::len), Some(0));
    assert_eq!(empty.get_subscriptions().map(<[_]>::len), Some(0));
    assert_eq!(empty.get_payment_methods().map(<[_]>::len), Some(0));
    assert_eq!(empty.get_chargebacks().map(<[_]>::len), Some(0));

    assert!(omitted.get_refunds().is_none());
    assert!(omitted.get_transactions().is_none());
    assert!(omitted.get_subscriptions().is_none());
    assert!(omitted.get_payment_methods().is_none());
    assert!(omitted.get_chargebacks().is_none());
}

#[test]
fn null_collection_is_treated_as_omitted() {
    let response = response(json!({ "chargebacks": null }));
    assert!(response.get_chargebacks().is_none());
}

#[test]
fn collections_keep_payload_order() {
    let response = response(json!({
        "transactions": [
            { "merchantTransactionId": "txn-3" },
            { "merchantTransactionId": "txn-1" },
            { "merchantTransactionId": "txn-2" }
        ],
        "chargebacks": [{ "VID": "cb-2" }, { "VID": "cb-1" }],
    }));

    let ids: Vec<_> = response
        .get_transactions()
        .unwrap()
        .iter()
        .map(|transaction| transaction.get_id().unwrap())
        .collect();
    assert_eq!(ids, ["txn-3", "txn-1", "txn-2"]);

    let references: Vec<_> = response
        .get_chargebacks()
        .unwrap()
        .iter()
        .map(|chargeback| chargeback.get_reference().unwrap())
        .collect();
    assert_eq!(references, ["cb-2", "cb-1"]);
}

#[test]
fn subscriptions_and_payment_methods_keep_order_and_build_once() {
    let response = Response::with_builder(
        payload(json!({
            "autobills": [
                { "merchantAutoBillId": "sub-2", "status": "Active" },
                { "merchantAutoBillId": "sub-1", "status": "Cancelled" }
            ],
            "paymentMethods": [
                { "merchantPaymentMethodId": "pm-b", "type": "ApplePay" },
                { "merchantPaymentMethodId": "pm-a", "type": "CreditCard" },
                { "merchantPaymentMethodId": "pm-c", "type": "PayPal" }
            ],
        })),
        None,
        CountingBuilder::default(),
    );

    let subscriptions: Vec<_> = response
        .get_subscriptions()
        .unwrap()
        .iter()
        .map(|subscription| subscription.get_id().unwrap())
        .collect();
    assert_eq!(subscriptions, ["sub-2", "sub-1"]);
    assert_eq!(response.builder().builds(), 2);

    let methods: Vec<_> = response
        .get_payment_methods()
        .unwrap()
        .iter()
        .map(|method| method.get_id().unwrap())
        .collect();
    assert_eq!(methods, ["pm-b", "pm-a", "pm-c"]);
    assert_eq!(response.builder().builds(), 5);

    assert_eq!(response.get_subscriptions().map(<[_]>::len), Some(2));
    assert_eq!(response.get_payment_methods().map(<[_]>::len), Some(3));
    assert_eq!(response.builder().builds(), 5);
}

#[test]
fn mistyped_nested_fields_leave_the_status_readable() {
    let response = Response::from_slice(
        br#"{
            "return": { "returnCode": 200, "returnString": "OK", "soapId": "soap-1" },
            "transaction": { "VID": "vid-txn", "merchantTransactionId": 12345 },
            "account": {
                "merchantAccountId": "cust-1",
                "paymentMethods": [{ "merchantPaymentMethodId": "pm-1", "active": "true" }]
            },
            "score": { "value": 10 }
        }"#,
        Some("pm-1".to_owned()),
    )
    .unwrap();

    assert!(response.is_successful().unwrap());
    assert_eq!(response.get_code().unwrap(), "200");
    assert_eq!(response.get_soap_id().unwrap(), "soap-1");
    assert_eq!(response.get_transaction_id(), Some("12345"));
    assert_eq!(
        response.get_payment_method().and_then(|method| method.active),
        Some(true)
    );
    assert!(response.get_risk_score().is_none());
}

#[test]
fn payment_method_falls_back_to_the_declared_account_method() {
    let response = Response::with_builder(
        payload(json!({
            "return": status("200", "OK"),
            "account": {
                "merchantAccountId": "cust-1",
                "paymentMethods": [
                    { "VID": "vid-pm-1", "merchantPaymentMethodId": "pm-1" },
                    { "VID": "vid-pm-2", "merchantPaymentMethodId": "pm-2" },
                    { "VID": "vid-pm-3", "merchantPaymentMethodId": "pm-3" }
                ]
            }
        })),
        Some("pm-2".to_owned()),
        CountingBuilder::default(),
    );

    assert_eq!(response.get_payment_method_id(), Some("pm-2"));
    assert_eq!(response.get_payment_method_reference(), Some("vid-pm-2"));
    assert_eq!(response.builder().builds(), 1);
}

#[test]
fn payment_method_fallback_without_match_is_absent() {
    let account = json!({
        "account": {
            "paymentMethods": [{ "merchantPaymentMethodId": "pm-1" }]
        }
    });

    let unmatched = Response::new(payload(account.clone()), Some("pm-9".to_owned()));
    let undeclared = Response::new(payload(account), None);

    assert!(unmatched.get_payment_method().is_none());
    assert!(undeclared.get_payment_method().is_none());
}

#[test]
fn top_level_payment_method_wins_over_account_lookup() {
    let response = Response::new(
        payload(json!({
            "paymentMethod": { "VID": "vid-top", "merchantPaymentMethodId": "pm-top" },
            "account": {
                "paymentMethods": [{ "VID": "vid-acct", "merchantPaymentMethodId": "pm-1" }]
            }
        })),
        Some("pm-1".to_owned()),
    );

    assert_eq!(response.get_payment_method_reference(), Some("vid-top"));
}

#[test]
fn subscription_status_is_read_from_the_raw_fragment() {
    let response = response(json!({
        "autobill": { "status": "Pending Cancel", "startTimestamp": "garbage" }
    }));

    assert_eq!(response.get_subscription_status(), Some("Pending Cancel"));
    assert_eq!(
        response.get_subscription().and_then(|sub| sub.status.clone()),
        Some(types::SubscriptionStatus::PendingCancel)
    );
    assert!(response.get_subscription_id().is_none());
}

#[test]
fn risk_score_round_trips_sentinels() {
    assert_eq!(
        response(json!({ "score": "-1" })).get_risk_score(),
        Some(consts::RISK_SCORE_NO_OPINION)
    );
    assert_eq!(
        response(json!({ "score": "-2" })).get_risk_score(),
        Some(consts::RISK_SCORE_ERROR)
    );
    assert_eq!(response(json!({ "score": 37 })).get_risk_score(), Some(37));
    assert_eq!(response(json!({})).get_risk_score(), None);
}

#[test]
fn web_session_reference() {
    let with_session = response(json!({ "session": { "VID": "vid-session", "returnUrl": "https://example.com" } }));
    let without_session = response(json!({}));

    assert_eq!(with_session.get_web_session_reference(), Some("vid-session"));
    assert!(without_session.get_web_session_reference().is_none());
}

#[test]
fn sales_tax() {
    assert_eq!(response(json!({ "totalTax": "2.50" })).get_sales_tax(), Some(2.5));
}

#[test]
fn plan_and_product_projections() {
    let response = response(json!({
        "billingPlan": { "VID": "vid-plan", "merchantBillingPlanId": "plan-1" },
        "product": { "VID": "vid-prod", "merchantProductId": "prod-1" }
    }));

    assert_eq!(response.get_plan_id(), Some("plan-1"));
    assert_eq!(response.get_plan_reference(), Some("vid-plan"));
    assert_eq!(response.get_product_id(), Some("prod-1"));
    assert_eq!(response.get_product_reference(), Some("vid-prod"));
}

#[test]
fn concurrent_first_access_builds_once() {
    let response = Response::with_builder(
        payload(json!({ "transaction": { "VID": "vid-txn" } })),
        None,
        CountingBuilder::default(),
    );

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                assert_eq!(response.get_transaction_reference(), Some("vid-txn"));
            });
        }
    });

    assert_eq!(response.builder().builds(), 1);
}
