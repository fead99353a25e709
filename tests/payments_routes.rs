#![allow(non_snake_case)]

mod common;

use std::str::FromStr;

use axum::http::StatusCode;
use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;

use common::{calls, get, post, record, testApp, TEST_USER_ID};
use loanOffice::commands::{GetLoanPayments, GetPaymentById, MakePayment};
use loanOffice::error::HandlerError;
use loanOffice::models::Payment::{PaymentDto, PaymentPage};
use loanOffice::services::mediator::Mediator;

fn payment(id: i64, loanId: i64, amount: &str) -> PaymentDto {
    return PaymentDto {
        PaymentId: id,
        LoanId: loanId,
        Amount: BigDecimal::from_str(amount).unwrap(),
        Method: "card".to_string(),
        Reference: Some("INV-1".to_string()),
        PaidBy: TEST_USER_ID,
        CreatedAt: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    };
}

#[tokio::test]
async fn make_payment_dispatches_the_body_unchanged() {
    let mut mediator = Mediator::new();
    let made = record::<MakePayment, _>(&mut mediator, |cmd| Ok(payment(31, cmd.LoanId, "125.50")));

    let res = post(
        testApp(mediator),
        "/api/payments",
        json!({ "LoanId": 12, "Amount": "125.50", "Method": "card", "Reference": "INV-1" }),
        true
    ).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, serde_json::to_value(payment(31, 12, "125.50")).unwrap());
    assert_eq!(calls(&made), vec![MakePayment {
        LoanId: 12,
        Amount: BigDecimal::from_str("125.50").unwrap(),
        Method: "card".to_string(),
        Reference: Some("INV-1".to_string()),
        PaidBy: TEST_USER_ID
    }]);
}

#[tokio::test]
async fn make_payment_accepts_numeric_amounts() {
    let mut mediator = Mediator::new();
    let made = record::<MakePayment, _>(&mut mediator, |cmd| Ok(payment(1, cmd.LoanId, "80")));

    let res = post(testApp(mediator), "/api/payments", json!({ "LoanId": 3, "Amount": 80, "Method": "cash" }), true).await;

    assert_eq!(res.status, StatusCode::OK);
    let made = calls(&made);
    assert_eq!(made[0].Amount, BigDecimal::from(80));
    assert!(made[0].Reference.is_none());
}

#[rstest]
#[case::missing_loan(json!({ "Amount": "10.00", "Method": "card" }), "LoanId")]
#[case::missing_amount(json!({ "LoanId": 4, "Method": "card" }), "Amount")]
#[case::missing_method(json!({ "LoanId": 4, "Amount": "10.00" }), "Method")]
#[case::negative_amount(json!({ "LoanId": 4, "Amount": "-1", "Method": "card" }), "Amount")]
#[case::sub_cent_amount(json!({ "LoanId": 1, "Amount": "0.001", "Method": "card" }), "Amount")]
#[case::rounded_amount(json!({ "LoanId": 1, "Amount": "1.005", "Method": "card" }), "Amount")]
#[case::oversized_amount(json!({ "LoanId": 1, "Amount": "1000000000000", "Method": "card" }), "Amount")]
#[case::long_method(json!({ "LoanId": 1, "Amount": "5", "Method": "m".repeat(65) }), "Method")]
#[case::long_reference(json!({ "LoanId": 1, "Amount": "5", "Method": "card", "Reference": "r".repeat(200) }), "Reference")]
#[tokio::test]
async fn invalid_payment_is_rejected_before_dispatch(#[case] body: serde_json::Value, #[case] field: &str) {
    let mut mediator = Mediator::new();
    let made = record::<MakePayment, _>(&mut mediator, |cmd| Ok(payment(1, cmd.LoanId, "1")));

    let res = post(testApp(mediator), "/api/payments", body, true).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["Success"], false);
    assert!(res.body["Errors"].get(field).is_some(), "expected an error for {} in {}", field, res.raw);
    assert!(calls(&made).is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let mut mediator = Mediator::new();
    let made = record::<MakePayment, _>(&mut mediator, |cmd| Ok(payment(1, cmd.LoanId, "1")));

    let res = post(testApp(mediator), "/api/payments", json!({ "LoanId": "twelve" }), true).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["Success"], false);
    assert!(calls(&made).is_empty());
}

#[tokio::test]
async fn make_payment_requires_a_session() {
    let mut mediator = Mediator::new();
    let made = record::<MakePayment, _>(&mut mediator, |cmd| Ok(payment(1, cmd.LoanId, "1")));

    let res = post(testApp(mediator), "/api/payments", json!({ "LoanId": 12, "Amount": "5", "Method": "card" }), false).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["Success"], false);
    assert!(calls(&made).is_empty());
}

#[rstest]
#[case::rejected(HandlerError::Rejected("Loan 12 cannot take payments while approved".into()), StatusCode::BAD_REQUEST)]
#[case::unknown_loan(HandlerError::NotFound("Loan 12 not found".into()), StatusCode::NOT_FOUND)]
#[tokio::test]
async fn handler_failures_keep_their_message(#[case] failure: HandlerError, #[case] status: StatusCode) {
    let message = failure.to_string();
    let failure = std::sync::Mutex::new(Some(failure));
    let mut mediator = Mediator::new();
    record::<MakePayment, _>(&mut mediator, move |_| Err(failure.lock().unwrap().take().unwrap()));

    let res = post(testApp(mediator), "/api/payments", json!({ "LoanId": 12, "Amount": "5", "Method": "card" }), true).await;

    assert_eq!(res.status, status);
    assert_eq!(res.body["Message"], message);
}

#[tokio::test]
async fn unexpected_failures_do_not_leak_details() {
    let mut mediator = Mediator::new();
    record::<MakePayment, _>(&mut mediator, |_| Err(HandlerError::DbError(sqlx::Error::PoolTimedOut)));

    let res = post(testApp(mediator), "/api/payments", json!({ "LoanId": 12, "Amount": "5", "Method": "card" }), true).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["Success"], false);
    let message = res.body["Message"].as_str().unwrap();
    assert!(message.contains("Reference: ERR-"));
    assert!(!message.to_lowercase().contains("pool"));
}

#[tokio::test]
async fn missing_handler_is_a_server_error() {
    let res = post(testApp(Mediator::new()), "/api/payments", json!({ "LoanId": 12, "Amount": "5", "Method": "card" }), true).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn get_payment_is_repeatable() {
    let mut mediator = Mediator::new();
    let lookups = record::<GetPaymentById, _>(&mut mediator, |query| Ok(payment(query.PaymentId, 12, "40.00")));
    let app = testApp(mediator);

    let first = get(app.clone(), "/api/payments/31", false).await;
    let second = get(app, "/api/payments/31", false).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
    assert_eq!(first.body["PaymentId"], 31);
    assert_eq!(calls(&lookups), vec![GetPaymentById { PaymentId: 31 }, GetPaymentById { PaymentId: 31 }]);
}

#[tokio::test]
async fn unknown_payment_is_not_found() {
    let mut mediator = Mediator::new();
    record::<GetPaymentById, _>(&mut mediator, |query| Err(HandlerError::NotFound(format!("Payment {} not found", query.PaymentId))));

    let res = get(testApp(mediator), "/api/payments/99", false).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["Message"], "Payment 99 not found");
}

#[tokio::test]
async fn non_numeric_payment_id_is_a_client_error() {
    let mut mediator = Mediator::new();
    let lookups = record::<GetPaymentById, _>(&mut mediator, |query| Ok(payment(query.PaymentId, 12, "40.00")));

    let res = get(testApp(mediator), "/api/payments/abc", false).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(calls(&lookups).is_empty());
}

fn page(query: &GetLoanPayments) -> PaymentPage {
    return PaymentPage { LoanId: query.LoanId, Page: query.Page, Limit: query.Limit, TotalCount: 0, Items: vec![] };
}

#[rstest]
#[case::explicit("/api/payments/loans/9?page=2&limit=5", GetLoanPayments { LoanId: 9, Page: 2, Limit: 5 })]
#[case::defaults("/api/payments/loans/9", GetLoanPayments { LoanId: 9, Page: 1, Limit: 10 })]
#[case::clamped("/api/payments/loans/9?limit=1000", GetLoanPayments { LoanId: 9, Page: 1, Limit: 100 })]
#[tokio::test]
async fn loan_payments_query_carries_paging(#[case] uri: &str, #[case] expected: GetLoanPayments) {
    let mut mediator = Mediator::new();
    let queries = record::<GetLoanPayments, _>(&mut mediator, |query| Ok(page(query)));

    let res = get(testApp(mediator), uri, false).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["Page"], expected.Page);
    assert_eq!(calls(&queries), vec![expected]);
}

#[rstest]
#[case("/api/payments/loans/9?page=0")]
#[case("/api/payments/loans/9?limit=-3")]
#[case("/api/payments/loans/9?page=two")]
#[case("/api/payments/loans/9?page=9223372036854775807&limit=100")]
#[tokio::test]
async fn bad_paging_is_rejected_before_dispatch(#[case] uri: &str) {
    let mut mediator = Mediator::new();
    let queries = record::<GetLoanPayments, _>(&mut mediator, |query| Ok(page(query)));

    let res = get(testApp(mediator), uri, false).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(calls(&queries).is_empty());
}
