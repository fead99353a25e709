#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

//Commands and queries sent through the mediator. Fields are carried exactly as validated by the routes.

use bigdecimal::BigDecimal;

use crate::{models::{ApiResponse::ApiResponse, CashFlow::MonthlyCashFlowDto, Disbursement::DisbursementDto, Payment::{PaymentDto, PaymentPage}}, services::mediator::Request};

#[derive(Debug, Clone, PartialEq)]
pub struct MakePayment {
    pub LoanId: i64,
    pub Amount: BigDecimal,
    pub Method: String,
    pub Reference: Option<String>,
    pub PaidBy: i64 //user id from the session
}

impl Request for MakePayment {
    type Response = PaymentDto;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetPaymentById {
    pub PaymentId: i64
}

impl Request for GetPaymentById {
    type Response = PaymentDto;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetLoanPayments {
    pub LoanId: i64,
    pub Page: i64,
    pub Limit: i64
}

impl Request for GetLoanPayments {
    type Response = PaymentPage;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisburseLoan {
    pub LoanId: i64,
    pub DisbursedBy: String,
    pub Method: String,
    pub Reference: Option<String>,
    pub RequestedBy: i64 //user id from the session
}

impl Request for DisburseLoan {
    type Response = DisbursementDto;
}

//The handler reports declined requests (i.e. a year out of range) through the envelope, not as an error
#[derive(Debug, Clone, PartialEq)]
pub struct GetMonthlyCashFlow {
    pub UserId: i64,
    pub Year: i32
}

impl Request for GetMonthlyCashFlow {
    type Response = ApiResponse<Vec<MonthlyCashFlowDto>>;
}
