#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use async_trait::async_trait;

use crate::{commands::{GetLoanPayments, GetPaymentById, MakePayment}, error::HandlerError, models::Payment::{pageOffset, PaymentDto, PaymentPage}, services::mediator::RequestHandler};

const PAYMENT_COLUMNS: &str = "id AS \"PaymentId\", loan_id AS \"LoanId\", amount AS \"Amount\", method AS \"Method\", reference AS \"Reference\", paid_by AS \"PaidBy\", created_at AS \"CreatedAt\"";

//Status of a loan, None when it doesn't exist
pub async fn getLoanStatus(loanId: i64, dbPool: &sqlx::PgPool) -> sqlx::Result<Option<String>> {
    let status: Option<(String,)> = sqlx::query_as("SELECT status FROM loans WHERE id = $1")
        .bind(loanId)
        .fetch_optional(dbPool)
        .await?;

    return Ok(status.map(|(x,)| x));
}

pub fn requireLoan(loanId: i64, status: Option<String>) -> Result<String, HandlerError> {
    return status.ok_or_else(|| HandlerError::NotFound(format!("Loan {} not found", loanId)));
}

//Payments are only taken once the money has been handed out
pub fn checkPayable(loanId: i64, status: Option<String>) -> Result<(), HandlerError> {
    return match requireLoan(loanId, status)?.as_str() {
        "disbursed" => Ok(()),
        other => Err(HandlerError::Rejected(format!("Loan {} cannot take payments while {}", loanId, other)))
    };
}

pub struct MakePaymentHandler {
    dbPool: sqlx::PgPool
}

impl MakePaymentHandler {
    pub fn new(dbPool: sqlx::PgPool) -> MakePaymentHandler {
        return MakePaymentHandler { dbPool };
    }
}

#[async_trait]
impl RequestHandler<MakePayment> for MakePaymentHandler {
    async fn handle(&self, cmd: MakePayment) -> Result<PaymentDto, HandlerError> {
        checkPayable(cmd.LoanId, getLoanStatus(cmd.LoanId, &self.dbPool).await?)?;

        let payment = sqlx::query_as::<_, PaymentDto>(&format!(
            "INSERT INTO payments(loan_id, amount, method, reference, paid_by) VALUES($1, $2, $3, $4, $5) RETURNING {}",
            PAYMENT_COLUMNS
        ))
            .bind(cmd.LoanId)
            .bind(&cmd.Amount)
            .bind(&cmd.Method)
            .bind(&cmd.Reference)
            .bind(cmd.PaidBy)
            .fetch_one(&self.dbPool)
            .await?;

        tracing::info!(paymentId = payment.PaymentId, loanId = payment.LoanId, "payment recorded");
        return Ok(payment);
    }
}

pub struct GetPaymentByIdHandler {
    dbPool: sqlx::PgPool
}

impl GetPaymentByIdHandler {
    pub fn new(dbPool: sqlx::PgPool) -> GetPaymentByIdHandler {
        return GetPaymentByIdHandler { dbPool };
    }
}

#[async_trait]
impl RequestHandler<GetPaymentById> for GetPaymentByIdHandler {
    async fn handle(&self, query: GetPaymentById) -> Result<PaymentDto, HandlerError> {
        let payment = sqlx::query_as::<_, PaymentDto>(&format!("SELECT {} FROM payments WHERE id = $1", PAYMENT_COLUMNS))
            .bind(query.PaymentId)
            .fetch_optional(&self.dbPool)
            .await?;

        return payment.ok_or_else(|| HandlerError::NotFound(format!("Payment {} not found", query.PaymentId)));
    }
}

pub struct GetLoanPaymentsHandler {
    dbPool: sqlx::PgPool
}

impl GetLoanPaymentsHandler {
    pub fn new(dbPool: sqlx::PgPool) -> GetLoanPaymentsHandler {
        return GetLoanPaymentsHandler { dbPool };
    }
}

#[async_trait]
impl RequestHandler<GetLoanPayments> for GetLoanPaymentsHandler {
    async fn handle(&self, query: GetLoanPayments) -> Result<PaymentPage, HandlerError> {
        requireLoan(query.LoanId, getLoanStatus(query.LoanId, &self.dbPool).await?)?;
        let offset = pageOffset(query.Page, query.Limit)
            .ok_or_else(|| HandlerError::Rejected(format!("Page {} is out of range", query.Page)))?;

        let (totalCount,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payments WHERE loan_id = $1")
            .bind(query.LoanId)
            .fetch_one(&self.dbPool)
            .await?;

        let items = sqlx::query_as::<_, PaymentDto>(&format!(
            "SELECT {} FROM payments WHERE loan_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
            PAYMENT_COLUMNS
        ))
            .bind(query.LoanId)
            .bind(query.Limit)
            .bind(offset)
            .fetch_all(&self.dbPool)
            .await?;

        return Ok(PaymentPage {
            LoanId: query.LoanId,
            Page: query.Page,
            Limit: query.Limit,
            TotalCount: totalCount,
            Items: items
        });
    }
}
