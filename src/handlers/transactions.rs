#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::{commands::DisburseLoan, error::HandlerError, models::Disbursement::DisbursementDto, services::mediator::RequestHandler};

//Principal to pay out for a loan row (principal, status) read under lock
pub fn disbursablePrincipal(loanId: i64, loan: Option<(BigDecimal, String)>) -> Result<BigDecimal, HandlerError> {
    return match loan {
        None => Err(HandlerError::NotFound(format!("Loan {} not found", loanId))),
        Some((principal, status)) if status == "approved" => Ok(principal),
        Some((_, status)) => Err(HandlerError::Rejected(format!("Loan {} cannot be disbursed while {}", loanId, status)))
    };
}

pub struct DisburseLoanHandler {
    dbPool: sqlx::PgPool
}

impl DisburseLoanHandler {
    pub fn new(dbPool: sqlx::PgPool) -> DisburseLoanHandler {
        return DisburseLoanHandler { dbPool };
    }
}

#[async_trait]
impl RequestHandler<DisburseLoan> for DisburseLoanHandler {
    //Pays out the full principal. Only approved loans can be disbursed, and only once.
    async fn handle(&self, cmd: DisburseLoan) -> Result<DisbursementDto, HandlerError> {
        let mut txn = self.dbPool.begin().await?;

        let loan: Option<(BigDecimal, String)> = sqlx::query_as("SELECT principal, status FROM loans WHERE id = $1 FOR UPDATE")
            .bind(cmd.LoanId)
            .fetch_optional(&mut txn)
            .await?;

        let principal = disbursablePrincipal(cmd.LoanId, loan)?;

        let disbursement = sqlx::query_as::<_, DisbursementDto>(
            "INSERT INTO disbursements(loan_id, amount, method, reference, disbursed_by, requested_by) VALUES($1, $2, $3, $4, $5, $6) \
             RETURNING id AS \"TransactionId\", loan_id AS \"LoanId\", amount AS \"Amount\", method AS \"Method\", reference AS \"Reference\", processed_at AS \"ProcessedAt\""
        )
            .bind(cmd.LoanId)
            .bind(&principal)
            .bind(&cmd.Method)
            .bind(&cmd.Reference)
            .bind(&cmd.DisbursedBy)
            .bind(cmd.RequestedBy)
            .fetch_one(&mut txn)
            .await?;

        sqlx::query("UPDATE loans SET status = 'disbursed' WHERE id = $1")
            .bind(cmd.LoanId)
            .execute(&mut txn)
            .await?;

        txn.commit().await?;

        tracing::info!(transactionId = disbursement.TransactionId, loanId = cmd.LoanId, disbursedBy = %cmd.DisbursedBy, "loan disbursed");
        return Ok(disbursement);
    }
}
