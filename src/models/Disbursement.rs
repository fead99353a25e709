#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use bigdecimal::BigDecimal;

use crate::{commands::DisburseLoan, error::{ApiError, FieldErrors}};
use super::Payment::{MAX_METHOD_LEN, MAX_REFERENCE_LEN};

pub const MAX_AGENT_LEN: usize = 128;

#[derive(serde::Deserialize, Debug, Default)]
pub struct DisbursementRequest {
    pub LoanId: Option<i64>,
    pub DisbursedBy: Option<String>,
    pub DisbursementMethod: Option<String>,
    pub Reference: Option<String>
}

impl DisbursementRequest {
    pub fn intoCommand(self, requestedBy: i64) -> Result<DisburseLoan, ApiError> {
        let mut errors = FieldErrors::new();

        match self.LoanId {
            None => errors.add("LoanId", "LoanId is required"),
            Some(id) if id <= 0 => errors.add("LoanId", "LoanId must be a positive number"),
            Some(_) => {}
        }
        errors.requireText("DisbursedBy", &self.DisbursedBy, MAX_AGENT_LEN);
        errors.requireText("DisbursementMethod", &self.DisbursementMethod, MAX_METHOD_LEN);
        errors.limitText("Reference", &self.Reference, MAX_REFERENCE_LEN);

        return match (self.LoanId, self.DisbursedBy, self.DisbursementMethod) {
            (Some(loanId), Some(disbursedBy), Some(method)) if errors.isEmpty() => Ok(DisburseLoan {
                LoanId: loanId,
                DisbursedBy: disbursedBy,
                Method: method,
                Reference: self.Reference,
                RequestedBy: requestedBy
            }),
            _ => Err(ApiError::Validation(errors))
        };
    }
}

//Returned verbatim from the disbursement handler
#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct DisbursementDto {
    pub TransactionId: i64,
    pub LoanId: i64,
    pub Amount: BigDecimal,
    pub Method: String,
    pub Reference: Option<String>,
    pub ProcessedAt: chrono::DateTime<chrono::Utc>
}
