#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use bigdecimal::BigDecimal;

use crate::{commands::MakePayment, error::{ApiError, FieldErrors}};

//Column limits, see migrations/
pub const MAX_METHOD_LEN: usize = 64;
pub const MAX_REFERENCE_LEN: usize = 128;
pub const AMOUNT_SCALE: i64 = 2;
pub const AMOUNT_INTEGER_DIGITS: i64 = 12;

//Why an amount can't be stored as NUMERIC(14, 2) without changing it, if it can't.
//Works on the digit string so that inputs like 1e999999999 are never expanded.
pub fn amountProblem(amount: &BigDecimal) -> Option<String> {
    let (unscaled, scale) = amount.as_bigint_and_exponent();
    let text = unscaled.to_string();
    let digits = text.trim_start_matches('-');

    if text.starts_with('-') || digits.chars().all(|c| c == '0') {
        return Some("Amount must be greater than zero".to_string());
    }

    let excessDecimals = scale.saturating_sub(AMOUNT_SCALE).max(0) as usize;
    if digits.chars().rev().take(excessDecimals).any(|c| c != '0') {
        return Some(format!("Amount must have at most {} decimal places", AMOUNT_SCALE));
    }

    let integerDigits = (digits.len() as i64).saturating_sub(scale);
    if integerDigits > AMOUNT_INTEGER_DIGITS {
        return Some(format!("Amount must have at most {} integer digits", AMOUNT_INTEGER_DIGITS));
    }

    return None;
}

//Incoming body for POST /api/payments. Everything is optional here so that a missing field becomes
//a field-level message instead of a bare deserialization error.
#[derive(serde::Deserialize, Debug, Default)]
pub struct PaymentRequest {
    pub LoanId: Option<i64>,
    pub Amount: Option<BigDecimal>,
    pub Method: Option<String>,
    pub Reference: Option<String>
}

impl PaymentRequest {
    pub fn intoCommand(self, paidBy: i64) -> Result<MakePayment, ApiError> {
        let mut errors = FieldErrors::new();

        match self.LoanId {
            None => errors.add("LoanId", "LoanId is required"),
            Some(id) if id <= 0 => errors.add("LoanId", "LoanId must be a positive number"),
            Some(_) => {}
        }

        match &self.Amount {
            None => errors.add("Amount", "Amount is required"),
            Some(amount) => {
                if let Some(problem) = amountProblem(amount) {
                    errors.add("Amount", problem);
                }
            }
        }

        errors.requireText("Method", &self.Method, MAX_METHOD_LEN);
        errors.limitText("Reference", &self.Reference, MAX_REFERENCE_LEN);

        return match (self.LoanId, self.Amount, self.Method) {
            (Some(loanId), Some(amount), Some(method)) if errors.isEmpty() => Ok(MakePayment {
                LoanId: loanId,
                Amount: amount,
                Method: method,
                Reference: self.Reference,
                PaidBy: paidBy
            }),
            _ => Err(ApiError::Validation(errors))
        };
    }
}

#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentDto {
    pub PaymentId: i64,
    pub LoanId: i64,
    pub Amount: BigDecimal,
    pub Method: String,
    pub Reference: Option<String>,
    pub PaidBy: i64,
    pub CreatedAt: chrono::DateTime<chrono::Utc>
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentPage {
    pub LoanId: i64,
    pub Page: i64,
    pub Limit: i64,
    pub TotalCount: i64,
    pub Items: Vec<PaymentDto>
}

//Query string for GET /api/payments/loans/:loanId
#[derive(serde::Deserialize, Debug, Default)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>
}

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

impl PaginationParams {
    //Returns (page, limit). Non-positive values are rejected, oversized limits are clamped.
    pub fn resolve(&self) -> Result<(i64, i64), ApiError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        let mut errors = FieldErrors::new();
        if page < 1 {
            errors.add("page", "page must be 1 or greater");
        }
        if limit < 1 {
            errors.add("limit", "limit must be 1 or greater");
        }
        if !errors.isEmpty() {
            return Err(ApiError::Validation(errors));
        }

        if limit > MAX_PAGE_LIMIT {
            tracing::debug!(requested = limit, max = MAX_PAGE_LIMIT, "clamping page limit");
        }
        let limit = limit.min(MAX_PAGE_LIMIT);

        if pageOffset(page, limit).is_none() {
            errors.add("page", "page is too large");
            return Err(ApiError::Validation(errors));
        }

        return Ok((page, limit));
    }
}

//Rows to skip for a 1-based page. None when it doesn't fit in an i64.
pub fn pageOffset(page: i64, limit: i64) -> Option<i64> {
    return page.checked_sub(1)?.checked_mul(limit);
}
