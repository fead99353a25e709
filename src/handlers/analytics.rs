#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Datelike;

use crate::{commands::GetMonthlyCashFlow, error::HandlerError, models::{ApiResponse::ApiResponse, CashFlow::{fillMonths, MonthlyCashFlowDto}}, services::mediator::RequestHandler};

pub const FIRST_REPORTED_YEAR: i32 = 2000;

//Years the report can be asked for. One year ahead is allowed for scheduled disbursements.
pub fn validateYear(year: i32, currentYear: i32) -> Result<(), String> {
    if year < FIRST_REPORTED_YEAR || year > currentYear + 1 {
        return Err(format!("Year must be between {} and {}", FIRST_REPORTED_YEAR, currentYear + 1));
    }
    return Ok(());
}

pub struct MonthlyCashFlowHandler {
    dbPool: sqlx::PgPool
}

impl MonthlyCashFlowHandler {
    pub fn new(dbPool: sqlx::PgPool) -> MonthlyCashFlowHandler {
        return MonthlyCashFlowHandler { dbPool };
    }
}

#[async_trait]
impl RequestHandler<GetMonthlyCashFlow> for MonthlyCashFlowHandler {
    //Incoming: payments received on the user's loans. Outgoing: disbursements of the user's loans.
    async fn handle(&self, query: GetMonthlyCashFlow) -> Result<ApiResponse<Vec<MonthlyCashFlowDto>>, HandlerError> {
        if let Err(msg) = validateYear(query.Year, chrono::Utc::now().year()) {
            return Ok(ApiResponse::error(msg));
        }

        let incoming: Vec<(i32, BigDecimal)> = sqlx::query_as(
            "SELECT EXTRACT(MONTH FROM p.created_at)::INT4, SUM(p.amount) \
             FROM payments p JOIN loans l ON l.id = p.loan_id \
             WHERE l.user_id = $1 AND EXTRACT(YEAR FROM p.created_at)::INT4 = $2 \
             GROUP BY 1"
        )
            .bind(query.UserId)
            .bind(query.Year)
            .fetch_all(&self.dbPool)
            .await?;

        let outgoing: Vec<(i32, BigDecimal)> = sqlx::query_as(
            "SELECT EXTRACT(MONTH FROM d.processed_at)::INT4, SUM(d.amount) \
             FROM disbursements d JOIN loans l ON l.id = d.loan_id \
             WHERE l.user_id = $1 AND EXTRACT(YEAR FROM d.processed_at)::INT4 = $2 \
             GROUP BY 1"
        )
            .bind(query.UserId)
            .bind(query.Year)
            .fetch_all(&self.dbPool)
            .await?;

        return Ok(ApiResponse::success(fillMonths(&incoming, &outgoing)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2000, true)]
    #[case(2026, true)]
    #[case(2027, true)]
    #[case(2028, false)]
    #[case(1999, false)]
    fn year_window(#[case] year: i32, #[case] accepted: bool) {
        assert_eq!(validateYear(year, 2026).is_ok(), accepted);
    }
}
