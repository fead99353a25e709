#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

//Postgres-backed handlers for every command/query the routes dispatch.

pub mod analytics;
pub mod payments;
pub mod transactions;

use crate::{commands::*, services::mediator::Mediator};

pub fn registerAll(mediator: &mut Mediator, dbPool: sqlx::PgPool) {
    mediator
        .register::<MakePayment, _>(payments::MakePaymentHandler::new(dbPool.clone()))
        .register::<GetPaymentById, _>(payments::GetPaymentByIdHandler::new(dbPool.clone()))
        .register::<GetLoanPayments, _>(payments::GetLoanPaymentsHandler::new(dbPool.clone()))
        .register::<DisburseLoan, _>(transactions::DisburseLoanHandler::new(dbPool.clone()))
        .register::<GetMonthlyCashFlow, _>(analytics::MonthlyCashFlowHandler::new(dbPool));

    tracing::info!(handlers = mediator.len(), "request handlers registered");
}
