#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use axum::{extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State}, Json};

use crate::{commands::{GetLoanPayments, GetPaymentById}, error::ApiError, models::Payment::{PaginationParams, PaymentDto, PaymentPage, PaymentRequest}, services::appState::AppState};
use super::auth::CurrentUser;

pub async fn makePayment(State(appState): State<AppState>, CurrentUser(caller): CurrentUser, payload: Result<Json<PaymentRequest>, JsonRejection>) -> Result<Json<PaymentDto>, ApiError> {
    let Json(payload) = payload.map_err(|r| ApiError::BadRequest(r.body_text()))?;
    let cmd = payload.intoCommand(caller.UserId)?;

    let payment = appState.mediator.send(cmd).await?;
    return Ok(Json(payment));
}

pub async fn getPayment(State(appState): State<AppState>, paymentId: Result<Path<i64>, PathRejection>) -> Result<Json<PaymentDto>, ApiError> {
    let Path(paymentId) = paymentId.map_err(|r| ApiError::BadRequest(r.body_text()))?;

    let payment = appState.mediator.send(GetPaymentById { PaymentId: paymentId }).await?;
    return Ok(Json(payment));
}

pub async fn getLoanPayments(State(appState): State<AppState>, loanId: Result<Path<i64>, PathRejection>, params: Result<Query<PaginationParams>, QueryRejection>) -> Result<Json<PaymentPage>, ApiError> {
    let Path(loanId) = loanId.map_err(|r| ApiError::BadRequest(r.body_text()))?;
    let Query(params) = params.map_err(|r| ApiError::BadRequest(r.body_text()))?;
    let (page, limit) = params.resolve()?;

    let payments = appState.mediator.send(GetLoanPayments { LoanId: loanId, Page: page, Limit: limit }).await?;
    return Ok(Json(payments));
}
