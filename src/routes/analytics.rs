#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use axum::{extract::{rejection::QueryRejection, Query, State}, http::StatusCode, response::{IntoResponse, Response}, Json};
use chrono::Datelike;

use crate::{commands::GetMonthlyCashFlow, error::{errorReference, ApiError, HandlerError}, models::CashFlow::CashFlowParams, services::appState::AppState};
use super::auth::CurrentUser;

//Every failure here is a 400: a declined envelope is passed back as-is, anything else becomes an error envelope.
pub async fn getMonthlyCashFlow(State(appState): State<AppState>, CurrentUser(caller): CurrentUser, params: Result<Query<CashFlowParams>, QueryRejection>) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(r) => return ApiError::BadRequest(r.body_text()).into_response()
    };
    let year = params.year.unwrap_or_else(|| chrono::Utc::now().year());

    let result = appState.mediator.send(GetMonthlyCashFlow { UserId: caller.UserId, Year: year }).await;

    return match result {
        Ok(envelope) if envelope.Success => (StatusCode::OK, Json(envelope)).into_response(),
        Ok(envelope) => (StatusCode::BAD_REQUEST, Json(envelope)).into_response(),
        Err(HandlerError::NotFound(msg) | HandlerError::Rejected(msg)) => ApiError::BadRequest(msg).into_response(),
        Err(err) => {
            let reference = errorReference();
            tracing::error!(reference = %reference, error = %err, userId = caller.UserId, year, "monthly cash flow failed");
            ApiError::BadRequest(format!("Unable to compute the monthly cash flow. Reference: {}", reference)).into_response()
        }
    };
}
