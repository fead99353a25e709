#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::{error::ApiError, models::Disbursement::{DisbursementDto, DisbursementRequest}, services::appState::AppState};
use super::auth::CurrentUser;

pub async fn disburseLoan(State(appState): State<AppState>, CurrentUser(caller): CurrentUser, payload: Result<Json<DisbursementRequest>, JsonRejection>) -> Result<Json<DisbursementDto>, ApiError> {
    let Json(payload) = payload.map_err(|r| ApiError::BadRequest(r.body_text()))?;
    let cmd = payload.intoCommand(caller.UserId)?;

    let disbursement = appState.mediator.send(cmd).await?;
    return Ok(Json(disbursement));
}
