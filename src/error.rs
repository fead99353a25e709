#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};

use crate::models::ApiResponse::ApiResponse;

static ERROR_SEQUENCE: AtomicU64 = AtomicU64::new(0);

//Failures a request handler can report back through the mediator.
#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    NotFound(String),

    //Business rule rejection, i.e. paying a loan that was never disbursed
    #[error("{0}")]
    Rejected(String),

    #[error("No handler registered for {0}")]
    Unregistered(&'static str),

    #[error(transparent)]
    DbError(#[from] sqlx::Error)
}

//Field name -> messages. BTreeMap keeps the output ordering stable.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> FieldErrors {
        return FieldErrors(BTreeMap::new());
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn isEmpty(&self) -> bool {
        return self.0.is_empty();
    }

    pub fn contains(&self, field: &str) -> bool {
        return self.0.contains_key(field);
    }

    //Required, non-blank, and at most maxLen characters (the VARCHAR limit of its column)
    pub fn requireText(&mut self, field: &str, value: &Option<String>, maxLen: usize) {
        match value {
            None => self.add(field, format!("{} is required", field)),
            Some(x) if x.trim().is_empty() => self.add(field, format!("{} must not be empty", field)),
            Some(_) => self.limitText(field, value, maxLen)
        }
    }

    pub fn limitText(&mut self, field: &str, value: &Option<String>, maxLen: usize) {
        if let Some(x) = value {
            if x.chars().count() > maxLen {
                self.add(field, format!("{} must be at most {} characters", field, maxLen));
            }
        }
    }
}

//Every endpoint answers failures with this, rendered as an ApiResponse error envelope.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("One or more fields are invalid")]
    Validation(FieldErrors),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    //Detail is logged, never sent to the caller
    #[error("{0}")]
    Internal(String)
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        return match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR
        };
    }
}

//Opaque reference handed to the caller so a 500 can be matched with the server log.
pub fn errorReference() -> String {
    let seq = ERROR_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    return format!("ERR-{:X}-{:04X}", chrono::Utc::now().timestamp_millis(), seq);
}

impl From<HandlerError> for ApiError {
    fn from(err: HandlerError) -> Self {
        return match err {
            HandlerError::NotFound(msg) => ApiError::NotFound(msg),
            HandlerError::Rejected(msg) => ApiError::BadRequest(msg),
            HandlerError::Unregistered(_) | HandlerError::DbError(_) => ApiError::Internal(err.to_string())
        };
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body: ApiResponse<()> = match self {
            ApiError::Validation(errors) => ApiResponse::validation("One or more fields are invalid", errors),
            ApiError::Internal(detail) => {
                let reference = errorReference();
                tracing::error!(reference = %reference, detail = %detail, "request failed");
                ApiResponse::error(format!("An unexpected error occurred. Reference: {}", reference))
            },
            other => ApiResponse::error(other.to_string())
        };

        return (status, Json(body)).into_response();
    }
}
