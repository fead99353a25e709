#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use axum::response::IntoResponse;

use crate::error::ApiError;

pub async fn pageNotFound() -> impl IntoResponse {
    return ApiError::NotFound("Page not found!".to_string());
}

pub async fn health() -> impl IntoResponse {
    return "OK";
}
