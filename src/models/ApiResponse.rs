#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::collections::BTreeMap;

use crate::error::FieldErrors;

//Uniform success/error wrapper. Success=false never carries Data and always carries a Message.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub Success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub Data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub Message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub Errors: Option<BTreeMap<String, Vec<String>>>
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> ApiResponse<T> {
        return ApiResponse { Success: true, Data: Some(data), Message: None, Errors: None };
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<T> {
        return ApiResponse { Success: false, Data: None, Message: Some(message.into()), Errors: None };
    }

    pub fn validation(message: impl Into<String>, errors: FieldErrors) -> ApiResponse<T> {
        return ApiResponse { Success: false, Data: None, Message: Some(message.into()), Errors: Some(errors.0) };
    }

    pub fn isSuccess(&self) -> bool {
        return self.Success && self.Data.is_some();
    }
}
