//! Response Envelope
//!
//! Every product endpoint answers with the same JSON shape:
//!
//! - success: `{success: true, message, data}` (`data` may be `null`)
//! - failure: `{success: false, message, error?}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::product::ProductError;

/// Message used when an error renders to an empty string
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// Envelope without a payload, used by the root status route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEnvelope {
    pub success: bool,
    pub message: String,
}

/// 200 with `{success: true, message, data}`
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    let body = SuccessEnvelope {
        success: true,
        message: message.into(),
        data,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// 500 with the error message and the structured error object
pub fn failure(err: &ProductError) -> Response {
    let message = err.to_string();
    let body = ErrorEnvelope {
        success: false,
        message: if message.is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        },
        error: Some(err.to_json()),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// `status` with `{success: false, message}` and no error object
pub fn rejected(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorEnvelope {
        success: false,
        message: message.into(),
        error: None,
    };
    (status, Json(body)).into_response()
}
