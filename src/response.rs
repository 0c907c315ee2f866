//! The JSON envelope that wraps every successful API response.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// A successful API response of the form `{"message": "ok", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always "ok" for successful responses.
    pub message: String,
    /// The payload of the response.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` in a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            message: "ok".to_owned(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
