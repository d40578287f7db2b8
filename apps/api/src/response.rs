//! Success envelope: `{ "success": true, "message": ..., <payload fields> }`.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            payload,
        })
    }
}
