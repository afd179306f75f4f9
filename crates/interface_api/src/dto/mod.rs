//! Request/Response data transfer objects

pub mod auth;
pub mod claims;
pub mod items;
pub mod stats;

use axum::Json;
use serde::Serialize;

/// Uniform success envelope: `{"status": "success", "message", ...payload}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            status: "success",
            message: message.into(),
            data,
        })
    }
}

/// Payload for responses that carry only the envelope
#[derive(Debug, Serialize)]
pub struct Empty {}
