//! Data Transfer Objects for API requests and responses.
//!
//! Field names on the wire are camelCase. Successful responses are wrapped
//! in [`ApiResponse`], failures in [`crate::error::ErrorBody`].

pub mod analytics;
pub mod health;
pub mod shorten;

use serde::Serialize;

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
