//! Health endpoint

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

pub struct HealthHandler {
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new() -> Self {
        Self {
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 while the process is serving
    pub async fn health(&self) -> impl IntoResponse {
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        };
        (StatusCode::OK, Json(status))
    }
}

impl Default for HealthHandler {
    fn default() -> Self {
        Self::new()
    }
}
