//! Response types for the gateway API.

use serde::Serialize;

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub requests: u64,
    pub fee_pct: u8,
}

/// Acknowledgement for webhook deliveries.
#[derive(Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
