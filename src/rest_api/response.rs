//! # Response Formatting
//!
//! Success envelopes for the REST API.

use serde::Serialize;

use crate::store::CafeRecord;

/// Single cafe, wrapped under `cafe`
#[derive(Debug, Clone, Serialize)]
pub struct CafeResponse {
    pub cafe: CafeRecord,
}

impl CafeResponse {
    pub fn new(cafe: CafeRecord) -> Self {
        Self { cafe }
    }
}

/// Every cafe, wrapped under `cafes`
#[derive(Debug, Clone, Serialize)]
pub struct CafeListResponse {
    pub cafes: Vec<CafeRecord>,
}

impl CafeListResponse {
    pub fn new(cafes: Vec<CafeRecord>) -> Self {
        Self { cafes }
    }
}

/// Mutation acknowledgment: `{"response": {"success": <message>}}`
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub response: Ack,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub success: String,
}

impl AckResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            response: Ack {
                success: message.into(),
            },
        }
    }
}

/// Health check body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
