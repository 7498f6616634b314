//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Session token issued on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque session token to send back in the `Token` header.
    pub token: String,
}

/// Identifier of a newly created group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCreatedResponse {
    /// Group ID to send in the `ID` header.
    pub id: Uuid,
}

/// Outcome of passing the coin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinPassedResponse {
    /// Member now holding the coin.
    pub coin_holder: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Live sessions in the store.
    pub sessions: usize,
    /// Addresses tracked by the rate limiter.
    pub visitors: usize,
}
