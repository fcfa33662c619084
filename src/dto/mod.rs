use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

/// Inbound payload of `POST /send-product`.
///
/// Absent or `null` fields fall back to their zero values; only the JSON
/// shape is checked.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductEmailRequest {
    #[serde_as(as = "DefaultOnNull")]
    pub product_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub price: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "email")]
    pub recipient_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendProductResponse {
    pub message: &'static str,
    pub id: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl ErrorResponse {
    pub const INVALID_BODY: Self = Self {
        error: "Invalid request body",
    };

    pub const SEND_FAILED: Self = Self {
        error: "Failed to send email",
    };
}
