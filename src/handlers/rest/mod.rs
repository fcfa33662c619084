use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use serde_json::Value;

use std::{sync::Arc, time::Duration};

use crate::{
    dto::{ErrorResponse, ProductEmailRequest, SendProductResponse},
    service::EmailService,
};

pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Decodes the first JSON value of the body.
///
/// Bytes after that value are ignored, a `null` body yields an empty request
/// and repeated keys keep their last value. Any read or decode failure is
/// reported to the caller the same way.
fn parse_body(body: Result<Bytes, BytesRejection>) -> Result<ProductEmailRequest, String> {
    let bytes = body.map_err(|e| e.to_string())?;

    let value = serde_json::Deserializer::from_slice(&bytes)
        .into_iter::<Value>()
        .next()
        .ok_or("empty request body")?
        .map_err(|e| e.to_string())?;

    serde_json::from_value::<Option<ProductEmailRequest>>(value)
        .map(Option::unwrap_or_default)
        .map_err(|e| e.to_string())
}

#[debug_handler]
pub async fn send_product(
    State(service): State<Arc<EmailService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let payload = match parse_body(body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("rejected product email request: {}", e);
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::INVALID_BODY)).into_response();
        }
    };

    match service.send_product_email(&payload, SEND_TIMEOUT).await {
        Ok(sent) => (
            StatusCode::OK,
            Json(SendProductResponse {
                message: "Email sent successfully",
                id: sent.id,
                response: sent.message,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(
                "failed to send product email to '{}': {}",
                payload.recipient_email,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::SEND_FAILED),
            )
                .into_response()
        }
    }
}
