pub mod cors;
pub mod rest;

use axum::{Router, middleware, routing::post};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::service::EmailService;

use cors::CorsPolicy;

/// Builds the application router. The CORS layer also wraps the fallback, so
/// preflight requests to any path are answered.
pub fn router(service: Arc<EmailService>, policy: CorsPolicy) -> Router {
    Router::new()
        .route("/send-product", post(rest::send_product))
        .with_state(service)
        .layer(middleware::from_fn_with_state(policy, cors::apply))
        .layer(TraceLayer::new_for_http())
}
