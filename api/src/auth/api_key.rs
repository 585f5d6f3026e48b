//! API key authentication middleware for the bot/automation gate

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::error::AppError;

/// Hash an API key for comparison and storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the API key from the X-API-Key header
fn extract_api_key(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("x-api-key")
        .and_then(|h| h.to_str().ok())
}

/// Authentication middleware for bot-facing routes.
///
/// The inbound `X-API-Key` header must match the configured bot key.
/// Comparison happens on SHA-256 digests so the raw key never needs to be
/// held beyond hashing.
pub async fn verify_api_key(
    State(config): State<Config>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = extract_api_key(&request).ok_or(AppError::Unauthorized)?;

    if hash_api_key(provided) != hash_api_key(&config.bot_api_key) {
        tracing::warn!(key_length = provided.len(), "Rejected bot request with bad API key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
