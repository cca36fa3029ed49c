//! Webhook endpoint handler.
//!
//! Accepts forge webhook deliveries, resolves them against the configured
//! sources and fires the results before returning 202 Accepted. Signature
//! verification happens upstream of this service.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::dispatch::fire_now;
use crate::webhooks::{ParseError, parse_webhook};

/// Header carrying the event category on Gitea deliveries.
const HEADER_EVENT: &str = "x-gitea-event";
/// GitHub-compatible fallback for the event category.
const HEADER_EVENT_COMPAT: &str = "x-github-event";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// The payload could not be parsed.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ParseError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Required headers: `X-Gitea-Event` (or `X-GitHub-Event`)
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 202 Accepted: resolved (or ignored, for unknown categories)
/// - 400 Bad Request: missing header or malformed payload
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, String), WebhookError> {
    let category = event_category(&headers)?;

    let event = match parse_webhook(&category, &body) {
        Ok(Some(event)) => event,
        Ok(None) => {
            debug!(category = %category, "Ignoring webhook category");
            return Ok((StatusCode::ACCEPTED, "Accepted (ignored)".to_string()));
        }
        Err(e) => {
            warn!(category = %category, error = %e, "Malformed webhook payload");
            return Err(e.into());
        }
    };

    let fired = fire_now(
        &event,
        app_state.sources(),
        app_state.sessions(),
        app_state.sink(),
    );

    info!(
        category = %category,
        repo = %event.repository().id,
        fired,
        "Processed webhook"
    );

    Ok((StatusCode::ACCEPTED, format!("Accepted ({fired} head events)")))
}

fn event_category(headers: &HeaderMap) -> Result<String, WebhookError> {
    [HEADER_EVENT, HEADER_EVENT_COMPAT]
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(WebhookError::MissingHeader(HEADER_EVENT))
}
