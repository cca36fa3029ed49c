//! HTTP intake for forge webhooks.
//!
//! # Endpoints
//!
//! - `POST /webhook` - Resolves a delivery and fires head events (returns 202 Accepted)
//! - `GET /health` - Returns 200 if server is running

use std::sync::Arc;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

use crate::dispatch::HeadEventSink;
use crate::source::{SessionProvider, SourceConfig};

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Sources events are resolved against.
    sources: Vec<SourceConfig>,

    /// Opens per-request sessions against the forge.
    sessions: Arc<dyn SessionProvider>,

    /// Receives resolved head events.
    sink: Arc<dyn HeadEventSink>,
}

impl AppState {
    pub fn new(
        sources: Vec<SourceConfig>,
        sessions: Arc<dyn SessionProvider>,
        sink: Arc<dyn HeadEventSink>,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                sources,
                sessions,
                sink,
            }),
        }
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.inner.sources
    }

    pub fn sessions(&self) -> &dyn SessionProvider {
        self.inner.sessions.as_ref()
    }

    pub fn sink(&self) -> &dyn HeadEventSink {
        self.inner.sink.as_ref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
