use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forge_head_events::config::AppConfig;
use forge_head_events::dispatch::ChannelSink;
use forge_head_events::server::{AppState, build_router};
use forge_head_events::source::NoSessions;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forge_head_events=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let (sink, mut rx) = ChannelSink::new(config.sink_capacity);

    // Stand-in consumer until a build-trigger subsystem is attached.
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            for (head, revision) in &event.heads {
                info!(
                    source = %event.source,
                    event_type = ?event.event_type,
                    head = %head,
                    revision = revision.as_ref().map(|r| r.hash().as_str()),
                    "{}",
                    event.descriptions.full
                );
            }
        }
    });

    let state = AppState::new(config.sources, Arc::new(NoSessions), Arc::new(sink));
    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.listen_addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!("listening on {}", config.listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
