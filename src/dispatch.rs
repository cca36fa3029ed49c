//! Handing resolved heads to the build-trigger subsystem.
//!
//! Resolution stays pure; delivery goes through a [`HeadEventSink`]. Delivery
//! is fire-and-forget: the sink never reports back, and events for the same
//! repository may reach the consumer out of order. Consumers should compare
//! revisions rather than rely on arrival order.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::resolve::{HeadMap, concerns, resolve_heads};
use crate::source::{SessionProvider, SourceConfig};
use crate::types::RepoId;
use crate::webhooks::{Descriptions, EventType, HostEvent, classify};

/// The resolution of one webhook event for one source.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadEvent {
    pub event_type: EventType,

    /// The webhook category (`push` or `pull_request`).
    pub category: &'static str,

    /// The source the heads were resolved for.
    pub source: RepoId,

    pub heads: HeadMap,

    pub descriptions: Descriptions,

    /// When the webhook was received. Advisory only; not a sequence number.
    pub received_at: DateTime<Utc>,
}

impl HeadEvent {
    /// Resolves `event` for `source`.
    pub fn resolve(
        event: &HostEvent,
        source: &SourceConfig,
        sessions: &dyn SessionProvider,
        received_at: DateTime<Utc>,
    ) -> Self {
        HeadEvent {
            event_type: classify(event),
            category: event.category(),
            source: source.repo_id(),
            heads: resolve_heads(event, source, sessions),
            descriptions: Descriptions::of(event),
            received_at,
        }
    }
}

/// Receives resolved head events.
pub trait HeadEventSink: Send + Sync {
    /// Accepts an event. Must not block.
    fn fire(&self, event: HeadEvent);
}

/// A sink backed by a bounded tokio channel.
///
/// A full or closed channel drops the event with a warning.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<HeadEvent>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<HeadEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (ChannelSink { tx }, rx)
    }
}

impl HeadEventSink for ChannelSink {
    fn fire(&self, event: HeadEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(e)) => {
                warn!(source = %e.source, description = %e.descriptions.full, "Head event channel full, dropping event");
            }
            Err(TrySendError::Closed(e)) => {
                warn!(source = %e.source, description = %e.descriptions.full, "Head event channel closed, dropping event");
            }
        }
    }
}

/// Resolves `event` for every source it concerns and fires the non-empty
/// results. Returns the number of events fired.
pub fn fire_now(
    event: &HostEvent,
    sources: &[SourceConfig],
    sessions: &dyn SessionProvider,
    sink: &dyn HeadEventSink,
) -> usize {
    let received_at = Utc::now();
    let mut fired = 0;

    for source in sources.iter().filter(|s| concerns(event, s)) {
        let head_event = HeadEvent::resolve(event, source, sessions, received_at);
        if head_event.heads.is_empty() {
            debug!(source = %head_event.source, description = %head_event.descriptions.source, "No heads affected");
            continue;
        }
        debug!(
            source = %head_event.source,
            description = %head_event.descriptions.source,
            heads = head_event.heads.len(),
            "Firing head event"
        );
        sink.fire(head_event);
        fired += 1;
    }

    fired
}
