//! Resolution of webhook events into affected heads and their new revisions.
//!
//! The entry point is [`resolve_heads`]. It is a pure function of the event,
//! the source configuration and the session provider: it keeps no state
//! between calls and never fails. Problems reading the source configuration
//! are logged and degrade to fewer results.
//!
//! | Event | Resolver |
//! |-------|----------|
//! | `push` | [`resolve_push`] - one branch or tag head |
//! | `pull_request` | [`resolve_pull_request`] - one head per checkout strategy |

pub mod pull_request;
pub mod push;
pub mod strategies;

use std::collections::BTreeMap;

use crate::source::{SessionProvider, SourceConfig};
use crate::types::{Head, Revision};
use crate::webhooks::HostEvent;

pub use pull_request::resolve_pull_request;
pub use push::resolve_push;

/// Affected heads and their new revisions. `None` means the head was removed.
pub type HeadMap = BTreeMap<Head, Option<Revision>>;

/// Resolves the heads affected by `event` for `source`.
pub fn resolve_heads(
    event: &HostEvent,
    source: &SourceConfig,
    sessions: &dyn SessionProvider,
) -> HeadMap {
    match event {
        HostEvent::Push(e) => resolve_push(e),
        HostEvent::PullRequest(e) => resolve_pull_request(e, source, sessions),
    }
}

/// Returns true if `event` was delivered for `source`'s repository.
pub fn concerns(event: &HostEvent, source: &SourceConfig) -> bool {
    source.is_repository(&event.repository().id)
}
