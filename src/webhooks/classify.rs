//! Lifecycle classification of webhook events.
//!
//! Every event is tagged as creating, updating or removing the references it
//! names. Classification is a pure function of the payload.

use serde::{Deserialize, Serialize};

use crate::types::Sha;

use super::events::{HostEvent, PrAction, PullRequestEvent, PushEvent};

/// Prefix of branch refs.
pub const R_HEADS: &str = "refs/heads/";
/// Prefix of tag refs.
pub const R_TAGS: &str = "refs/tags/";

/// What happened to the affected references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Created,
    Updated,
    Removed,
}

/// The kind of reference a push ref string names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Branch,
    Tag,
    /// Neither `refs/heads/` nor `refs/tags/`.
    Other,
}

impl RefKind {
    pub fn of(ref_name: &str) -> RefKind {
        if ref_name.starts_with(R_HEADS) {
            RefKind::Branch
        } else if ref_name.starts_with(R_TAGS) {
            RefKind::Tag
        } else {
            RefKind::Other
        }
    }
}

/// Strips the branch or tag prefix; other refs are returned unchanged.
pub fn clean_ref(ref_name: &str) -> &str {
    ref_name
        .strip_prefix(R_HEADS)
        .or_else(|| ref_name.strip_prefix(R_TAGS))
        .unwrap_or(ref_name)
}

/// Classifies an event.
pub fn classify(event: &HostEvent) -> EventType {
    match event {
        HostEvent::Push(e) => classify_push(e),
        HostEvent::PullRequest(e) => classify_pull_request(e),
    }
}

/// A missing or null before-commit means creation; a missing or null
/// after-commit means removal.
pub fn classify_push(event: &PushEvent) -> EventType {
    if is_absent(event.before.as_ref()) {
        EventType::Created
    } else if is_absent(event.after.as_ref()) {
        EventType::Removed
    } else {
        EventType::Updated
    }
}

pub fn classify_pull_request(event: &PullRequestEvent) -> EventType {
    match event.action {
        Some(PrAction::Opened) => EventType::Created,
        Some(PrAction::Closed) => EventType::Removed,
        _ => EventType::Updated,
    }
}

fn is_absent(sha: Option<&Sha>) -> bool {
    sha.is_none_or(Sha::is_absent)
}
