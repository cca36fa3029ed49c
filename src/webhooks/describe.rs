//! Operator-facing descriptions of events.
//!
//! Each event has three renderings: one for an organisation-level navigator
//! (repository name only), one for a single source (no repository), and a
//! fully qualified one (`owner/repo`). They are for logs and UI only.

use serde::{Deserialize, Serialize};

use super::classify::clean_ref;
use super::events::{HostEvent, PrAction, PullRequestEvent, PushEvent, Repository};

/// The three renderings of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptions {
    pub navigator: String,
    pub source: String,
    pub full: String,
}

impl Descriptions {
    pub fn of(event: &HostEvent) -> Self {
        Descriptions {
            navigator: describe_for_navigator(event),
            source: describe_for_source(event),
            full: describe(event),
        }
    }
}

/// Description for an organisation-level view.
pub fn describe_for_navigator(event: &HostEvent) -> String {
    format!(
        "{} in repository {}",
        headline(event),
        event.repository().id.repo
    )
}

/// Description within a single source.
pub fn describe_for_source(event: &HostEvent) -> String {
    headline(event)
}

/// Fully qualified description.
pub fn describe(event: &HostEvent) -> String {
    format!("{} in repository {}", headline(event), qualified(event.repository()))
}

fn headline(event: &HostEvent) -> String {
    match event {
        HostEvent::Push(e) => push_headline(e),
        HostEvent::PullRequest(e) => pull_request_headline(e),
    }
}

fn push_headline(event: &PushEvent) -> String {
    format!("Push event to branch/tag {}", clean_ref(&event.ref_name))
}

fn pull_request_headline(event: &PullRequestEvent) -> String {
    let verb = match event.action {
        Some(PrAction::Opened) => "opened",
        Some(PrAction::Reopened) => "reopened",
        Some(PrAction::Closed) => "closed",
        _ => "event",
    };
    format!("Pull request #{} {}", event.number.0, verb)
}

fn qualified(repository: &Repository) -> String {
    repository.id.to_string()
}
