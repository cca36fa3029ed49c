//! Typed webhook events.
//!
//! The forge delivers one JSON payload per event category. Only the two
//! categories that move heads are modelled:
//!
//! - `push` - a branch or tag was created, moved or deleted
//! - `pull_request` - a pull request was opened, updated or closed

use serde::{Deserialize, Serialize};

use crate::types::{PrNumber, RepoId, Sha};

/// A parsed webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    /// A ref was pushed.
    Push(PushEvent),

    /// A pull request changed.
    PullRequest(PullRequestEvent),
}

impl HostEvent {
    /// Returns the repository the event was delivered for.
    pub fn repository(&self) -> &Repository {
        match self {
            HostEvent::Push(e) => &e.repository,
            HostEvent::PullRequest(e) => &e.repository,
        }
    }

    /// Returns the webhook category name this event was parsed from.
    pub fn category(&self) -> &'static str {
        match self {
            HostEvent::Push(_) => "push",
            HostEvent::PullRequest(_) => "pull_request",
        }
    }
}

/// The repository an event was delivered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Owner username and repository name.
    pub id: RepoId,

    /// The repository's web URL, e.g. `https://gitea.example.com/alice/widgets`.
    pub html_url: String,
}

/// A push event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEvent {
    pub repository: Repository,

    /// The full ref that moved, e.g. `refs/heads/main` or `refs/tags/v1.0`.
    pub ref_name: String,

    /// The ref's commit before the push. Blank values are `None`; the null
    /// sentinel is kept so callers can tell creation apart from a missing field.
    pub before: Option<Sha>,

    /// The ref's commit after the push, with the same conventions as `before`.
    pub after: Option<Sha>,
}

/// Action performed on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrAction {
    /// PR was opened.
    Opened,
    /// PR was closed (merged or not).
    Closed,
    /// PR was reopened.
    Reopened,
    /// PR head was updated.
    Synchronized,
    /// PR title, body or base was edited.
    Edited,
    /// Any other action (labels, assignees, milestones, ...).
    Other(String),
}

impl PrAction {
    /// Maps the payload's `action` string.
    pub fn parse(action: &str) -> PrAction {
        match action {
            "opened" => PrAction::Opened,
            "closed" => PrAction::Closed,
            "reopened" => PrAction::Reopened,
            "synchronized" | "synchronize" => PrAction::Synchronized,
            "edited" => PrAction::Edited,
            other => PrAction::Other(other.to_string()),
        }
    }
}

/// One side (head or base) of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrRef {
    /// Branch name, without `refs/heads/`.
    pub ref_name: String,

    /// Commit at that branch.
    pub sha: Sha,

    /// Repository holding the branch.
    pub repo: RepoId,
}

/// The pull request as embedded in the event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    pub number: PrNumber,
    pub title: Option<String>,
    pub head: PrRef,
    pub base: PrRef,
}

/// A pull request event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub repository: Repository,

    /// The action, if the payload carried one.
    pub action: Option<PrAction>,

    /// The pull request number from the top level of the payload.
    pub number: PrNumber,

    /// The embedded pull request. Absent when the pull request was deleted.
    pub pull_request: Option<PullRequestSnapshot>,
}
