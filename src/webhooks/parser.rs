//! Webhook payload parser.
//!
//! This module parses raw webhook JSON payloads into typed [`HostEvent`] values.
//!
//! # Parsing Strategy
//!
//! 1. The event category is taken from the `X-Gitea-Event` header
//! 2. The category is looked up in [`HANDLERS`], which maps it to a parser
//! 3. Unknown categories return `Ok(None)` (ignored, not error)
//! 4. Malformed payloads return `Err` with details

use serde::Deserialize;
use thiserror::Error;

use crate::types::{PrNumber, RepoId, Sha};

use super::events::{
    HostEvent, PrAction, PrRef, PullRequestEvent, PullRequestSnapshot, PushEvent, Repository,
};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Field has invalid value.
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// A registered event category and the parser for its payloads.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    /// The category name as sent in the event header.
    pub category: &'static str,
    parse: fn(&[u8]) -> Result<HostEvent, ParseError>,
}

impl EventHandler {
    /// Parses a payload of this handler's category.
    pub fn parse(&self, payload: &[u8]) -> Result<HostEvent, ParseError> {
        (self.parse)(payload)
    }
}

/// Every category this crate understands.
pub const HANDLERS: &[EventHandler] = &[
    EventHandler {
        category: "push",
        parse: parse_push,
    },
    EventHandler {
        category: "pull_request",
        parse: parse_pull_request,
    },
];

/// Looks up the handler registered for `category`.
pub fn handler_for(category: &str) -> Option<&'static EventHandler> {
    HANDLERS.iter().find(|h| h.category == category)
}

/// Parses a webhook payload into a typed event.
///
/// # Returns
///
/// * `Ok(Some(event))` - Successfully parsed a known event category
/// * `Ok(None)` - Unknown category (ignored, not an error)
/// * `Err(e)` - Malformed payload or missing required fields
///
/// # Examples
///
/// ```
/// use forge_head_events::webhooks::parse_webhook;
///
/// let payload = br#"{
///     "ref": "refs/heads/main",
///     "before": "0000000000000000000000000000000000000000",
///     "after": "1234567890abcdef1234567890abcdef12345678",
///     "repository": {
///         "name": "widgets",
///         "html_url": "https://gitea.example.com/alice/widgets",
///         "owner": { "username": "alice" }
///     }
/// }"#;
///
/// let result = parse_webhook("push", payload);
/// assert!(matches!(result, Ok(Some(_))));
/// ```
pub fn parse_webhook(category: &str, payload: &[u8]) -> Result<Option<HostEvent>, ParseError> {
    match handler_for(category) {
        Some(handler) => handler.parse(payload).map(Some),
        None => Ok(None),
    }
}

// ============================================================================
// Raw payload structures for deserialization
//
// These match the forge's webhook JSON structure. Gitea sends `username` for
// owners, GitHub-compatible payloads send `login`; both are accepted.
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawRepository {
    owner: RawOwner,
    name: String,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    #[serde(alias = "login")]
    username: String,
}

impl RawRepository {
    fn repo_id(&self) -> RepoId {
        RepoId::new(&self.owner.username, &self.name)
    }

    fn into_repository(self) -> Repository {
        Repository {
            id: self.repo_id(),
            html_url: self.html_url,
        }
    }
}

// ============================================================================
// push event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPushPayload {
    #[serde(rename = "ref")]
    ref_name: String,
    before: Option<String>,
    after: Option<String>,
    repository: RawRepository,
}

fn parse_push(payload: &[u8]) -> Result<HostEvent, ParseError> {
    let raw: RawPushPayload = serde_json::from_slice(payload)?;

    if raw.ref_name.trim().is_empty() {
        return Err(ParseError::InvalidField {
            field: "ref",
            value: raw.ref_name,
        });
    }

    Ok(HostEvent::Push(PushEvent {
        repository: raw.repository.into_repository(),
        ref_name: raw.ref_name,
        before: non_blank(raw.before),
        after: non_blank(raw.after),
    }))
}

fn non_blank(value: Option<String>) -> Option<Sha> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(Sha::new)
}

// ============================================================================
// pull_request event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: Option<String>,
    number: Option<u64>,
    pull_request: Option<RawPullRequest>,
    repository: RawRepository,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
    title: Option<String>,
    head: RawPrRef,
    base: RawPrRef,
}

#[derive(Debug, Deserialize)]
struct RawPrRef {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: String,
    repo: RawRepository,
}

impl RawPrRef {
    fn into_pr_ref(self) -> PrRef {
        PrRef {
            repo: self.repo.repo_id(),
            ref_name: self.ref_name,
            sha: Sha::new(self.sha),
        }
    }
}

fn parse_pull_request(payload: &[u8]) -> Result<HostEvent, ParseError> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;

    let action = raw
        .action
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(PrAction::parse);

    let number = raw
        .number
        .or_else(|| raw.pull_request.as_ref().map(|p| p.number))
        .ok_or(ParseError::InvalidField {
            field: "number",
            value: String::new(),
        })?;

    let pull_request = raw.pull_request.map(|p| PullRequestSnapshot {
        number: PrNumber(p.number),
        title: p.title,
        head: p.head.into_pr_ref(),
        base: p.base.into_pr_ref(),
    });

    Ok(HostEvent::PullRequest(PullRequestEvent {
        repository: raw.repository.into_repository(),
        action,
        number: PrNumber(number),
        pull_request,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPOSITORY: &str = r#"{
        "name": "widgets",
        "html_url": "https://gitea.example.com/alice/widgets",
        "owner": { "username": "alice" }
    }"#;

    #[test]
    fn registration_table_covers_push_and_pull_request() {
        let categories: Vec<_> = HANDLERS.iter().map(|h| h.category).collect();
        assert_eq!(categories, vec!["push", "pull_request"]);
        assert!(handler_for("push").is_some());
        assert!(handler_for("issues").is_none());
    }

    #[test]
    fn parse_push_to_branch() {
        let payload = format!(
            r#"{{
                "ref": "refs/heads/main",
                "before": "1111111111111111111111111111111111111111",
                "after": "2222222222222222222222222222222222222222",
                "repository": {REPOSITORY}
            }}"#
        );

        let event = parse_webhook("push", payload.as_bytes())
            .unwrap()
            .expect("should parse");

        match event {
            HostEvent::Push(e) => {
                assert_eq!(e.ref_name, "refs/heads/main");
                assert_eq!(
                    e.before,
                    Some(Sha::new("1111111111111111111111111111111111111111"))
                );
                assert_eq!(
                    e.after,
                    Some(Sha::new("2222222222222222222222222222222222222222"))
                );
                assert_eq!(e.repository.id, RepoId::new("alice", "widgets"));
                assert_eq!(
                    e.repository.html_url,
                    "https://gitea.example.com/alice/widgets"
                );
            }
            _ => panic!("expected Push"),
        }
    }

    #[test]
    fn parse_push_blank_shas_become_none() {
        let payload = format!(
            r#"{{ "ref": "refs/tags/v1", "before": "", "repository": {REPOSITORY} }}"#
        );

        match parse_webhook("push", payload.as_bytes()).unwrap() {
            Some(HostEvent::Push(e)) => {
                assert_eq!(e.before, None);
                assert_eq!(e.after, None);
            }
            _ => panic!("expected Push"),
        }
    }

    #[test]
    fn parse_push_blank_ref_is_invalid() {
        let payload = format!(r#"{{ "ref": "  ", "repository": {REPOSITORY} }}"#);
        let result = parse_webhook("push", payload.as_bytes());
        assert!(matches!(
            result,
            Err(ParseError::InvalidField { field: "ref", .. })
        ));
    }

    #[test]
    fn parse_pull_request_opened_from_fork() {
        let payload = format!(
            r#"{{
                "action": "opened",
                "number": 42,
                "pull_request": {{
                    "number": 42,
                    "title": "Add gizmo",
                    "head": {{
                        "ref": "gizmo",
                        "sha": "abcdef1234567890abcdef1234567890abcdef12",
                        "repo": {{ "name": "widgets", "owner": {{ "login": "bob" }} }}
                    }},
                    "base": {{
                        "ref": "main",
                        "sha": "1234567890abcdef1234567890abcdef12345678",
                        "repo": {REPOSITORY}
                    }}
                }},
                "repository": {REPOSITORY}
            }}"#
        );

        match parse_webhook("pull_request", payload.as_bytes()).unwrap() {
            Some(HostEvent::PullRequest(e)) => {
                assert_eq!(e.action, Some(PrAction::Opened));
                assert_eq!(e.number, PrNumber(42));
                let pr = e.pull_request.expect("snapshot");
                assert_eq!(pr.title.as_deref(), Some("Add gizmo"));
                assert_eq!(pr.head.repo, RepoId::new("bob", "widgets"));
                assert_eq!(pr.head.ref_name, "gizmo");
                assert_eq!(pr.base.ref_name, "main");
                assert_eq!(pr.base.repo, RepoId::new("alice", "widgets"));
            }
            _ => panic!("expected PullRequest"),
        }
    }

    #[test]
    fn parse_deleted_pull_request_without_snapshot() {
        let payload = format!(
            r#"{{ "action": "closed", "number": 9, "pull_request": null, "repository": {REPOSITORY} }}"#
        );

        match parse_webhook("pull_request", payload.as_bytes()).unwrap() {
            Some(HostEvent::PullRequest(e)) => {
                assert_eq!(e.action, Some(PrAction::Closed));
                assert_eq!(e.number, PrNumber(9));
                assert!(e.pull_request.is_none());
            }
            _ => panic!("expected PullRequest"),
        }
    }

    #[test]
    fn parse_pull_request_unset_and_unknown_actions() {
        let unset = format!(r#"{{ "number": 1, "repository": {REPOSITORY} }}"#);
        match parse_webhook("pull_request", unset.as_bytes()).unwrap() {
            Some(HostEvent::PullRequest(e)) => assert_eq!(e.action, None),
            _ => panic!("expected PullRequest"),
        }

        let labelled = format!(
            r#"{{ "action": "label_updated", "number": 1, "repository": {REPOSITORY} }}"#
        );
        match parse_webhook("pull_request", labelled.as_bytes()).unwrap() {
            Some(HostEvent::PullRequest(e)) => {
                assert_eq!(e.action, Some(PrAction::Other("label_updated".into())))
            }
            _ => panic!("expected PullRequest"),
        }
    }

    #[test]
    fn pull_request_without_any_number_is_invalid() {
        let payload = format!(r#"{{ "action": "opened", "repository": {REPOSITORY} }}"#);
        let result = parse_webhook("pull_request", payload.as_bytes());
        assert!(matches!(
            result,
            Err(ParseError::InvalidField {
                field: "number",
                ..
            })
        ));
    }

    #[test]
    fn unknown_event_type_returns_none() {
        let payload = b"{}";

        assert!(parse_webhook("ping", payload).unwrap().is_none());
        assert!(parse_webhook("issue_comment", payload).unwrap().is_none());
        assert!(parse_webhook("create", payload).unwrap().is_none());
        assert!(parse_webhook("unknown_event", payload).unwrap().is_none());
    }

    #[test]
    fn malformed_json_returns_error() {
        let result = parse_webhook("push", b"not valid json");
        assert!(matches!(result, Err(ParseError::JsonError(_))));
    }

    #[test]
    fn missing_repository_returns_error() {
        let payload = br#"{ "ref": "refs/heads/main", "after": "abc" }"#;
        assert!(parse_webhook("push", payload).is_err());
    }
}
