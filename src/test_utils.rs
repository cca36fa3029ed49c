//! Shared test fixtures and arbitrary generators for property-based testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

use crate::source::{RequestError, Session, SessionProvider, SourceConfig, SourceTrait};
use crate::types::{PrNumber, RepoId, Sha};
use crate::webhooks::{
    PrAction, PrRef, PullRequestEvent, PullRequestSnapshot, PushEvent, Repository,
};

/// A 40-hex commit id that is never the null sentinel.
pub fn arb_real_sha() -> impl Strategy<Value = Sha> {
    "[0-9a-f]{40}"
        .prop_filter("not the null sentinel", |s| s != Sha::NULL)
        .prop_map(Sha::new)
}

pub fn arb_branch_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9/-]{0,50}".prop_map(String::from)
}

/// The repository every fixture event is delivered for: `alice/widgets`.
pub fn repository() -> Repository {
    Repository {
        id: RepoId::new("alice", "widgets"),
        html_url: "https://gitea.example.com/alice/widgets".to_string(),
    }
}

pub fn push_event(ref_name: &str, before: Option<Sha>, after: Option<Sha>) -> PushEvent {
    PushEvent {
        repository: repository(),
        ref_name: ref_name.to_string(),
        before,
        after,
    }
}

/// Pull request #7 from `feature` (in `head_repo`) into `main` of `alice/widgets`.
pub fn pr_snapshot(head_repo: RepoId, base_sha: &str, head_sha: &str) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number: PrNumber(7),
        title: Some("Add feature".to_string()),
        head: PrRef {
            ref_name: "feature".to_string(),
            sha: Sha::new(head_sha),
            repo: head_repo,
        },
        base: PrRef {
            ref_name: "main".to_string(),
            sha: Sha::new(base_sha),
            repo: RepoId::new("alice", "widgets"),
        },
    }
}

pub fn pull_request_event(
    action: Option<PrAction>,
    pull_request: Option<PullRequestSnapshot>,
) -> PullRequestEvent {
    PullRequestEvent {
        repository: repository(),
        action,
        number: PrNumber(7),
        pull_request,
    }
}

/// `alice/widgets` with the given traits.
pub fn source_with(traits: Vec<SourceTrait>) -> SourceConfig {
    SourceConfig {
        traits,
        ..SourceConfig::new("alice", "widgets")
    }
}

/// Counts sessions opened and closed.
#[derive(Debug, Clone, Default)]
pub struct CountingSessions {
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl CountingSessions {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct CountingSession {
    closed: Arc<AtomicUsize>,
}

impl Session for CountingSession {
    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

impl SessionProvider for CountingSessions {
    fn open(&self, _source: &SourceConfig) -> Result<Option<Box<dyn Session>>, RequestError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Box::new(CountingSession {
            closed: Arc::clone(&self.closed),
        })))
    }
}

/// Refuses every session.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSessions;

impl SessionProvider for FailingSessions {
    fn open(&self, source: &SourceConfig) -> Result<Option<Box<dyn Session>>, RequestError> {
        Err(RequestError::SessionUnavailable {
            repo: source.repo_id(),
            reason: "forge unreachable".to_string(),
        })
    }
}
