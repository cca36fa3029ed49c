//! Head resolution for `pull_request` events.
//!
//! One head is produced per applicable checkout strategy. When the payload no
//! longer embeds the pull request (it was deleted), the origin is unknown and
//! placeholder heads are emitted for every strategy that could apply, all
//! mapped to no revision. Consumers match on the head name, re-check it, find
//! it gone, and prune it.

use tracing::{debug, warn};

use crate::source::{SessionProvider, SourceConfig, SourceContext, SourceRequest};
use crate::types::{
    BranchHead, BranchRevision, CheckoutStrategy, Head, HeadOrigin, PullRequestHead,
    PullRequestRevision, Revision,
};
use crate::webhooks::classify::{EventType, classify_pull_request};
use crate::webhooks::{PullRequestEvent, PullRequestSnapshot};

use super::HeadMap;
use super::strategies::{is_fork, strategies_for, strategies_for_unknown_origin};

/// Branch name used for heads synthesised without a pull request snapshot.
pub const PLACEHOLDER_REF: &str = "dummy-name";

/// Resolves a pull request event against `source`.
///
/// Failures to open the source request are logged and yield an empty map.
pub fn resolve_pull_request(
    event: &PullRequestEvent,
    source: &SourceConfig,
    sessions: &dyn SessionProvider,
) -> HeadMap {
    let mut result = HeadMap::new();

    let request = match SourceContext::new()
        .with_traits(&source.traits)
        .new_request(source, sessions)
    {
        Ok(request) => request,
        Err(e) => {
            warn!(
                source = %source.repo_id(),
                pr = %event.number,
                error = %e,
                "Could not open source request, skipping pull request event"
            );
            return result;
        }
    };

    if !request.is_fetch_prs() {
        debug!(source = %source.repo_id(), "Pull request discovery disabled");
        return result;
    }

    match &event.pull_request {
        None => add_deleted_heads(event, source, &request, &mut result),
        Some(pr) => add_heads(event, pr, source, &request, &mut result),
    }

    debug!(
        source = %source.repo_id(),
        pr = %event.number,
        heads = result.len(),
        "Resolved pull request"
    );
    result
}

fn add_deleted_heads(
    event: &PullRequestEvent,
    source: &SourceConfig,
    request: &SourceRequest,
    result: &mut HeadMap,
) {
    let strategies = strategies_for_unknown_origin(request);
    for strategy in &strategies {
        let head = PullRequestHead {
            id: PullRequestHead::head_id(event.number, *strategy, strategies.len()),
            number: event.number,
            target: BranchHead::new(PLACEHOLDER_REF),
            strategy: CheckoutStrategy::Merge,
            origin: HeadOrigin::SameRepo,
            origin_owner: source.owner.clone(),
            origin_repository: source.repository.clone(),
            origin_ref: PLACEHOLDER_REF.to_string(),
            title: None,
        };
        result.insert(head.into(), None);
    }
}

fn add_heads(
    event: &PullRequestEvent,
    pr: &PullRequestSnapshot,
    source: &SourceConfig,
    request: &SourceRequest,
    result: &mut HeadMap,
) {
    let head_repo = &pr.head.repo;
    let fork = is_fork(source, head_repo);
    let strategies = strategies_for(request, fork);
    let removed = classify_pull_request(event) == EventType::Removed;

    let origin = if fork {
        HeadOrigin::Fork(head_repo.to_string())
    } else {
        HeadOrigin::SameRepo
    };

    for strategy in &strategies {
        let head = PullRequestHead {
            id: PullRequestHead::head_id(pr.number, *strategy, strategies.len()),
            number: pr.number,
            target: BranchHead::new(&pr.base.ref_name),
            strategy: *strategy,
            origin: origin.clone(),
            origin_owner: head_repo.owner.clone(),
            origin_repository: head_repo.repo.clone(),
            origin_ref: pr.head.ref_name.clone(),
            title: pr.title.clone(),
        };

        let revision = if removed {
            None
        } else {
            Some(Revision::PullRequest(PullRequestRevision::new(
                head.clone(),
                BranchRevision::new(head.target.clone(), pr.base.sha.clone()),
                BranchRevision::new(head.origin_branch(), pr.head.sha.clone()),
            )))
        };
        result.insert(Head::PullRequest(head), revision);
    }
}
