//! Checkout strategy selection for pull requests.
//!
//! Origin and fork pull requests are enabled and configured independently.
//! A pull request counts as coming from the source itself only when its head
//! repository has the source's owner and name; anything else is a fork.

use crate::source::{SourceConfig, SourceRequest};
use crate::types::{RepoId, StrategySet};

/// Returns true if a pull request whose head lives in `head_repo` is a fork
/// pull request relative to `source`.
pub fn is_fork(source: &SourceConfig, head_repo: &RepoId) -> bool {
    !source.is_repository(head_repo)
}

/// The strategies to materialise for a pull request of the given origin class.
///
/// Empty when discovery of that class is disabled.
pub fn strategies_for(request: &SourceRequest, fork: bool) -> StrategySet {
    if fork {
        if request.is_fetch_fork_prs() {
            request.fork_pr_strategies().clone()
        } else {
            StrategySet::new()
        }
    } else if request.is_fetch_origin_prs() {
        request.origin_pr_strategies().clone()
    } else {
        StrategySet::new()
    }
}

/// The strategies for a pull request whose origin cannot be determined.
///
/// Both classes are possible, so the enabled sets are unioned.
pub fn strategies_for_unknown_origin(request: &SourceRequest) -> StrategySet {
    let mut strategies = strategies_for(request, true);
    strategies.extend(strategies_for(request, false));
    strategies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{NoSessions, SourceContext, SourceTrait};
    use crate::types::CheckoutStrategy;

    fn request(traits: &[SourceTrait]) -> SourceRequest {
        SourceContext::new()
            .with_traits(traits)
            .new_request(&SourceConfig::new("alice", "widgets"), &NoSessions)
            .unwrap()
    }

    fn origin(strategies: &[CheckoutStrategy]) -> SourceTrait {
        SourceTrait::OriginPullRequestDiscovery {
            strategies: strategies.iter().copied().collect(),
        }
    }

    fn fork(strategies: &[CheckoutStrategy]) -> SourceTrait {
        SourceTrait::ForkPullRequestDiscovery {
            strategies: strategies.iter().copied().collect(),
        }
    }

    #[test]
    fn same_owner_and_name_is_origin() {
        let source = SourceConfig::new("alice", "widgets");
        assert!(!is_fork(&source, &RepoId::new("ALICE", "Widgets")));
    }

    #[test]
    fn other_owner_or_name_is_fork() {
        let source = SourceConfig::new("alice", "widgets");
        assert!(is_fork(&source, &RepoId::new("bob", "widgets")));
        assert!(is_fork(&source, &RepoId::new("alice", "widgets-fork")));
    }

    #[test]
    fn disabled_class_yields_nothing() {
        let r = request(&[origin(&[CheckoutStrategy::Merge])]);
        assert!(strategies_for(&r, true).is_empty());
        assert_eq!(strategies_for(&r, false), [CheckoutStrategy::Merge].into());

        let r = request(&[fork(&[CheckoutStrategy::Head])]);
        assert!(strategies_for(&r, false).is_empty());
        assert_eq!(strategies_for(&r, true), [CheckoutStrategy::Head].into());
    }

    #[test]
    fn configured_sets_are_returned_whole() {
        let r = request(&[origin(&[CheckoutStrategy::Merge, CheckoutStrategy::Head])]);
        assert_eq!(strategies_for(&r, false).len(), 2);
    }

    #[test]
    fn unknown_origin_unions_enabled_sets() {
        let r = request(&[
            origin(&[CheckoutStrategy::Merge]),
            fork(&[CheckoutStrategy::Head]),
        ]);
        assert_eq!(
            strategies_for_unknown_origin(&r),
            [CheckoutStrategy::Merge, CheckoutStrategy::Head].into()
        );

        let r = request(&[origin(&[CheckoutStrategy::Head])]);
        assert_eq!(
            strategies_for_unknown_origin(&r),
            [CheckoutStrategy::Head].into()
        );
    }
}
