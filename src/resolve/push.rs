//! Head resolution for `push` events.

use tracing::{debug, warn};

use crate::types::{BranchHead, BranchRevision, Head, Revision, Sha, TagHead, TagRevision};
use crate::webhooks::{PushEvent, RefKind, clean_ref};

use super::HeadMap;

/// Resolves a push into at most one head.
///
/// The revision is absent when the ref was deleted. Refs outside
/// `refs/heads/` and `refs/tags/` do not name a head and yield an empty map.
pub fn resolve_push(event: &PushEvent) -> HeadMap {
    let mut result = HeadMap::new();
    let name = clean_ref(&event.ref_name);
    let after = event.after.as_ref().filter(|s| !s.is_absent());

    let (head, revision): (Head, Option<Revision>) = match RefKind::of(&event.ref_name) {
        RefKind::Branch => {
            let head = BranchHead::new(name);
            let revision = after
                .map(|sha| Revision::from(BranchRevision::new(head.clone(), sha.clone())));
            (head.into(), revision)
        }
        RefKind::Tag => {
            let head = TagHead::new(name, 0);
            let revision =
                after.map(|sha| Revision::from(TagRevision::new(head.clone(), sha.clone())));
            (head.into(), revision)
        }
        RefKind::Other => {
            warn!(
                repo = %event.repository.id,
                ref_name = %event.ref_name,
                "Ignoring push to a ref that is neither a branch nor a tag"
            );
            return result;
        }
    };

    debug!(
        repo = %event.repository.id,
        head = %head,
        revision = revision.as_ref().map(Revision::hash).map(Sha::short),
        "Resolved push"
    );
    result.insert(head, revision);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{arb_branch_name, arb_real_sha, push_event};
    use proptest::prelude::*;

    const SHA: &str = "abc1230000000000000000000000000000000000";

    #[test]
    fn branch_push_resolves_to_branch_revision() {
        let event = push_event(
            "refs/heads/main",
            Some(Sha::new("1111111111111111111111111111111111111111")),
            Some(Sha::new(SHA)),
        );

        let result = resolve_push(&event);

        let head = BranchHead::new("main");
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.get(&Head::Branch(head.clone())),
            Some(&Some(Revision::Branch(BranchRevision::new(head, SHA))))
        );
    }

    #[test]
    fn tag_deletion_maps_to_absent() {
        let event = push_event(
            "refs/tags/v1.0",
            Some(Sha::new(SHA)),
            Some(Sha::new(Sha::NULL)),
        );

        let result = resolve_push(&event);

        assert_eq!(result.len(), 1);
        assert_eq!(result.get(&Head::Tag(TagHead::new("v1.0", 0))), Some(&None));
    }

    #[test]
    fn tag_creation_carries_after_sha() {
        let event = push_event("refs/tags/v2", Some(Sha::new(Sha::NULL)), Some(Sha::new(SHA)));

        let result = resolve_push(&event);

        let head = TagHead::new("v2", 0);
        assert_eq!(
            result.get(&Head::Tag(head.clone())),
            Some(&Some(Revision::Tag(TagRevision::new(head, SHA))))
        );
    }

    #[test]
    fn blank_after_maps_to_absent() {
        let event = push_event("refs/heads/gone", Some(Sha::new(SHA)), None);
        let result = resolve_push(&event);
        assert_eq!(result.get(&Head::Branch(BranchHead::new("gone"))), Some(&None));
    }

    #[test]
    fn other_refs_are_dropped() {
        let event = push_event("refs/notes/commits", None, Some(Sha::new(SHA)));
        assert!(resolve_push(&event).is_empty());
    }

    proptest! {
        #[test]
        fn branch_push_emits_exactly_one_pair(name in arb_branch_name(), after in arb_real_sha()) {
            let event = push_event(&format!("refs/heads/{name}"), None, Some(after.clone()));
            let result = resolve_push(&event);
            prop_assert_eq!(result.len(), 1);
            let (head, revision) = result.into_iter().next().unwrap();
            prop_assert_eq!(head.name(), name.as_str());
            prop_assert_eq!(revision.map(|r| r.hash().clone()), Some(after));
        }
    }
}
