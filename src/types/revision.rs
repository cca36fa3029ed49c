//! Revisions: a head bound to a concrete commit.

use serde::{Deserialize, Serialize};

use super::head::{BranchHead, CheckoutStrategy, Head, PullRequestHead, TagHead};
use super::ids::Sha;

/// A branch at a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchRevision {
    pub head: BranchHead,
    pub hash: Sha,
}

impl BranchRevision {
    pub fn new(head: BranchHead, hash: impl Into<Sha>) -> Self {
        BranchRevision {
            head,
            hash: hash.into(),
        }
    }
}

/// A tag at a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagRevision {
    pub head: TagHead,
    pub hash: Sha,
}

impl TagRevision {
    pub fn new(head: TagHead, hash: impl Into<Sha>) -> Self {
        TagRevision {
            head,
            hash: hash.into(),
        }
    }
}

/// A pull request revision.
///
/// A merge checkout depends on both the target branch and the origin branch,
/// so both commits are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestRevision {
    pub head: PullRequestHead,
    pub target: BranchRevision,
    pub origin: BranchRevision,
}

impl PullRequestRevision {
    pub fn new(head: PullRequestHead, target: BranchRevision, origin: BranchRevision) -> Self {
        PullRequestRevision {
            head,
            target,
            origin,
        }
    }

    /// Returns true if building either revision would produce the same result.
    ///
    /// A head-only checkout ignores the target branch, so only the origin
    /// commit is compared for it.
    pub fn equivalent(&self, other: &PullRequestRevision) -> bool {
        if self.head != other.head {
            return false;
        }
        match self.head.strategy {
            CheckoutStrategy::Head => self.origin.hash == other.origin.hash,
            CheckoutStrategy::Merge => {
                self.origin.hash == other.origin.hash && self.target.hash == other.target.hash
            }
        }
    }
}

/// Any revision a resolution can produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Revision {
    Branch(BranchRevision),
    Tag(TagRevision),
    PullRequest(PullRequestRevision),
}

impl Revision {
    /// The head this revision belongs to.
    pub fn head(&self) -> Head {
        match self {
            Revision::Branch(r) => Head::Branch(r.head.clone()),
            Revision::Tag(r) => Head::Tag(r.head.clone()),
            Revision::PullRequest(r) => Head::PullRequest(r.head.clone()),
        }
    }

    /// The commit that would be checked out (the origin commit for pull requests).
    pub fn hash(&self) -> &Sha {
        match self {
            Revision::Branch(r) => &r.hash,
            Revision::Tag(r) => &r.hash,
            Revision::PullRequest(r) => &r.origin.hash,
        }
    }

    /// Returns true if a build of `self` is interchangeable with a build of `other`.
    ///
    /// Consumers use this to decide whether a previously seen revision is stale.
    pub fn equivalent(&self, other: &Revision) -> bool {
        match (self, other) {
            (Revision::PullRequest(a), Revision::PullRequest(b)) => a.equivalent(b),
            (a, b) => a.head() == b.head() && a.hash() == b.hash(),
        }
    }
}

impl From<BranchRevision> for Revision {
    fn from(r: BranchRevision) -> Self {
        Revision::Branch(r)
    }
}

impl From<TagRevision> for Revision {
    fn from(r: TagRevision) -> Self {
        Revision::Tag(r)
    }
}

impl From<PullRequestRevision> for Revision {
    fn from(r: PullRequestRevision) -> Self {
        Revision::PullRequest(r)
    }
}
