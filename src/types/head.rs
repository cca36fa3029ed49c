//! Heads: the named references a build-trigger subsystem can check out.
//!
//! A head is identified by its name alone. Tags carry an advisory creation
//! timestamp and pull requests carry origin metadata, but neither takes part
//! in equality, hashing or ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::ids::PrNumber;

/// How a pull request's content is materialised for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStrategy {
    /// Build the result of merging the pull request into its target branch.
    Merge,
    /// Build the pull request's own head commit.
    Head,
}

impl CheckoutStrategy {
    /// The upper-case name used in disambiguated pull request head ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStrategy::Merge => "MERGE",
            CheckoutStrategy::Head => "HEAD",
        }
    }
}

impl fmt::Display for CheckoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered set of checkout strategies.
pub type StrategySet = BTreeSet<CheckoutStrategy>;

/// A branch head.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchHead {
    pub name: String,
}

impl BranchHead {
    pub fn new(name: impl Into<String>) -> Self {
        BranchHead { name: name.into() }
    }
}

/// A tag head.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawTagHead")]
pub struct TagHead {
    pub name: String,
    /// Creation time in milliseconds since the epoch; zero when unknown.
    pub timestamp: i64,
}

impl TagHead {
    pub fn new(name: impl Into<String>, timestamp: i64) -> Self {
        TagHead {
            name: name.into(),
            timestamp: timestamp.max(0),
        }
    }
}

#[derive(Deserialize)]
struct RawTagHead {
    name: String,
    #[serde(default)]
    timestamp: i64,
}

impl From<RawTagHead> for TagHead {
    fn from(raw: RawTagHead) -> Self {
        TagHead::new(raw.name, raw.timestamp)
    }
}

impl PartialEq for TagHead {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TagHead {}

impl Hash for TagHead {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for TagHead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TagHead {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Where a pull request's source branch lives relative to the tracked repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum HeadOrigin {
    /// The source branch is in the tracked repository.
    SameRepo,
    /// The source branch is in another repository, labelled `owner/repo`.
    Fork(String),
}

/// A pull request head, one per applicable checkout strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestHead {
    /// `PR-<n>`, or `PR-<n>-<STRATEGY>` when several strategies coexist.
    pub id: String,
    pub number: PrNumber,
    pub target: BranchHead,
    pub strategy: CheckoutStrategy,
    pub origin: HeadOrigin,
    pub origin_owner: String,
    pub origin_repository: String,
    pub origin_ref: String,
    pub title: Option<String>,
}

impl PullRequestHead {
    /// Builds the head id for `number`.
    ///
    /// The strategy suffix is only added when `strategy_count` is above one,
    /// which keeps ids unique within a single resolution.
    pub fn head_id(number: PrNumber, strategy: CheckoutStrategy, strategy_count: usize) -> String {
        if strategy_count > 1 {
            format!("PR-{}-{}", number.0, strategy.as_str())
        } else {
            format!("PR-{}", number.0)
        }
    }

    /// The branch the pull request was raised from.
    pub fn origin_branch(&self) -> BranchHead {
        BranchHead::new(self.origin_ref.clone())
    }
}

impl PartialEq for PullRequestHead {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PullRequestHead {}

impl Hash for PullRequestHead {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for PullRequestHead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PullRequestHead {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// Any head an event can affect.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Head {
    Branch(BranchHead),
    Tag(TagHead),
    PullRequest(PullRequestHead),
}

impl Head {
    /// The head's identity.
    pub fn name(&self) -> &str {
        match self {
            Head::Branch(h) => &h.name,
            Head::Tag(h) => &h.name,
            Head::PullRequest(h) => &h.id,
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<BranchHead> for Head {
    fn from(h: BranchHead) -> Self {
        Head::Branch(h)
    }
}

impl From<TagHead> for Head {
    fn from(h: TagHead) -> Self {
        Head::Tag(h)
    }
}

impl From<PullRequestHead> for Head {
    fn from(h: PullRequestHead) -> Self {
        Head::PullRequest(h)
    }
}
