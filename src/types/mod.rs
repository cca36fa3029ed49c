//! Core domain types: identifiers, heads and revisions.
//!
//! Every value here is built fresh for one event and never mutated after
//! construction.

pub mod head;
pub mod ids;
pub mod revision;

pub use head::{
    BranchHead, CheckoutStrategy, Head, HeadOrigin, PullRequestHead, StrategySet, TagHead,
};
pub use ids::{PrNumber, RepoId, Sha};
pub use revision::{BranchRevision, PullRequestRevision, Revision, TagRevision};
