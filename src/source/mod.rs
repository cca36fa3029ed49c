//! Tracked sources and their discovery configuration.
//!
//! A source is one repository on the forge together with the set of traits
//! that say which heads to discover and how to check pull requests out.
//! Traits are folded into a [`SourceContext`], which opens a scoped
//! [`SourceRequest`] for the duration of one resolution.

pub mod request;

use serde::{Deserialize, Serialize};

use crate::types::{RepoId, StrategySet};

pub use request::{
    NoSessions, RequestError, Session, SessionProvider, SourceContext, SourceRequest,
};

/// A discovery trait applied to a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceTrait {
    /// Discover branches.
    BranchDiscovery,
    /// Discover tags.
    TagDiscovery,
    /// Discover pull requests raised from branches of the source itself.
    OriginPullRequestDiscovery { strategies: StrategySet },
    /// Discover pull requests raised from forks.
    ForkPullRequestDiscovery { strategies: StrategySet },
}

impl SourceTrait {
    /// The checkout strategies of a pull request discovery trait.
    pub fn strategies(&self) -> Option<&StrategySet> {
        match self {
            SourceTrait::OriginPullRequestDiscovery { strategies }
            | SourceTrait::ForkPullRequestDiscovery { strategies } => Some(strategies),
            SourceTrait::BranchDiscovery | SourceTrait::TagDiscovery => None,
        }
    }
}

/// A repository tracked by the build-trigger subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the forge, if known. Informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Owner (user or organisation) of the tracked repository.
    pub owner: String,

    /// Name of the tracked repository.
    pub repository: String,

    #[serde(default)]
    pub traits: Vec<SourceTrait>,
}

impl SourceConfig {
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        SourceConfig {
            server_url: None,
            owner: owner.into(),
            repository: repository.into(),
            traits: Vec::new(),
        }
    }

    /// Adds a trait.
    pub fn with_trait(mut self, source_trait: SourceTrait) -> Self {
        self.traits.push(source_trait);
        self
    }

    pub fn repo_id(&self) -> RepoId {
        RepoId::new(&self.owner, &self.repository)
    }

    /// Returns true if `repo` is this source's repository.
    pub fn is_repository(&self, repo: &RepoId) -> bool {
        repo.same_repository(&self.owner, &self.repository)
    }
}
