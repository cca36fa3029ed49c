//! Scoped request context for reading a source's discovery settings.
//!
//! A [`SourceRequest`] may hold a session against the forge (for example an
//! authenticated API client). The session is closed when the request is
//! dropped, so every exit path of a resolution releases it.

use thiserror::Error;
use tracing::debug;

use crate::types::{RepoId, StrategySet};

use super::{SourceConfig, SourceTrait};

/// Errors raised while opening a request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The source configuration cannot be used.
    #[error("invalid configuration for {repo}: {reason}")]
    InvalidConfiguration { repo: RepoId, reason: String },

    /// No session could be opened against the forge.
    #[error("session unavailable for {repo}: {reason}")]
    SessionUnavailable { repo: RepoId, reason: String },
}

/// A handle held for the lifetime of a request.
pub trait Session: Send {
    /// Releases the handle. Called exactly once.
    fn close(&mut self);
}

/// Opens sessions for requests.
pub trait SessionProvider: Send + Sync {
    /// Opens a session for `source`. `Ok(None)` means no session is needed.
    fn open(&self, source: &SourceConfig) -> Result<Option<Box<dyn Session>>, RequestError>;
}

/// Provider for deployments that never need a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSessions;

impl SessionProvider for NoSessions {
    fn open(&self, _source: &SourceConfig) -> Result<Option<Box<dyn Session>>, RequestError> {
        Ok(None)
    }
}

/// Discovery settings folded from a source's traits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceContext {
    fetch_origin_prs: bool,
    fetch_fork_prs: bool,
    origin_pr_strategies: StrategySet,
    fork_pr_strategies: StrategySet,
}

impl SourceContext {
    pub fn new() -> Self {
        SourceContext::default()
    }

    /// Applies traits in order. Repeated pull request traits add strategies;
    /// an enabled class with no strategies yields no heads.
    pub fn with_traits(mut self, traits: &[SourceTrait]) -> Self {
        for t in traits {
            match t {
                // Push resolution does not consult branch or tag discovery.
                SourceTrait::BranchDiscovery | SourceTrait::TagDiscovery => {}
                SourceTrait::OriginPullRequestDiscovery { strategies } => {
                    self.fetch_origin_prs = true;
                    self.origin_pr_strategies.extend(strategies.iter().copied());
                }
                SourceTrait::ForkPullRequestDiscovery { strategies } => {
                    self.fetch_fork_prs = true;
                    self.fork_pr_strategies.extend(strategies.iter().copied());
                }
            }
        }
        self
    }

    /// Checks the source names a repository and opens a request for it.
    pub fn new_request(
        self,
        source: &SourceConfig,
        sessions: &dyn SessionProvider,
    ) -> Result<SourceRequest, RequestError> {
        let repo = source.repo_id();

        if source.owner.trim().is_empty() || source.repository.trim().is_empty() {
            return Err(RequestError::InvalidConfiguration {
                repo,
                reason: "owner and repository must be set".to_string(),
            });
        }

        let session = sessions.open(source)?;
        debug!(source = %repo, session = session.is_some(), "Opened source request");

        Ok(SourceRequest {
            source: repo,
            context: self,
            session,
        })
    }
}

/// A request scoped to a single resolution.
pub struct SourceRequest {
    source: RepoId,
    context: SourceContext,
    session: Option<Box<dyn Session>>,
}

impl SourceRequest {
    /// True if any pull requests are discovered.
    pub fn is_fetch_prs(&self) -> bool {
        self.context.fetch_origin_prs || self.context.fetch_fork_prs
    }

    pub fn is_fetch_origin_prs(&self) -> bool {
        self.context.fetch_origin_prs
    }

    pub fn is_fetch_fork_prs(&self) -> bool {
        self.context.fetch_fork_prs
    }

    pub fn origin_pr_strategies(&self) -> &StrategySet {
        &self.context.origin_pr_strategies
    }

    pub fn fork_pr_strategies(&self) -> &StrategySet {
        &self.context.fork_pr_strategies
    }
}

impl std::fmt::Debug for SourceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRequest")
            .field("source", &self.source)
            .field("context", &self.context)
            .field("session", &self.session.is_some())
            .finish()
    }
}

impl Drop for SourceRequest {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            debug!(source = %self.source, "Released source request");
        }
    }
}
