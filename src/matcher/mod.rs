//! Relevance of push events to legacy, URL-configured polling jobs.
//!
//! Jobs that are not bound to a tracked source still want to poll when their
//! repository is pushed to. Such a job configures remote URLs and branch
//! specs; [`is_match`] decides whether a push concerns it.
//!
//! The HTTP service does not call this itself. A polling scheduler that owns
//! the legacy job definitions calls [`is_match`] with each parsed
//! [`HostEvent`] it receives.

pub mod branch_spec;
pub mod repo_url;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::webhooks::HostEvent;
use crate::webhooks::classify::R_HEADS;

pub use branch_spec::BranchSpec;
pub use repo_url::{RepoUrl, loosely_matches};

/// A named remote and the URLs it fetches from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub name: String,
    pub urls: Vec<String>,
}

/// The SCM configuration of a legacy job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitScmConfig {
    #[serde(default)]
    pub remotes: Vec<RemoteConfig>,

    #[serde(default)]
    pub branches: Vec<BranchSpec>,

    /// Opts the job out of commit-notification polling altogether.
    #[serde(default)]
    pub ignore_notify_commit: bool,
}

/// Returns true if `event` should trigger polling of the job configured by `scm`.
///
/// Only pushes can match. The event repository's URL must loosely match one
/// of the remote URLs, and then either a branch spec is parametrised or it
/// matches `<remote>/<branch>`.
pub fn is_match(event: &HostEvent, scm: &GitScmConfig) -> bool {
    let HostEvent::Push(push) = event else {
        return false;
    };

    if scm.ignore_notify_commit {
        return false;
    }

    let Some(event_url) = RepoUrl::parse(&push.repository.html_url) else {
        debug!(url = %push.repository.html_url, "Unparsable repository URL");
        return false;
    };

    let branch = push
        .ref_name
        .strip_prefix(R_HEADS)
        .unwrap_or(&push.ref_name);

    for remote in &scm.remotes {
        let candidate = format!("{}/{}", remote.name, branch);
        for url in &remote.urls {
            let Some(remote_url) = RepoUrl::parse(url) else {
                continue;
            };
            if !event_url.loosely_matches(&remote_url) {
                continue;
            }
            for spec in &scm.branches {
                if spec.is_parametrized() || spec.matches(&candidate) {
                    return true;
                }
            }
        }
    }

    false
}
