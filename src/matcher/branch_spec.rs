//! Branch name patterns as written in legacy job configuration.
//!
//! Candidates are remote-qualified branch names such as `origin/main`.
//!
//! | Spec | Matches |
//! |------|---------|
//! | `main` | `main` on any remote |
//! | `*/main` | `main` on any remote |
//! | `origin/release-*` | `release-1`, `release-2`, ... on `origin` |
//! | `**` | everything |
//! | `refs/heads/main` | `main` on any remote |
//! | `remotes/origin/main`, `refs/remotes/origin/main` | `main` on `origin` |
//! | `:^origin/(main\|dev)$` | regular expression |
//! | `${BRANCH}` | parametrised, matched by the caller |

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A branch name pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchSpec(String);

impl BranchSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        BranchSpec(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the spec refers to a build parameter and cannot be evaluated here.
    pub fn is_parametrized(&self) -> bool {
        self.0.contains('$')
    }

    /// Returns true if `candidate` (e.g. `origin/main`) matches this spec.
    ///
    /// An invalid regular expression matches nothing.
    pub fn matches(&self, candidate: &str) -> bool {
        match self.pattern() {
            Ok(re) => re.is_match(candidate),
            Err(e) => {
                warn!(spec = %self.0, error = %e, "Invalid branch spec");
                false
            }
        }
    }

    fn pattern(&self) -> Result<Regex, regex::Error> {
        let spec = self.0.trim();

        if let Some(expr) = spec.strip_prefix(':') {
            return Regex::new(&format!("^(?:{expr})$"));
        }

        let (remote, branch) = if let Some(rest) = spec.strip_prefix("refs/heads/") {
            (ANY_REMOTE, rest)
        } else if let Some(rest) = spec.strip_prefix("refs/remotes/") {
            ("", rest)
        } else if let Some(rest) = spec.strip_prefix("remotes/") {
            ("", rest)
        } else if !spec.contains('/') && !spec.contains("**") {
            (ANY_REMOTE, spec)
        } else {
            ("", spec)
        };

        Regex::new(&format!("^{remote}{}$", wildcard_to_regex(branch)))
    }
}

const ANY_REMOTE: &str = "[^/]+/";

fn wildcard_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2);
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            if chars.peek() == Some(&'*') {
                chars.next();
                out.push_str(".*");
            } else {
                out.push_str("[^/]*");
            }
        } else {
            out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    out
}

impl From<&str> for BranchSpec {
    fn from(s: &str) -> Self {
        BranchSpec::new(s)
    }
}
