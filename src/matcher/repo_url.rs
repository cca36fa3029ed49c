//! Loose comparison of repository URLs.
//!
//! The same repository can be written many ways: with or without `.git`, with
//! a trailing slash, over HTTPS or SSH, in scp form (`git@host:owner/repo`),
//! in different case. Two URLs loosely match when their host and normalised
//! path agree. Scheme, port and credentials are ignored.

use url::Url;

/// A repository URL reduced to the parts that identify the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    host: String,
    path: String,
}

impl RepoUrl {
    /// Parses a URL, scp-like address or local path.
    ///
    /// Returns `None` for blank input, input containing whitespace, and
    /// scheme-qualified URLs the `url` crate rejects.
    pub fn parse(s: &str) -> Option<RepoUrl> {
        let s = s.trim();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return None;
        }

        if s.contains("://") {
            let url = Url::parse(s).ok()?;
            return Some(RepoUrl::new(url.host_str().unwrap_or_default(), url.path()));
        }

        if let Some((host, path)) = split_scp(s) {
            return Some(RepoUrl::new(host, path));
        }

        Some(RepoUrl::new("", s))
    }

    fn new(host: &str, path: &str) -> RepoUrl {
        RepoUrl {
            host: host.to_ascii_lowercase(),
            path: normalize_path(path),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if both URLs name the same repository.
    pub fn loosely_matches(&self, other: &RepoUrl) -> bool {
        self.host == other.host && self.path == other.path
    }
}

/// Splits `[user@]host:path`, where the colon comes before any slash.
fn split_scp(s: &str) -> Option<(&str, &str)> {
    let colon = s.find(':')?;
    if s[..colon].contains('/') {
        return None;
    }
    let authority = &s[..colon];
    let host = authority.rsplit('@').next().unwrap_or(authority);
    if host.is_empty() {
        return None;
    }
    Some((host, &s[colon + 1..]))
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_ascii_lowercase()
}

/// Returns true if `a` and `b` parse and name the same repository.
pub fn loosely_matches(a: &str, b: &str) -> bool {
    match (RepoUrl::parse(a), RepoUrl::parse(b)) {
        (Some(a), Some(b)) => a.loosely_matches(&b),
        _ => false,
    }
}
