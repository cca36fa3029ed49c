//! Newtype wrappers for identifiers carried by webhook payloads.
//!
//! These keep pull request numbers, commit ids and repository coordinates from
//! being mixed up with plain strings and integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pull request number within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrNumber(pub u64);

impl fmt::Display for PrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for PrNumber {
    fn from(n: u64) -> Self {
        PrNumber(n)
    }
}

/// A commit id as reported by the forge.
///
/// The value is opaque: no format is enforced. The all-zero id is the
/// sentinel the forge uses for "no commit" on the before side of a ref
/// creation and the after side of a ref deletion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sha(pub String);

impl Sha {
    /// The all-zero sentinel id.
    pub const NULL: &'static str = "0000000000000000000000000000000000000000";

    /// Creates a new Sha from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Sha(s.into())
    }

    /// Returns true if this is the all-zero sentinel.
    pub fn is_null(&self) -> bool {
        self.0 == Self::NULL
    }

    /// Returns true if this id is blank or the null sentinel.
    pub fn is_absent(&self) -> bool {
        self.0.trim().is_empty() || self.is_null()
    }

    /// Returns the SHA as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a short (7-character) version of the SHA for display.
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Sha {
    fn from(s: String) -> Self {
        Sha(s)
    }
}

impl From<&str> for Sha {
    fn from(s: &str) -> Self {
        Sha(s.to_string())
    }
}

/// A repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Compares owner and name the way the forge does: ASCII case-insensitively.
    pub fn same_repository(&self, owner: &str, repo: &str) -> bool {
        self.owner.eq_ignore_ascii_case(owner) && self.repo.eq_ignore_ascii_case(repo)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod pr_number {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn display_format(n: u64) {
                let pr = PrNumber(n);
                prop_assert_eq!(format!("{}", pr), format!("#{}", n));
            }
        }
    }

    mod sha {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serde_roundtrip(s in "[0-9a-f]{40}") {
                let sha = Sha::new(&s);
                let json = serde_json::to_string(&sha).unwrap();
                let parsed: Sha = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(sha, parsed);
            }

            #[test]
            fn real_ids_are_not_absent(s in "[0-9a-f]{40}") {
                prop_assume!(s != Sha::NULL);
                prop_assert!(!Sha::new(&s).is_absent());
            }
        }

        #[test]
        fn null_sentinel_is_absent() {
            assert!(Sha::new(Sha::NULL).is_null());
            assert!(Sha::new(Sha::NULL).is_absent());
        }

        #[test]
        fn blank_is_absent() {
            assert!(Sha::new("   ").is_absent());
            assert!(Sha::new("").is_absent());
            assert!(!Sha::new("").is_null());
        }

        #[test]
        fn short_handles_short_input() {
            let sha = Sha::new("abc");
            assert_eq!(sha.short(), "abc");
        }
    }

    mod repo_id {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn display_format(
                owner in "[a-zA-Z][a-zA-Z0-9-]{0,38}",
                repo in "[a-zA-Z][a-zA-Z0-9_-]{0,99}"
            ) {
                let id = RepoId::new(&owner, &repo);
                prop_assert_eq!(format!("{}", id), format!("{}/{}", owner, repo));
            }

            #[test]
            fn same_repository_ignores_case(
                owner in "[a-zA-Z][a-zA-Z0-9-]{0,38}",
                repo in "[a-zA-Z][a-zA-Z0-9_-]{0,99}"
            ) {
                let id = RepoId::new(&owner, &repo);
                prop_assert!(id.same_repository(&owner.to_uppercase(), &repo.to_lowercase()));
            }
        }

        #[test]
        fn different_owner_is_not_same_repository() {
            let id = RepoId::new("alice", "widgets");
            assert!(!id.same_repository("bob", "widgets"));
            assert!(!id.same_repository("alice", "gadgets"));
        }
    }
}
