use std::fmt;
use std::num::NonZeroU32;

/// Selects the commits handed to `git format-patch`.
///
/// - count only: the last `count` commits ending at `HEAD`
/// - sha only: every commit after `sha` up to `HEAD`
/// - both: `count` commits ending at `sha`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    count: Option<NonZeroU32>,
    sha: Option<String>,
}

impl CommitRange {
    /// Build a range. Returns `None` when neither a non-zero count nor a
    /// non-blank SHA is given.
    pub fn new(count: Option<u32>, sha: Option<String>) -> Option<Self> {
        let count = count.and_then(NonZeroU32::new);
        let sha = sha
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if count.is_none() && sha.is_none() {
            return None;
        }

        Some(Self { count, sha })
    }

    pub fn count(&self) -> Option<u32> {
        self.count.map(NonZeroU32::get)
    }

    pub fn sha(&self) -> Option<&str> {
        self.sha.as_deref()
    }

    /// The revision the range ends at (or starts after, for a SHA-only range).
    pub fn tip(&self) -> &str {
        self.sha.as_deref().unwrap_or("HEAD")
    }

    /// Revision arguments for `git format-patch`.
    pub fn format_patch_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(2);
        if let Some(count) = self.count {
            args.push(format!("-{}", count));
        }
        if let Some(ref sha) = self.sha {
            args.push(sha.clone());
        }
        args
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.count, self.sha.as_deref()) {
            (Some(count), Some(sha)) => write!(f, "{} commit(s) ending at {}", count, sha),
            (Some(count), None) => write!(f, "last {} commit(s)", count),
            (None, Some(sha)) => write!(f, "commits since {}", sha),
            (None, None) => write!(f, "empty range"),
        }
    }
}
