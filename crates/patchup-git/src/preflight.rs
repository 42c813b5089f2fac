use git2::Repository;
use std::path::Path;
use tracing::debug;

use crate::{CommitRange, GitError};

/// Make sure `range` can be exported from the repository containing
/// `working_dir`: the tip revision resolves to a commit, and when a count is
/// given, at least that many commits are reachable from the tip.
pub fn verify_range(working_dir: &Path, range: &CommitRange) -> Result<(), GitError> {
    let repo = Repository::discover(working_dir)
        .map_err(|_| GitError::NotARepo(working_dir.display().to_string()))?;

    let tip = range.tip();
    let commit = repo
        .revparse_single(tip)
        .and_then(|object| object.peel_to_commit())
        .map_err(|_| GitError::UnknownRevision(tip.to_string()))?;

    if let Some(requested) = range.count() {
        let mut walk = repo.revwalk()?;
        walk.push(commit.id())?;

        let available = walk
            .take(requested as usize)
            .filter_map(Result::ok)
            .count();

        if available < requested as usize {
            return Err(GitError::NotEnoughCommits {
                requested,
                available,
                tip: tip.to_string(),
            });
        }
    }

    debug!(tip = %tip, commit = %commit.id(), "Verified commit range");

    Ok(())
}
