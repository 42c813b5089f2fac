use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::{CommitRange, GitError};

/// The version-control capability the patch workflow runs against
#[async_trait]
pub trait VcsBackend: Send + Sync {
    /// Check that the range can be exported before anything touches disk
    async fn verify_range(&self, _range: &CommitRange) -> Result<(), GitError> {
        Ok(())
    }

    /// Write one patch file per commit in `range` into `dir`
    async fn create_patches(
        &self,
        range: &CommitRange,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, GitError>;

    /// Apply every patch file in `dir` using a three-way merge
    async fn apply_patches(&self, dir: &Path) -> Result<Vec<PathBuf>, GitError>;

    /// Remove every entry under `dir`, returning how many were removed
    async fn delete_patches(&self, dir: &Path) -> Result<usize, GitError>;
}
