use std::path::PathBuf;

use patchup_git::CommitRange;

use crate::WorkflowError;

/// Patch directory used when neither the command line nor a config file names one
pub const DEFAULT_PATCH_DIR: &str = "./patch_files";

/// What `create` should export and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    pub commit_count: Option<u32>,
    pub commit_sha: Option<String>,
    pub output_dir: PathBuf,
}

impl PatchRequest {
    pub fn new(commit_count: Option<u32>, commit_sha: Option<String>) -> Self {
        Self {
            commit_count,
            commit_sha,
            output_dir: PathBuf::from(DEFAULT_PATCH_DIR),
        }
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn range(&self) -> Result<CommitRange, WorkflowError> {
        CommitRange::new(self.commit_count, self.commit_sha.clone())
            .ok_or(WorkflowError::EmptyRange)
    }
}
