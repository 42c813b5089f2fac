use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepo(String),

    #[error("Unknown revision: {0}")]
    UnknownRevision(String),

    #[error("Requested {requested} commits but only {available} are reachable from {tip}")]
    NotEnoughCommits {
        requested: u32,
        available: usize,
        tip: String,
    },

    #[error("No patch files found in {0}")]
    NoPatches(String),

    #[error("Failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Git operation failed: {0}")]
    GitOperationFailed(#[from] git2::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
