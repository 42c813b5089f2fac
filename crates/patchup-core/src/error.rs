use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("A commit count or a commit SHA is required")]
    EmptyRange,

    #[error("Failed to inspect {}: {}", .path.display(), .source)]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Confirmation prompt failed: {0}")]
    Prompt(#[source] io::Error),

    #[error("Failed to write output: {0}")]
    Console(#[from] io::Error),
}
