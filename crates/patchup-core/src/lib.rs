//! # patchup-core
//!
//! The patch workflow behind each `patchup` verb.
//!
//! - `create` exports a commit range into the patch directory after the user
//!   confirms.
//! - `apply` applies the patch directory with a three-way merge.
//! - `delete` clears the patch directory after the user confirms.
//!
//! Git and the interactive prompt are reached through the
//! [`VcsBackend`](patchup_git::VcsBackend) and [`Prompter`] traits, and all
//! user-facing text goes to the writer handed to [`PatchWorkflow`], so the
//! whole workflow runs in tests without a terminal or a repository.
//!
//! Git failures never abort a verb: they are reported on the console and
//! returned as [`Outcome::Failed`].

mod error;
mod inspect;
mod outcome;
mod prompt;
mod request;
mod workflow;

pub use error::WorkflowError;
pub use inspect::inspect_directory;
pub use outcome::Outcome;
pub use prompt::{confirm_or_explain, AssumeYes, ConfirmGate, DialoguerPrompter, Prompter};
pub use request::{PatchRequest, DEFAULT_PATCH_DIR};
pub use workflow::{PatchWorkflow, BIN_NAME};

pub use patchup_git::{CommitRange, GitError, VcsBackend};
