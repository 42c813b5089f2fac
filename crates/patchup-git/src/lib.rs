//! # patchup-git
//!
//! Git operations for patchup.
//!
//! This crate wraps the `git` command-line tool behind the [`VcsBackend`]
//! trait so the workflow engine never builds command lines itself.
//!
//! ## Overview
//!
//! Three operations make up the patch workflow:
//! - Export a commit range as numbered patch files (`git format-patch`)
//! - Apply a directory of patch files with a three-way merge (`git am -3`)
//! - Clear the patch directory
//!
//! Before exporting, [`GitCli`] opens the repository with `git2` to make sure
//! the requested revision exists and enough commits are reachable from it.
//!
//! ## Key Types
//!
//! - [`VcsBackend`] - Capability trait used by the workflow engine
//! - [`GitCli`] - Implementation that spawns the `git` binary
//! - [`CommitRange`] - Commit count and/or SHA selecting the commits to export
//! - [`GitError`] - Errors from spawning git or inspecting the repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use patchup_git::{CommitRange, GitCli, VcsBackend};
//! use std::path::Path;
//!
//! let git = GitCli::new();
//! let range = CommitRange::new(Some(2), Some("bdb48c8".into())).unwrap();
//!
//! git.verify_range(&range).await?;
//! let files = git.create_patches(&range, Path::new("./patch_files")).await?;
//! println!("Wrote {} patch files", files.len());
//! ```

mod backend;
mod cli;
mod error;
mod preflight;
mod range;

pub use backend::VcsBackend;
pub use cli::{GitCli, GitOutput};
pub use error::GitError;
pub use preflight::verify_range;
pub use range::CommitRange;
