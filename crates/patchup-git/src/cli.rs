use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, trace};

use crate::{preflight, CommitRange, GitError, VcsBackend};

/// Output captured from a git invocation
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Non-empty stdout lines
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// [`VcsBackend`] that shells out to the `git` binary
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
    working_dir: PathBuf,
    three_way: bool,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("git"),
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            three_way: true,
        }
    }

    pub fn with_binary(mut self, binary: PathBuf) -> Self {
        self.binary = binary;
        self
    }

    pub fn with_working_dir(mut self, working_dir: PathBuf) -> Self {
        self.working_dir = working_dir;
        self
    }

    pub fn with_three_way(mut self, three_way: bool) -> Self {
        self.three_way = three_way;
        self
    }

    /// Relative patch directories are taken relative to the working directory
    fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.working_dir.join(dir)
        }
    }

    /// Run git with `args`, failing on a non-zero exit code
    pub async fn run(&self, args: &[OsString]) -> Result<GitOutput, GitError> {
        let start = Instant::now();
        let command = self.describe(args);

        debug!(
            command = %command,
            working_dir = %self.working_dir.display(),
            "Spawning git"
        );

        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(&self.working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        let result = GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        };

        trace!(stdout = %result.stdout, stderr = %result.stderr, "git output");
        debug!(
            exit_code = result.exit_code,
            duration_ms = result.duration.as_millis(),
            "git completed"
        );

        if !result.success() {
            return Err(GitError::CommandFailed {
                command,
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }

        Ok(result)
    }

    fn describe(&self, args: &[OsString]) -> String {
        let mut parts = vec![self.binary.display().to_string()];
        parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    /// `git am` arguments for `patches`
    fn am_args(&self, patches: &[PathBuf]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["am".into()];
        if self.three_way {
            args.push("-3".into());
        }
        args.extend(patches.iter().map(|p| p.as_os_str().to_os_string()));
        args
    }

    /// Patch files in `dir`, in series order
    async fn collect_patches(dir: &Path) -> Result<Vec<PathBuf>, GitError> {
        let mut patches = Vec::new();

        if !tokio::fs::try_exists(dir).await? {
            return Ok(patches);
        }

        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_patch = path.extension().is_some_and(|ext| ext == "patch");
            if is_patch && entry.file_type().await?.is_file() {
                patches.push(path);
            }
        }

        patches.sort_by_cached_key(|path| series_key(path));
        Ok(patches)
    }
}

/// Sort key for `NNNN-subject.patch` names. The number is compared as a
/// number since format-patch widens it past four digits; unnumbered files
/// go last, by name.
fn series_key(path: &Path) -> (bool, u64, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let digits: String = name.chars().take_while(char::is_ascii_digit).collect();

    match digits.parse::<u64>() {
        Ok(number) => (false, number, name),
        Err(_) => (true, 0, name),
    }
}

#[async_trait]
impl VcsBackend for GitCli {
    async fn verify_range(&self, range: &CommitRange) -> Result<(), GitError> {
        preflight::verify_range(&self.working_dir, range)
    }

    async fn create_patches(
        &self,
        range: &CommitRange,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, GitError> {
        let dir = self.resolve(dir);

        let mut args: Vec<OsString> = vec!["format-patch".into(), "-o".into(), dir.into()];
        args.extend(range.format_patch_args().into_iter().map(OsString::from));

        let output = self.run(&args).await?;
        let files: Vec<PathBuf> = output.stdout_lines().map(PathBuf::from).collect();

        debug!(range = %range, files = files.len(), "Created patch files");
        Ok(files)
    }

    async fn apply_patches(&self, dir: &Path) -> Result<Vec<PathBuf>, GitError> {
        let dir = self.resolve(dir);
        let patches = Self::collect_patches(&dir).await?;

        if patches.is_empty() {
            return Err(GitError::NoPatches(dir.display().to_string()));
        }

        self.run(&self.am_args(&patches)).await?;

        debug!(patches = patches.len(), "Applied patch files");
        Ok(patches)
    }

    async fn delete_patches(&self, dir: &Path) -> Result<usize, GitError> {
        let dir = self.resolve(dir);

        if !tokio::fs::try_exists(&dir).await? {
            return Ok(0);
        }

        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                tokio::fs::remove_dir_all(&path).await?;
            } else {
                tokio::fs::remove_file(&path).await?;
            }
            trace!(path = %path.display(), "Removed");
            removed += 1;
        }

        debug!(dir = %dir.display(), removed, "Deleted patch files");
        Ok(removed)
    }
}
