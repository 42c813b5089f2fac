use colored::Colorize;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use patchup_git::{GitError, VcsBackend};

use crate::{
    confirm_or_explain, inspect_directory, ConfirmGate, Outcome, PatchRequest, Prompter,
    WorkflowError,
};

/// Name users type to run the tool, used in printed guidance
pub const BIN_NAME: &str = "patchup";

/// Runs the `create`, `apply` and `delete` verbs
pub struct PatchWorkflow<V, P, W> {
    vcs: V,
    prompter: P,
    out: W,
}

impl<V, P, W> PatchWorkflow<V, P, W>
where
    V: VcsBackend,
    P: Prompter,
    W: Write + Send,
{
    pub fn new(vcs: V, prompter: P, out: W) -> Self {
        Self { vcs, prompter, out }
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Consume the workflow and hand back the console sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Export the requested commits into the request's output directory
    pub async fn create(&mut self, request: &PatchRequest) -> Result<Outcome, WorkflowError> {
        let range = request.range()?;

        if let Err(e) = self.vcs.verify_range(&range).await {
            return self.report_failure("create", &e);
        }

        inspect_directory(&request.output_dir, &mut self.out).await?;

        let gate = ConfirmGate::new("Continue?")
            .explain("Exiting. Remove files before continuing.")
            .explain(format!(
                "To remove patch files, run: {}",
                format!("{} delete", BIN_NAME).yellow()
            ));

        if !confirm_or_explain(&self.prompter, &mut self.out, &gate).await? {
            return Ok(Outcome::Declined);
        }

        match self.vcs.create_patches(&range, &request.output_dir).await {
            Ok(files) => {
                info!(range = %range, files = files.len(), "Created patch files");
                writeln!(
                    self.out,
                    "{}",
                    format!("Created patch files in {}", request.output_dir.display()).green()
                )?;
                for file in &files {
                    let name = file.file_name().unwrap_or(file.as_os_str());
                    writeln!(self.out, "  {}", name.to_string_lossy().dimmed())?;
                }
                Ok(Outcome::Completed)
            }
            Err(e) => self.report_failure("create", &e),
        }
    }

    /// Apply every patch file in `dir` with a three-way merge
    pub async fn apply(&mut self, dir: &Path) -> Result<Outcome, WorkflowError> {
        inspect_directory(dir, &mut self.out).await?;

        match self.vcs.apply_patches(dir).await {
            Ok(patches) => {
                info!(patches = patches.len(), "Applied patch files");
                writeln!(self.out, "Applying patch files.")?;
                self.print_conflict_help()?;
                Ok(Outcome::Completed)
            }
            Err(e) => {
                let outcome = self.report_failure("apply", &e)?;
                // a failed `git am` leaves a session that can still be resumed
                if matches!(e, GitError::CommandFailed { .. }) {
                    self.print_conflict_help()?;
                }
                Ok(outcome)
            }
        }
    }

    /// Remove everything under `dir`
    pub async fn delete(&mut self, dir: &Path) -> Result<Outcome, WorkflowError> {
        let gate = ConfirmGate::new("Are you sure you want to delete all patch files?");

        if !confirm_or_explain(&self.prompter, &mut self.out, &gate).await? {
            return Ok(Outcome::Declined);
        }

        match self.vcs.delete_patches(dir).await {
            Ok(removed) => {
                info!(dir = %dir.display(), removed, "Deleted patch files");
                writeln!(self.out, "Deleted patch files.")?;
                Ok(Outcome::Completed)
            }
            Err(e) => self.report_failure("delete", &e),
        }
    }

    fn print_conflict_help(&mut self) -> Result<(), WorkflowError> {
        writeln!(
            self.out,
            "If there are merge conflicts, resolve and then run \n{}, to continue,\n{}, to skip, or\n{} to abort.",
            "git am --continue".yellow(),
            "git am --skip".yellow(),
            "git am --abort".yellow()
        )?;
        Ok(())
    }

    fn report_failure(&mut self, verb: &str, error: &GitError) -> Result<Outcome, WorkflowError> {
        warn!(verb, error = %error, "Git operation failed");
        writeln!(self.out, "{}", "Something went wrong!".yellow())?;
        writeln!(self.out, "{}", error)?;
        Ok(Outcome::failed(error))
    }
}
