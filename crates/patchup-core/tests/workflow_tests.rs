use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use patchup_core::{
    inspect_directory, CommitRange, GitError, Outcome, PatchRequest, PatchWorkflow, Prompter,
    VcsBackend, WorkflowError,
};
use patchup_git::GitCli;
use tempfile::TempDir;

// ============================================================
// Test doubles
// ============================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Verify(CommitRange),
    Create(CommitRange, PathBuf),
    Apply(PathBuf),
    Delete(PathBuf),
}

/// Records every call; fails the next verify/operation when told to.
#[derive(Default)]
struct FakeVcs {
    calls: Mutex<Vec<Call>>,
    verify_error: Mutex<Option<GitError>>,
    error: Mutex<Option<GitError>>,
}

impl FakeVcs {
    fn failing(error: GitError) -> Self {
        let vcs = Self::default();
        *vcs.error.lock().unwrap() = Some(error);
        vcs
    }

    fn failing_verify(error: GitError) -> Self {
        let vcs = Self::default();
        *vcs.verify_error.lock().unwrap() = Some(error);
        vcs
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), GitError> {
        self.calls.lock().unwrap().push(call);
        match self.error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VcsBackend for FakeVcs {
    async fn verify_range(&self, range: &CommitRange) -> Result<(), GitError> {
        self.calls.lock().unwrap().push(Call::Verify(range.clone()));
        match self.verify_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn create_patches(
        &self,
        range: &CommitRange,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, GitError> {
        self.record(Call::Create(range.clone(), dir.to_path_buf()))?;
        Ok(vec![
            dir.join("0001-first.patch"),
            dir.join("0002-second.patch"),
        ])
    }

    async fn apply_patches(&self, dir: &Path) -> Result<Vec<PathBuf>, GitError> {
        self.record(Call::Apply(dir.to_path_buf()))?;
        Ok(vec![dir.join("0001-first.patch")])
    }

    async fn delete_patches(&self, dir: &Path) -> Result<usize, GitError> {
        self.record(Call::Delete(dir.to_path_buf()))?;
        Ok(2)
    }
}

/// Answers prompts from a queue and remembers what was asked.
#[derive(Default)]
struct ScriptedPrompter {
    answers: Mutex<VecDeque<Option<bool>>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    fn answering(answers: &[Option<bool>]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn confirm(&self, message: &str, default: bool) -> io::Result<Option<bool>> {
        assert!(!default, "destructive prompts must default to no");
        self.asked.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| io::Error::other("unexpected prompt"))
    }
}

fn plain_output() {
    colored::control::set_override(false);
}

fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

fn command_failed(stderr: &str) -> GitError {
    GitError::CommandFailed {
        command: "git am -3".to_string(),
        code: 128,
        stderr: stderr.to_string(),
    }
}

// ============================================================
// Directory inspector
// ============================================================

#[tokio::test]
async fn test_inspect_reports_every_file_once() {
    plain_output();
    let dir = TempDir::new().unwrap();
    for name in ["0002-b.patch", "0001-a.patch", "notes.txt"] {
        fs::write(dir.path().join(name), "x").unwrap();
    }

    let mut out = Vec::new();
    let names = inspect_directory(dir.path(), &mut out).await.unwrap().unwrap();
    let output = text(out);

    assert_eq!(names, vec!["0001-a.patch", "0002-b.patch", "notes.txt"]);
    assert!(output.contains("Some files already exist:"));
    for name in &names {
        assert_eq!(output.matches(name.as_str()).count(), 1, "{name}");
    }
}

#[tokio::test]
async fn test_inspect_missing_directory_is_silent() {
    let dir = TempDir::new().unwrap();
    let mut out = Vec::new();

    let names = inspect_directory(&dir.path().join("patch_files"), &mut out)
        .await
        .unwrap();

    assert!(names.is_none());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_inspect_empty_directory_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let mut out = Vec::new();

    let names = inspect_directory(dir.path(), &mut out).await.unwrap();

    assert_eq!(names, Some(Vec::new()));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_inspect_listing_failure_is_an_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("patch_files");
    fs::write(&file, "not a directory").unwrap();

    let mut out = Vec::new();
    let err = inspect_directory(&file, &mut out).await.unwrap_err();

    assert!(matches!(err, WorkflowError::Inspect { ref path, .. } if path == &file));
}

// ============================================================
// create
// ============================================================

#[tokio::test]
async fn test_create_declined_runs_nothing() {
    plain_output();
    let mut workflow = PatchWorkflow::new(
        FakeVcs::default(),
        ScriptedPrompter::answering(&[Some(false)]),
        Vec::new(),
    );

    let request = PatchRequest::new(Some(2), Some("bdb48c8".to_string()));
    let outcome = workflow.create(&request).await.unwrap();

    assert_eq!(outcome, Outcome::Declined);
    assert!(workflow
        .vcs()
        .calls()
        .iter()
        .all(|c| matches!(c, Call::Verify(_))));

    let output = text(workflow.into_output());
    assert!(output.contains("Exiting. Remove files before continuing."));
    assert!(output.contains("patchup delete"));
}

#[tokio::test]
async fn test_create_confirmed_writes_patches() {
    plain_output();
    let prompter = ScriptedPrompter::answering(&[Some(true)]);
    let mut workflow = PatchWorkflow::new(FakeVcs::default(), prompter, Vec::new());

    let request = PatchRequest::new(Some(2), Some("bdb48c8".to_string()));
    let outcome = workflow.create(&request).await.unwrap();

    assert!(outcome.is_completed());

    let range = CommitRange::new(Some(2), Some("bdb48c8".to_string())).unwrap();
    assert_eq!(
        workflow.vcs().calls(),
        vec![
            Call::Verify(range.clone()),
            Call::Create(range, PathBuf::from("./patch_files")),
        ]
    );

    let output = text(workflow.into_output());
    assert!(output.contains("Created patch files in ./patch_files"));
    assert!(output.contains("0001-first.patch"));
}

#[tokio::test]
async fn test_create_failure_is_reported_not_raised() {
    plain_output();
    let vcs = FakeVcs::failing(command_failed("fatal: bad revision 'bdb48c8'"));
    let mut workflow =
        PatchWorkflow::new(vcs, ScriptedPrompter::answering(&[Some(true)]), Vec::new());

    let request = PatchRequest::new(Some(2), Some("bdb48c8".to_string()));
    let outcome = workflow.create(&request).await.unwrap();

    assert!(outcome.is_failed());

    let output = text(workflow.into_output());
    assert!(output.contains("Something went wrong!"));
    assert!(output.contains("fatal: bad revision 'bdb48c8'"));
}

#[tokio::test]
async fn test_create_preflight_failure_skips_prompt() {
    plain_output();
    let vcs = FakeVcs::failing_verify(GitError::UnknownRevision("bdb48c8".to_string()));
    let prompter = ScriptedPrompter::default();
    let mut workflow = PatchWorkflow::new(vcs, prompter, Vec::new());

    let request = PatchRequest::new(None, Some("bdb48c8".to_string()));
    let outcome = workflow.create(&request).await.unwrap();

    assert!(outcome.is_failed());
    assert_eq!(workflow.vcs().calls().len(), 1);

    let output = text(workflow.into_output());
    assert!(output.contains("Unknown revision: bdb48c8"));
}

#[tokio::test]
async fn test_create_requires_a_range() {
    let prompter = ScriptedPrompter::default();
    let mut workflow = PatchWorkflow::new(FakeVcs::default(), prompter, Vec::new());

    let err = workflow
        .create(&PatchRequest::new(None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::EmptyRange));
    assert!(workflow.vcs().calls().is_empty());
}

#[tokio::test]
async fn test_create_lists_existing_files_before_prompting() {
    plain_output();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("0001-old.patch"), "old").unwrap();

    let prompter = ScriptedPrompter::answering(&[Some(false)]);
    let mut workflow = PatchWorkflow::new(FakeVcs::default(), prompter, Vec::new());

    let request =
        PatchRequest::new(Some(1), None).with_output_dir(dir.path().to_path_buf());
    workflow.create(&request).await.unwrap();

    let output = text(workflow.into_output());
    let listed = output.find("0001-old.patch").unwrap();
    let exiting = output.find("Exiting").unwrap();
    assert!(listed < exiting);
}

// ============================================================
// apply
// ============================================================

#[tokio::test]
async fn test_apply_runs_without_confirmation() {
    plain_output();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("0001-first.patch"), "patch").unwrap();

    let prompter = ScriptedPrompter::default();
    let mut workflow = PatchWorkflow::new(FakeVcs::default(), prompter, Vec::new());

    let outcome = workflow.apply(dir.path()).await.unwrap();

    assert!(outcome.is_completed());
    assert_eq!(
        workflow.vcs().calls(),
        vec![Call::Apply(dir.path().to_path_buf())]
    );

    let output = text(workflow.into_output());
    assert!(output.contains("Some files already exist:"));
    assert!(output.contains("Applying patch files."));
    assert!(output.contains("git am --continue"));
    assert!(output.contains("git am --skip"));
    assert!(output.contains("git am --abort"));
}

#[tokio::test]
async fn test_apply_conflict_is_reported_with_resume_hints() {
    plain_output();
    let vcs = FakeVcs::failing(command_failed("Patch failed at 0001 first"));
    let mut workflow = PatchWorkflow::new(vcs, ScriptedPrompter::default(), Vec::new());

    let outcome = workflow.apply(Path::new("./patch_files")).await.unwrap();

    assert!(outcome.is_failed());

    let output = text(workflow.into_output());
    assert!(output.contains("Something went wrong!"));
    assert!(output.contains("Patch failed at 0001 first"));
    assert!(output.contains("git am --abort"));
}

#[tokio::test]
async fn test_apply_without_patches_has_no_resume_hints() {
    plain_output();
    let vcs = FakeVcs::failing(GitError::NoPatches("./patch_files".to_string()));
    let mut workflow = PatchWorkflow::new(vcs, ScriptedPrompter::default(), Vec::new());

    let outcome = workflow.apply(Path::new("./patch_files")).await.unwrap();

    assert!(outcome.is_failed());

    let output = text(workflow.into_output());
    assert!(output.contains("No patch files found in ./patch_files"));
    assert!(!output.contains("git am --continue"));
}

// ============================================================
// delete
// ============================================================

#[tokio::test]
async fn test_delete_declined_is_silent() {
    let prompter = ScriptedPrompter::answering(&[Some(false)]);
    let mut workflow = PatchWorkflow::new(FakeVcs::default(), prompter, Vec::new());

    let outcome = workflow.delete(Path::new("./patch_files")).await.unwrap();

    assert_eq!(outcome, Outcome::Declined);
    assert!(workflow.vcs().calls().is_empty());
    assert!(workflow.into_output().is_empty());
}

#[tokio::test]
async fn test_delete_interrupted_prompt_is_a_decline() {
    let prompter = ScriptedPrompter::answering(&[None]);
    let mut workflow = PatchWorkflow::new(FakeVcs::default(), prompter, Vec::new());

    let outcome = workflow.delete(Path::new("./patch_files")).await.unwrap();

    assert!(outcome.is_declined());
    assert!(workflow.vcs().calls().is_empty());
}

#[tokio::test]
async fn test_delete_confirmed_clears_patch_directory() {
    plain_output();
    let dir = TempDir::new().unwrap();
    let patch_dir = dir.path().join("patch_files");
    fs::create_dir_all(&patch_dir).unwrap();
    fs::write(patch_dir.join("0001-first.patch"), "a").unwrap();
    fs::write(patch_dir.join("0002-second.patch"), "b").unwrap();

    let git = GitCli::new().with_working_dir(dir.path().to_path_buf());
    let prompter = ScriptedPrompter::answering(&[Some(true)]);
    let mut workflow = PatchWorkflow::new(git, prompter, Vec::new());

    let outcome = workflow.delete(Path::new("./patch_files")).await.unwrap();

    assert!(outcome.is_completed());
    assert_eq!(fs::read_dir(&patch_dir).unwrap().count(), 0);
    assert!(text(workflow.into_output()).contains("Deleted patch files."));
}

#[tokio::test]
async fn test_delete_failure_is_reported_not_raised() {
    plain_output();
    let vcs = FakeVcs::failing(GitError::IoError(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "permission denied",
    )));
    let prompter = ScriptedPrompter::answering(&[Some(true)]);
    let mut workflow = PatchWorkflow::new(vcs, prompter, Vec::new());

    let outcome = workflow.delete(Path::new("./patch_files")).await.unwrap();

    assert!(outcome.is_failed());
    assert!(text(workflow.into_output()).contains("Something went wrong!"));
}

#[tokio::test]
async fn test_prompts_are_asked_with_expected_text() {
    let prompter = ScriptedPrompter::answering(&[Some(false)]);
    let mut delete = PatchWorkflow::new(FakeVcs::default(), prompter, Vec::new());
    delete.delete(Path::new("./patch_files")).await.unwrap();
    assert_eq!(
        delete.prompter().asked(),
        vec!["Are you sure you want to delete all patch files?"]
    );

    let prompter = ScriptedPrompter::answering(&[Some(false)]);
    let mut create = PatchWorkflow::new(FakeVcs::default(), prompter, Vec::new());
    create
        .create(&PatchRequest::new(Some(1), None))
        .await
        .unwrap();
    assert_eq!(create.prompter().asked(), vec!["Continue?"]);
}
