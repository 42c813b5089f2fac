use async_trait::async_trait;
use colored::Colorize;
use dialoguer::Confirm;
use std::io::{self, Write};
use tracing::debug;

use crate::WorkflowError;

/// Yes/no confirmation capability
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask `message`. `None` means the prompt was interrupted.
    async fn confirm(&self, message: &str, default: bool) -> io::Result<Option<bool>>;
}

/// Terminal prompt backed by dialoguer
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn confirm(&self, message: &str, default: bool) -> io::Result<Option<bool>> {
        let prompt = message.yellow().to_string();

        tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(default)
                .interact_opt()
                .map_err(|e| io::Error::other(e.to_string()))
        })
        .await
        .map_err(io::Error::other)?
    }
}

/// Answers yes to every prompt (`--yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

#[async_trait]
impl Prompter for AssumeYes {
    async fn confirm(&self, message: &str, _default: bool) -> io::Result<Option<bool>> {
        debug!(prompt = %message, "Assuming yes");
        Ok(Some(true))
    }
}

/// A confirmation prompt plus the guidance printed when the user declines
#[derive(Debug, Clone)]
pub struct ConfirmGate {
    pub prompt: String,
    pub default: bool,
    pub on_decline: Vec<String>,
}

impl ConfirmGate {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            default: false,
            on_decline: Vec::new(),
        }
    }

    pub fn explain(mut self, line: impl Into<String>) -> Self {
        self.on_decline.push(line.into());
        self
    }
}

/// Ask the gate's question. Returns `true` to go ahead; otherwise prints the
/// decline guidance and returns `false`. An interrupted prompt counts as a
/// decline.
pub async fn confirm_or_explain<P, W>(
    prompter: &P,
    out: &mut W,
    gate: &ConfirmGate,
) -> Result<bool, WorkflowError>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let answer = prompter
        .confirm(&gate.prompt, gate.default)
        .await
        .map_err(WorkflowError::Prompt)?;

    if answer == Some(true) {
        return Ok(true);
    }

    debug!(prompt = %gate.prompt, interrupted = answer.is_none(), "Declined");

    for line in &gate.on_decline {
        writeln!(out, "{}", line)?;
    }

    Ok(false)
}
