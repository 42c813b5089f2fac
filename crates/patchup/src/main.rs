mod cli;
mod config;

use anyhow::{Context, Result};
use tracing::{debug, info};

use patchup_core::{AssumeYes, DialoguerPrompter, Outcome, PatchRequest, PatchWorkflow, Prompter};
use patchup_git::GitCli;

use crate::cli::{Commands, Invocation};
use crate::config::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let (command, options) = match cli::parse(std::env::args_os()) {
        Ok(Invocation::Run { command, options }) => (command, options),
        Ok(Invocation::ShowHelp(help)) => {
            print!("{}", help);
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let settings = Settings::load(&working_dir)?;

    let log_level = options.log_level.as_deref().unwrap_or(&settings.log_level);
    patchup_logging::init_tracing(log_level, options.log_format);

    debug!(?settings, working_dir = %working_dir.display(), "Resolved settings");

    let git = GitCli::new()
        .with_binary(settings.git.clone())
        .with_working_dir(working_dir)
        .with_three_way(settings.three_way);

    // Git failures are reported by the workflow and still exit 0
    let outcome = if options.yes {
        run(command, &settings, git, AssumeYes).await?
    } else {
        run(command, &settings, git, DialoguerPrompter).await?
    };

    info!(outcome = %outcome, "Done");

    Ok(())
}

async fn run<P: Prompter>(
    command: Commands,
    settings: &Settings,
    git: GitCli,
    prompter: P,
) -> Result<Outcome> {
    let mut workflow = PatchWorkflow::new(git, prompter, std::io::stdout());

    let outcome = match command {
        Commands::Create(args) => {
            let request = PatchRequest::new(args.number, args.commit)
                .with_output_dir(settings.patch_dir(args.directory));
            workflow.create(&request).await?
        }
        Commands::Apply(args) => workflow.apply(&settings.patch_dir(args.directory)).await?,
        Commands::Delete(args) => workflow.delete(&settings.patch_dir(args.directory)).await?,
    };

    Ok(outcome)
}
