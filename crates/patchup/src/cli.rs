use clap::{ArgAction, ArgGroup, Args, CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use patchup_logging::LogFormat;

const CREATE_EXAMPLES: &str = "\
Examples:

  $ patchup create -n <number> -c <commit_sha>
  $ patchup create -n 2 -c bdb48c8
";

const APPLY_EXAMPLES: &str = "\
Apply command will run `git am -3` on your patch files

Examples:

  $ patchup apply
";

const DELETE_EXAMPLES: &str = "\
Delete will clear all files in your patch directory

Examples:

  $ patchup delete
";

#[derive(Parser, Debug, PartialEq)]
#[command(
    name = "patchup",
    about = "Export commits as patch files, then apply or discard them",
    version,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    #[command(flatten)]
    pub options: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags accepted by every verb
#[derive(Args, Debug, PartialEq)]
pub struct GlobalArgs {
    /// Diagnostic log level (RUST_LOG takes precedence)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Diagnostic log format: pretty, json or compact
    #[arg(long, global = true, value_name = "FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Export commits as numbered patch files
    #[command(after_help = CREATE_EXAMPLES)]
    Create(CreateArgs),

    /// Apply the patch files with a three-way merge
    #[command(after_help = APPLY_EXAMPLES)]
    Apply(DirectoryArgs),

    /// Delete all files in the patch directory
    #[command(after_help = DELETE_EXAMPLES)]
    Delete(DirectoryArgs),
}

#[derive(Args, Debug, PartialEq)]
#[command(group(
    ArgGroup::new("range")
        .required(true)
        .multiple(true)
        .args(["number", "commit"])
))]
pub struct CreateArgs {
    /// Number of commits
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub number: Option<u32>,

    /// Git commit sha
    #[arg(short = 'c', long, value_name = "COMMIT_SHA")]
    pub commit: Option<String>,

    /// Path for output files [default: ./patch_files]
    #[arg(short = 'd', long, value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,
}

#[derive(Args, Debug, PartialEq)]
pub struct DirectoryArgs {
    /// Patch directory [default: ./patch_files]
    #[arg(short = 'd', long, value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,
}

/// What the process should do after parsing its arguments
#[derive(Debug, PartialEq)]
pub enum Invocation {
    /// No verb was given; holds the rendered top-level help
    ShowHelp(String),
    Run {
        command: Commands,
        options: GlobalArgs,
    },
}

/// Parse an argument vector (program name first).
///
/// `--help`, `--version` and usage errors come back as `clap::Error`; call
/// `exit()` on it to print the message with the right exit code.
pub fn parse<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;

    Ok(match cli.command {
        Some(command) => Invocation::Run {
            command,
            options: cli.options,
        },
        None => Invocation::ShowHelp(Cli::command().render_help().to_string()),
    })
}
