use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Sweeper Actions - cleanup actions for a Linux disk usage utility
#[derive(Parser, Debug)]
#[command(name = "sweeper-actions")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH", env = "SWEEPER_ACTIONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured cleanup actions
    List(ListArgs),

    /// Run a cleanup action on a file or directory
    Run(RunArgs),

    /// Change the settings of a cleanup action
    Configure(ConfigureArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include disabled cleanups
    #[arg(short, long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Cleanup id (see `list`)
    pub id: String,

    /// File or directory to apply the cleanup to
    pub path: PathBuf,

    /// Show the commands that would run without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip confirmation prompts
    #[arg(short, long)]
    pub force: bool,

    /// Treat PATH as the plain files of the directory only
    #[arg(long)]
    pub dot_entry: bool,
}

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Cleanup id (see `list --all`)
    pub id: String,

    /// New menu title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// New command line (%p path, %n name, %t trash directory)
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,

    /// Enable the cleanup
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Disable the cleanup
    #[arg(long)]
    pub disable: bool,

    /// Run the command in every sub-directory too
    #[arg(long, value_name = "BOOL")]
    pub recurse: Option<bool>,

    /// Ask before running the command
    #[arg(long, value_name = "BOOL")]
    pub confirm: Option<bool>,
}
