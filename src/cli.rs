use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "tupa",
    about = "Answer questions about municipal TUPA procedures"
)]
pub struct Cli {
    /// Directory holding the procedure documents (default: XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a question and print the reply
    Ask(AskArgs),
    /// List every procedure title in the catalog
    Titles(TitlesArgs),
    /// Parse a single document and print the extracted record
    Parse(ParseArgs),
    /// Show the data directory and catalog statistics
    Status(StatusArgs),
    /// Start MCP server for AI agent integration
    Mcp,
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Ask --

#[derive(Debug, Parser)]
pub struct AskArgs {
    /// The question, in Spanish
    pub message: String,

    /// Output the reply as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Titles --

#[derive(Debug, Parser)]
pub struct TitlesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Parse --

#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Path to a procedure document
    pub file: PathBuf,

    /// Output the record as JSON instead of the rendered detail block
    #[arg(long)]
    pub json: bool,
}

// -- Status --

#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "tupa",
            &mut std::io::stdout(),
        );
    }
}
