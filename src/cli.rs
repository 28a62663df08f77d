use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "findex",
    about = "A content-addressed file index with pluggable search strategies"
)]
pub struct Cli {
    /// Override the XDG data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Use the inverted-index search strategy instead of the
    /// substring scan (must be consistent per data directory)
    #[arg(long, global = true)]
    pub inverted: bool,

    /// Store blobs zlib-compressed (must be consistent per data
    /// directory)
    #[arg(long, global = true)]
    pub compress: bool,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Index a file's content and keywords
    Add(AddArgs),
    /// Search indexed entries by keyword text
    Search(SearchArgs),
    /// Retrieve a stored blob by entry id
    Get(GetArgs),
    /// Show index status and statistics
    Status(StatusArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Add --

#[derive(Debug, Parser)]
pub struct AddArgs {
    /// Path of the file to index
    pub file: PathBuf,

    /// Free-text keywords describing the file
    #[arg(short, long, default_value = "")]
    pub keywords: String,

    /// Opaque external handle stored alongside the entry
    #[arg(long, default_value = "")]
    pub extra: String,

    /// Index metadata only; do not store the file's bytes
    #[arg(long)]
    pub reference_only: bool,

    /// Output the entry descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// The search query
    pub query: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Get --

#[derive(Debug, Parser)]
pub struct GetArgs {
    /// The 64-character hex entry id
    pub entry_id: String,

    /// Write the blob to this path instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
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
            "findex",
            &mut std::io::stdout(),
        );
    }
}
