//! CLI command definitions and subcommands

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// docmcp - documentation tool server
#[derive(Debug, Parser)]
#[command(
    name = "dm",
    about = "Serve markdown documentation to tool-using clients, or generate a standalone server",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Where to find documents; overrides the config's `docs` section
#[derive(Debug, Clone, Args)]
pub struct DocsArgs {
    /// Glob pattern or directory, relative to the root (repeatable)
    #[arg(short, long = "docs", value_name = "PATTERN")]
    pub docs: Vec<String>,

    /// Base directory; document ids are paths relative to it
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Proceed even when no document matched
    #[arg(long)]
    pub allow_empty: bool,
}

/// Server labels; override the config's `server` section
#[derive(Debug, Clone, Args)]
pub struct LabelArgs {
    /// Server name reported to clients
    #[arg(short, long)]
    pub name: Option<String>,

    /// Subject used in tool descriptions, e.g. "Acme SDK"
    #[arg(short, long)]
    pub subject: Option<String>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve documents over stdio until the client disconnects
    Serve {
        #[command(flatten)]
        docs: DocsArgs,

        #[command(flatten)]
        labels: LabelArgs,
    },

    /// Write a standalone server crate with the documents embedded
    Generate {
        #[command(flatten)]
        docs: DocsArgs,

        #[command(flatten)]
        labels: LabelArgs,

        /// Output directory for the generated crate
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,

        /// Package name (defaults to the server name)
        #[arg(long)]
        crate_name: Option<String>,

        /// Depend on a local docmcp checkout instead of the registry
        #[arg(long, value_name = "PATH")]
        crate_path: Option<PathBuf>,

        /// Write into a non-empty output directory
        #[arg(short, long)]
        force: bool,
    },

    /// Print the document listing
    List {
        #[command(flatten)]
        docs: DocsArgs,
    },

    /// Print one document's content
    Get {
        #[command(flatten)]
        docs: DocsArgs,

        /// Document id, e.g. guides/install.md
        name: String,
    },

    /// Fuzzy-search the documents and print the matches
    Search {
        #[command(flatten)]
        docs: DocsArgs,

        /// Search query
        query: String,
    },
}
