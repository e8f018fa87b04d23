//! CLI argument parsing and command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Match zone requirements to the spaces of a building model
#[derive(Debug, Parser)]
#[command(
    name = "zonemap",
    author,
    version,
    about = "Match zone requirements to the spaces of a building model",
    propagate_version = true,
    after_help = "Use 'zonemap <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,
    #[command(subcommand)]
    pub command: Command,
}

/// Global options available to all commands
#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Output format (json, yaml, table, auto)
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        global = true,
        conflicts_with = "json"
    )]
    pub output_format: Option<OutputFormat>,

    /// Output as JSON (shorthand for -o json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Override config file path
    #[arg(long, value_name = "PATH", env = "ZONEMAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Reduce output to only errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase logging verbosity (stackable: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable debug logging (equivalent to -vv)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace logging
    #[arg(long, global = true)]
    pub trace: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Hide table headers
    #[arg(long, global = true)]
    pub no_headers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[non_exhaustive]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Auto,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve model spaces against the zones of a requirements document
    Resolve(ResolveCommand),

    /// Assign zone names to room names one-to-one by fuzzy score
    Assign(AssignCommand),

    /// Show the room class of one or more names
    Classify {
        /// Room names to classify
        #[arg(required = true)]
        names: Vec<String>,

        /// Requirements document providing per-class temperatures
        #[arg(long, value_name = "FILE")]
        requirements: Option<PathBuf>,
    },

    /// Suggest the closest zone name for a room name
    Suggest {
        /// Room name
        name: String,

        /// Candidate zone names (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        candidates: Vec<String>,

        /// Minimum score (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        cutoff: Option<u8>,
    },

    /// Inspect and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Requirements document (JSON from the extractor, '-' for stdin)
    #[arg(long, visible_alias = "tz", value_name = "FILE")]
    pub requirements: PathBuf,

    /// Spaces exported from the building model (JSON)
    #[arg(long, value_name = "FILE")]
    pub spaces: PathBuf,

    /// Directory to write stubs.json and match_report.json into
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Minimum score for suggestions (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub suggest_cutoff: Option<u8>,
}

#[derive(Debug, Args)]
pub struct AssignCommand {
    /// Zone names: a JSON array of strings or of zone specs
    #[arg(long, value_name = "FILE")]
    pub zones: PathBuf,

    /// Room names: a JSON array of strings, or a spaces file
    #[arg(long, value_name = "FILE")]
    pub rooms: PathBuf,

    /// Requirements document for stub parameters
    #[arg(long, visible_alias = "tz", value_name = "FILE")]
    pub requirements: Option<PathBuf>,

    /// Minimum score for an assignment (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub cutoff: Option<u8>,

    /// Directory to write mapping.json, match_report.json and stubs.json into
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show,

    /// Print config file path
    Path,

    /// Get a specific configuration value
    Get {
        /// Configuration key (dot-separated path)
        key: Option<String>,
    },

    /// Reset configuration to defaults
    Reset,
}
