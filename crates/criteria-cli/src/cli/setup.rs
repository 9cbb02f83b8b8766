use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

fn version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        describe_version(
            env!("CARGO_PKG_VERSION"),
            env!("CRITERIA_RELEASE") == "true",
            env!("CRITERIA_COMMIT"),
            env!("CRITERIA_COMMIT_DATE"),
        )
    })
}

/// Untagged builds carry the commit they were built from, when git knew it.
fn describe_version(version: &str, release: bool, commit: &str, date: &str) -> String {
    if release || commit.is_empty() {
        return version.to_string();
    }
    let build = format!("{} {}", commit, date);
    format!("{} ({})", version, build.trim_end())
}

#[derive(Parser, Debug)]
#[command(
    name = "criteria",
    bin_name = "criteria",
    version = version(),
    disable_help_subcommand = true
)]
#[command(about = "Format, validate and evaluate participation criteria", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./criteria.toml, then the user config directory)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

/// Formatting flags shared by commands that print clause text.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FormatArgs {
    /// Catalog JSON file (default: built-in participation catalog)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Capitalize and punctuate the output
    #[arg(long)]
    pub sentence: bool,

    /// Multiselect values to list before "or N more"
    #[arg(long, value_name = "N")]
    pub max_items: Option<usize>,

    /// Word placed between clauses
    #[arg(long, value_name = "WORD")]
    pub joiner: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe a clause list in plain language
    Format {
        /// Clause list (JSON or YAML, `-` for stdin)
        file: PathBuf,

        #[command(flatten)]
        format: FormatArgs,

        /// Print a JSON object instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show completion state per clause and validate the list
    Check {
        /// Clause list (JSON or YAML, `-` for stdin)
        file: PathBuf,

        /// Catalog JSON file (default: built-in participation catalog)
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },

    /// Format a validation error payload
    Errors {
        /// Error payload (JSON or YAML, `-` for stdin)
        file: PathBuf,
    },

    /// Check whether a participant profile satisfies a clause list
    #[command(name = "match")]
    Match {
        /// Clause list (JSON or YAML, `-` for stdin)
        file: PathBuf,

        /// Profile: an object of attribute → value
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,

        /// Catalog JSON file (default: built-in participation catalog)
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },

    /// List the attributes and operators of a catalog
    Catalog {
        /// Catalog JSON file (default: built-in participation catalog)
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },

    /// Print the resolved configuration
    Config,
}
