//! CLI argument definitions for hub-resolver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use hub_index::DEFAULT_RECOMMENDATION_LIMIT;
use hub_ingest::DEFAULT_SOURCE_SUFFIX;

#[derive(Parser)]
#[command(
    name = "hub-resolver",
    version,
    about = "Resolve courses to the hub requirements they satisfy",
    long_about = "Resolve course codes and names to BU Hub requirements.\n\n\
                  Course tables from several schools are merged into one index;\n\
                  every command below is a query over that index."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Catalog manifest (TOML). Defaults to the built-in BU Hub catalog.
    #[arg(long, value_name = "FILE", env = "HUB_RESOLVER_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Course table to read (repeatable, read in the order given).
    #[arg(long = "source", short = 's', value_name = "CSV", global = true)]
    pub sources: Vec<PathBuf>,

    /// Directory scanned for `<tag><suffix>.csv` course tables.
    #[arg(long = "source-dir", value_name = "DIR", global = true)]
    pub source_dir: Option<PathBuf>,

    /// File-stem suffix used by --source-dir.
    #[arg(long, default_value = DEFAULT_SOURCE_SUFFIX, global = true)]
    pub suffix: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the hub requirements one course satisfies.
    Lookup {
        /// Course code or course name.
        course: String,
    },

    /// Look up several courses and the union of their requirements.
    Bulk {
        #[arg(required = true, value_name = "COURSE")]
        courses: Vec<String>,
    },

    /// List the courses satisfying a hub requirement.
    Hub {
        /// Requirement name, e.g. "Quantitative Reasoning I".
        requirement: String,
    },

    /// List every indexed course.
    List,

    /// Show the title of a course.
    Name { course: String },

    /// List the courses of a department (e.g. CS, MA).
    Department { department: String },

    /// List courses satisfying at least --min of the given requirements.
    Match {
        #[arg(long, default_value_t = 2)]
        min: usize,
        #[arg(required = true, value_name = "REQUIREMENT")]
        requirements: Vec<String>,
    },

    /// Show hub progress for a list of taken courses.
    Progress {
        #[arg(value_name = "COURSE")]
        courses: Vec<String>,
    },

    /// Suggest courses covering unfulfilled hub requirements.
    Recommend {
        /// Courses already taken.
        #[arg(value_name = "COURSE")]
        courses: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: usize,
        /// Only suggest courses from this department.
        #[arg(long)]
        department: Option<String>,
    },

    /// Build the index and print the build report as JSON.
    Doctor,

    /// List the catalog requirements and how many courses satisfy each.
    Requirements,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
