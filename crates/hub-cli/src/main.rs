//! hub-resolver CLI.

use std::io::{self, IsTerminal};

use anyhow::{Result, anyhow};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use hub_cli::logging::{LogConfig, LogFormat, init_logging};
use hub_cli::sources::{SourceSelection, index_builder, load_catalog};
use hub_index::{LazyIndex, RecommendOptions};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    Found, run_bulk, run_department, run_doctor, run_hub, run_list, run_lookup, run_match,
    run_name, run_progress, run_recommend, run_requirements,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<Found> {
    let catalog = load_catalog(cli.sources.catalog.as_deref())?;
    let selection = SourceSelection {
        sources: cli.sources.sources.clone(),
        source_dir: cli.sources.source_dir.clone(),
        suffix: cli.sources.suffix.clone(),
    };
    let index = LazyIndex::new(index_builder(&catalog, &selection)?);

    if let Command::Doctor = cli.command {
        return run_doctor(&index, &catalog);
    }

    // Every query needs a ready index; a failed build is reported as such.
    let ready = index.get().map_err(|error| anyhow!("{error}"))?;
    let json = cli.json;
    match cli.command {
        Command::Lookup { course } => run_lookup(ready, &course, json),
        Command::Bulk { courses } => run_bulk(ready, &courses, json),
        Command::Hub { requirement } => run_hub(ready, &requirement, json),
        Command::List => run_list(ready, json),
        Command::Name { course } => run_name(ready, &course, json),
        Command::Department { department } => run_department(ready, &department, json),
        Command::Match { min, requirements } => run_match(ready, &requirements, min, json),
        Command::Progress { courses } => run_progress(ready, &catalog, &courses, json),
        Command::Recommend {
            courses,
            limit,
            department,
        } => run_recommend(
            ready,
            &catalog,
            &courses,
            &RecommendOptions { limit, department },
            json,
        ),
        Command::Requirements => run_requirements(ready, &catalog, json),
        Command::Doctor => run_doctor(&index, &catalog),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
