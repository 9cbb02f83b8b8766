//! # CLI Layer
//!
//! The only place that:
//! - Knows about stdout, stderr and exit codes
//! - Installs the tracing subscriber
//! - Decides which config files exist
//!
//! Handlers return `Ok(true)` when the command's verdict is positive and
//! `Ok(false)` when it is not (an invalid list, a profile that does not
//! match). [`run`] turns `false` into exit status 1.

use super::input::read_document;
use super::render;
use super::setup::{Cli, Commands, FormatArgs};
use anyhow::{bail, Context, Result};
use clap::Parser;
use criteria::config::CriteriaConfig;
use criteria::evaluate::{failing_clauses, matches, Profile};
use criteria::format::{format_clauses, format_clauses_error, ClauseErrors, FormatOptions};
use criteria::schema::validate_clauses;
use criteria::surface::rows;
use criteria::{Catalog, ClauseStore, LogicClause};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    let verdict = match cli.command {
        Commands::Format { file, format, json } => handle_format(&config, &file, &format, json)?,
        Commands::Check { file, catalog } => handle_check(&config, &file, catalog)?,
        Commands::Errors { file } => handle_errors(&file)?,
        Commands::Match {
            file,
            profile,
            catalog,
        } => handle_match(&config, &file, &profile, catalog)?,
        Commands::Catalog { catalog } => {
            print!("{}", render::render_catalog(&*resolve_catalog(&config, catalog)?));
            true
        }
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
            true
        }
    };

    if !verdict {
        std::process::exit(1);
    }
    Ok(())
}

/// `warn` by default, raised by `-v`; `RUST_LOG` wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(CriteriaConfig::FILE_NAME));
    }
    if let Some(dirs) = ProjectDirs::from("", "", "criteria") {
        paths.push(dirs.config_dir().join(CriteriaConfig::FILE_NAME));
    }
    paths
}

fn load_config(explicit: Option<&Path>) -> Result<CriteriaConfig> {
    let config = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            CriteriaConfig::load(Some(path))
        }
        None => CriteriaConfig::load_layered(&config_search_paths()),
    };
    config.context("Failed to load configuration")
}

fn resolve_catalog(config: &CriteriaConfig, flag: Option<PathBuf>) -> Result<Arc<Catalog>> {
    let config = CriteriaConfig {
        catalog: flag.or_else(|| config.catalog.clone()),
        ..config.clone()
    };
    let catalog = config.catalog().with_context(|| match &config.catalog {
        Some(path) => format!("Failed to load catalog {}", path.display()),
        None => "Failed to load the built-in catalog".to_string(),
    })?;
    Ok(catalog)
}

fn format_options(config: &CriteriaConfig, args: &FormatArgs) -> FormatOptions {
    let mut options = FormatOptions::from(config);
    if args.sentence {
        options.format_as_sentence = true;
    }
    if let Some(max) = args.max_items {
        options.max_list_items = Some(max);
    }
    if let Some(joiner) = &args.joiner {
        options.joiner = joiner.clone();
    }
    options
}

fn handle_format(config: &CriteriaConfig, file: &Path, args: &FormatArgs, json: bool) -> Result<bool> {
    let catalog = resolve_catalog(config, args.catalog.clone())?;
    let clauses: Vec<LogicClause> = read_document(file)?;
    let text = format_clauses(Some(clauses.as_slice()), &catalog, &format_options(config, args));

    if json {
        let out = serde_json::json!({ "text": text, "clauses": clauses });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(true);
    }
    match text {
        Some(text) => println!("{}", text),
        None => println!("{}", render::muted("No criteria")),
    }
    Ok(true)
}

fn handle_check(config: &CriteriaConfig, file: &Path, catalog: Option<PathBuf>) -> Result<bool> {
    let catalog = resolve_catalog(config, catalog)?;
    let clauses: Vec<LogicClause> = read_document(file)?;
    if clauses.is_empty() {
        bail!("{} holds no clauses", file.display());
    }

    let store = ClauseStore::controlled(catalog, clauses);
    print!("{}", render::render_rows(&rows(&store)));

    let errors = validate_clauses(store.read(), store.catalog());
    match format_clauses_error(errors.as_ref()) {
        Some(report) => {
            println!("{}", render::failure("Invalid"));
            println!("{}", report);
            Ok(false)
        }
        None => {
            println!("{}", render::success("Valid"));
            Ok(true)
        }
    }
}

fn handle_errors(file: &Path) -> Result<bool> {
    let errors: ClauseErrors = read_document(file)?;
    match format_clauses_error(Some(&errors)) {
        Some(report) => println!("{}", report),
        None => println!("{}", render::muted("No errors")),
    }
    Ok(true)
}

/// Profile values may be written as numbers or booleans; they compare as text.
fn read_profile(path: &Path) -> Result<Profile> {
    let raw: BTreeMap<String, serde_json::Value> = read_document(path)?;
    raw.into_iter()
        .map(|(attribute, value)| {
            let value = match value {
                serde_json::Value::String(text) => text,
                serde_json::Value::Number(number) => number.to_string(),
                serde_json::Value::Bool(flag) => flag.to_string(),
                other => bail!("Profile value for '{}' must be a scalar, got {}", attribute, other),
            };
            Ok((attribute, value))
        })
        .collect()
}

fn handle_match(
    config: &CriteriaConfig,
    file: &Path,
    profile: &Path,
    catalog: Option<PathBuf>,
) -> Result<bool> {
    let catalog = resolve_catalog(config, catalog)?;
    let clauses: Vec<LogicClause> = read_document(file)?;
    let profile = read_profile(profile)?;

    if matches(&clauses, &catalog, &profile) {
        println!("{}", render::success("Match"));
        return Ok(true);
    }

    println!("{}", render::failure("No match"));
    let options = FormatOptions::from(config);
    for index in failing_clauses(&clauses, &catalog, &profile) {
        let clause = std::slice::from_ref(&clauses[index]);
        if let Some(text) = format_clauses(Some(clause), &catalog, &options) {
            println!("  Clause {}: {}", index + 1, text);
        }
    }
    Ok(false)
}
