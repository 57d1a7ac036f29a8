//! Command-line interface implementation for scaffolder.
//! Provides argument parsing with clap and the normalization of raw command
//! line values (variables, enabled ids, paths) into what a run consumes.

use crate::constants::DEFAULT_DEST;
use crate::error::{Error, Result};
use crate::inclusion::EnabledIds;
use clap::{ArgAction, CommandFactory, Parser};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))").unwrap()
});

/// Command-line arguments structure for scaffolder.
///
/// Help is handled by hand so that `-h --yaml PATH` can also print the
/// structure tree; `--yaml` and `--project` are therefore checked after parsing.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scaffold or update a project structure from a declarative YAML file",
    long_about = None,
    disable_help_flag = true
)]
pub struct Args {
    /// [required] Path to the structure YAML (combine with -h to preview its tree)
    #[arg(long, value_name = "PATH")]
    pub yaml: Option<PathBuf>,

    /// [required] Project name, substituted for {{PROJECT}}
    #[arg(short, long)]
    pub project: Option<String>,

    /// Destination directory
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_DEST)]
    pub dest: PathBuf,

    /// Extra substitutions (e.g. sim=gtkwave AUTHOR=$USER)
    #[arg(long, value_name = "KEY=VAL", num_args = 0..)]
    pub vars: Vec<String>,

    /// Comma-separated component ids to include (e.g. global_src,env.simulation)
    #[arg(long, value_name = "IDS")]
    pub enable: Option<String>,

    /// Directory where 'from:' files are looked up (default: the YAML file's directory)
    #[arg(long, value_name = "PATH")]
    pub template_root: Option<PathBuf>,

    /// Add missing items to an existing tree, keeping files that already exist
    #[arg(long)]
    pub add: bool,

    /// Overwrite files that already exist
    #[arg(long)]
    pub force: bool,

    /// Preview actions without creating or updating anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print dry-run actions as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show help (with --yaml, also show the structure tree)
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub help: bool,
}

impl Args {
    /// Returns the structure path and project name, which every run needs.
    ///
    /// # Errors
    /// * `Error::InvalidArgumentError` if either is missing
    pub fn required(&self) -> Result<(&Path, &str)> {
        match (&self.yaml, &self.project) {
            (Some(yaml), Some(project)) => Ok((yaml.as_path(), project.as_str())),
            _ => Err(Error::InvalidArgumentError(
                "the following arguments are required: --yaml, --project".to_string(),
            )),
        }
    }
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}

/// Prints the generated help text to stdout.
pub fn print_help() -> Result<()> {
    Args::command().print_help()?;
    Ok(())
}

/// Parses `KEY=VAL` pairs. Keys are trimmed; values get `$VAR` expansion.
///
/// # Errors
/// * `Error::InvalidArgumentError` for an item without `=`
pub fn parse_vars<S: AsRef<str>>(items: &[S]) -> Result<IndexMap<String, String>> {
    let mut vars = IndexMap::new();
    for item in items {
        let item = item.as_ref();
        let (key, value) = item
            .split_once('=')
            .ok_or_else(|| Error::InvalidArgumentError(format!("invalid KEY=VAL: '{item}'")))?;
        vars.insert(key.trim().to_string(), expand_env(value));
    }
    Ok(vars)
}

/// Splits a comma-separated id list, ignoring blank items.
pub fn parse_enabled(raw: Option<&str>) -> EnabledIds {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Expands `$NAME` and `${NAME}` from the environment. Unset variables are left as written.
pub fn expand_env(value: &str) -> String {
    ENV_VAR_RE
        .replace_all(value, |caps: &Captures| {
            let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Expands `~` and environment variables in `path` and makes it absolute.
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = expand_env(&path.to_string_lossy());

    let expanded = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) if rest.is_empty() => home,
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(&raw),
        },
        _ => PathBuf::from(&raw),
    };

    Ok(std::path::absolute(expanded)?)
}
