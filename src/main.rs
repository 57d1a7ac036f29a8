//! Scaffolder's main application entry point.
//! Parses arguments, loads the structure document, resolves run inputs and
//! reports the outcome of the run.

use console::style;
use scaffolder::{
    cli::{expand_path, get_args, parse_enabled, parse_vars, print_help, Args},
    config::Document,
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    preview::render_tree,
    processor::{apply, Options, Request},
};
use std::path::{Path, PathBuf};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Prints help and, when a structure file is given, its tree preview.
fn show_help(yaml: Option<&Path>) -> Result<()> {
    print_help()?;

    let Some(yaml) = yaml else {
        println!(
            "\n{} Pass --yaml PATH together with -h to preview the structure tree.",
            style("Tip:").green()
        );
        return Ok(());
    };

    let spec_path = expand_path(yaml)?;
    match Document::load(&spec_path) {
        Ok(document) => {
            println!("\n{}", style(format!("YAML structure preview: {}", spec_path.display())).green());
            for line in render_tree(&document.root) {
                println!("{line}");
            }
            println!(
                "\n{} Entries with [id=..., optional] can be toggled via --enable <id1,id2,...>",
                style("Tip:").green()
            );
        }
        Err(e) => {
            eprintln!(
                "{}",
                style(format!(
                    "\nERROR: Failed to load YAML for help preview: {e}\n\
                     The preview only renders structure files that pass validation."
                ))
                .red()
            );
        }
    }
    Ok(())
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the structure document
/// 2. Builds variables and enabled ids from the command line
/// 3. Resolves destination and template root
/// 4. Materializes (or previews) the tree
/// 5. Reports the actions or a success line
fn run(args: Args) -> Result<()> {
    if args.help {
        return show_help(args.yaml.as_deref());
    }

    let (yaml, project) = args.required()?;

    let spec_path = expand_path(yaml)?;
    let document = Document::load(&spec_path).map_err(|e| match e {
        Error::IoError(io) => {
            Error::DocumentError(format!("failed to read {}: {io}", spec_path.display()))
        }
        other => other,
    })?;

    let vars = parse_vars(&args.vars)?;
    let enabled = parse_enabled(args.enable.as_deref());

    let dest = expand_path(&args.dest)?;
    if !args.dry_run {
        std::fs::create_dir_all(&dest).map_err(|e| {
            Error::InvalidArgumentError(format!(
                "cannot create/access destination '{}': {e}",
                dest.display()
            ))
        })?;
    }

    let template_root = match &args.template_root {
        Some(root) => expand_path(root)?,
        None => spec_path.parent().map(Path::to_path_buf).unwrap_or_else(PathBuf::new),
    };

    let options = Options { force: args.force, add: args.add, dry_run: args.dry_run };
    let request = Request {
        document: &document,
        project,
        dest: &dest,
        vars: &vars,
        enabled: &enabled,
        template_root: &template_root,
        options,
    };

    let actions = apply(&request)?;

    if args.dry_run {
        if args.json {
            let json = serde_json::to_string_pretty(&actions).map_err(std::io::Error::from)?;
            println!("{json}");
        } else {
            for action in &actions {
                println!("{action}");
            }
        }
    } else {
        let verb = if args.add { "Updated" } else { "Created/Updated" };
        println!(
            "{}",
            style(format!("{verb} project '{project}' at {}", dest.display())).green()
        );
    }

    Ok(())
}
