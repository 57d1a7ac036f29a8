//! Tree materialization.
//! Walks the structure tree in pre-order, pruning excluded branches, resolving
//! names and contents, and either creating directories and files or recording
//! what would be created.

use crate::config::{Document, FileEntry, FileSource, Node};
use crate::conflict::{ConflictPolicy, Resolution};
use crate::constants::TEXT_PROBE_LEN;
use crate::error::{Error, Result};
use crate::inclusion::{condition_passes, should_include, EnabledIds};
use crate::variables::Variables;
use indexmap::IndexMap;
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};

/// One directory or file the run created, or would create in dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    Directory {
        path: PathBuf,
    },
    File {
        path: PathBuf,
        /// Template file the content is taken from, for `from:` entries.
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<PathBuf>,
    },
}

impl Action {
    pub fn path(&self) -> &Path {
        match self {
            Action::Directory { path } | Action::File { path, .. } => path,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Directory { path } => write!(f, "[DIR] {}", path.display()),
            Action::File { path, source: Some(source) } => {
                write!(f, "[FILE] {} <- {}", path.display(), source.display())
            }
            Action::File { path, source: None } => write!(f, "[FILE] {}", path.display()),
        }
    }
}

/// Run-wide flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Overwrite files that already exist.
    pub force: bool,
    /// Keep files that already exist instead of failing.
    pub add: bool,
    /// Record actions without touching the filesystem.
    pub dry_run: bool,
}

/// Everything a single run consumes.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub document: &'a Document,
    /// Bound to the reserved `PROJECT` key.
    pub project: &'a str,
    /// Base directory the root node is created in.
    pub dest: &'a Path,
    /// Caller variables, layered over the document defaults.
    pub vars: &'a IndexMap<String, String>,
    pub enabled: &'a EnabledIds,
    /// Base for `from:` references.
    pub template_root: &'a Path,
    pub options: Options,
}

/// Builds the variable mapping for `request` and materializes its tree.
///
/// # Returns
/// * In dry-run mode, every directory and file the run would create, in traversal order
/// * Otherwise, the directories ensured and files written (add-mode skips are left out)
///
/// # Errors
/// The first error anywhere in the traversal aborts the run. Changes made
/// before it stay on disk.
pub fn apply(request: &Request<'_>) -> Result<Vec<Action>> {
    let vars = Variables::layered(
        request.document.defaults.clone(),
        request.vars.clone(),
        request.project,
    );
    let processor =
        Processor::new(&vars, request.enabled, request.template_root, request.options);
    processor.run(&request.document.root, request.dest)
}

/// Materializes structure trees against a fixed variable mapping and flag set.
pub struct Processor<'a> {
    vars: &'a Variables,
    enabled: &'a EnabledIds,
    template_root: &'a Path,
    policy: ConflictPolicy,
    dry_run: bool,
}

impl<'a> Processor<'a> {
    pub fn new(
        vars: &'a Variables,
        enabled: &'a EnabledIds,
        template_root: &'a Path,
        options: Options,
    ) -> Self {
        Self {
            vars,
            enabled,
            template_root,
            policy: ConflictPolicy::new(options.force, options.add),
            dry_run: options.dry_run,
        }
    }

    /// Materializes `root` under `dest`.
    pub fn run(&self, root: &Node, dest: &Path) -> Result<Vec<Action>> {
        debug!("Processing structure under {}", dest.display());
        let mut actions = Vec::new();
        self.walk(root, dest, &mut actions)?;
        Ok(actions)
    }

    fn walk(&self, node: &Node, base: &Path, actions: &mut Vec<Action>) -> Result<()> {
        let name = self.vars.render(&node.name);

        if !should_include(node.optional, node.id.as_deref(), self.enabled) {
            debug!("Skipping optional component '{}'", node.id.as_deref().unwrap_or_default());
            return Ok(());
        }

        let dir_path = base.join(checked_relative(&name)?);

        if !self.dry_run {
            debug!("Creating directory: {}", dir_path.display());
            fs::create_dir_all(&dir_path)?;
        }
        actions.push(Action::Directory { path: dir_path.clone() });

        for entry in &node.files {
            self.process_file(entry, &dir_path, actions)?;
        }

        for child in &node.children {
            self.walk(child, &dir_path, actions)?;
        }

        Ok(())
    }

    fn process_file(&self, entry: &FileEntry, dir: &Path, actions: &mut Vec<Action>) -> Result<()> {
        if !should_include(entry.optional, entry.id.as_deref(), self.enabled) {
            debug!("Skipping optional file '{}'", entry.name);
            return Ok(());
        }
        if !condition_passes(entry.only_if.as_deref(), self.vars)? {
            debug!(
                "Skipping file '{}': only_if '{}' is false",
                entry.name,
                entry.only_if.as_deref().unwrap_or_default()
            );
            return Ok(());
        }

        let name = self.vars.render(&entry.name);
        let dest = dir.join(checked_relative(&name)?);
        let source = entry.from_path().map(|from| self.template_root.join(from));

        if self.dry_run {
            actions.push(Action::File { path: dest, source });
            return Ok(());
        }

        let resolution = self.policy.resolve(&dest)?;
        if !resolution.writes() {
            info!("Keeping existing file: {}", dest.display());
            return Ok(());
        }
        if resolution == Resolution::Overwrite {
            debug!("Overwriting file: {}", dest.display());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        match &entry.source {
            FileSource::Content(content) => {
                debug!("Writing file: {}", dest.display());
                fs::write(&dest, self.vars.render(content))?;
            }
            FileSource::From(from) => {
                let src = self.template_root.join(from);
                if !src.is_file() {
                    return Err(Error::MissingSourceError { path: src });
                }
                self.copy_template(&src, &dest)?;
            }
            FileSource::Empty => {
                debug!("Creating empty file: {}", dest.display());
                File::create(&dest)?;
            }
        }

        actions.push(Action::File { path: dest, source });
        Ok(())
    }

    /// Copies `src` to `dst`, substituting tokens if `src` is text.
    fn copy_template(&self, src: &Path, dst: &Path) -> Result<()> {
        if is_text_file(src)? {
            match String::from_utf8(fs::read(src)?) {
                Ok(text) => {
                    debug!("Rendering file: {} -> {}", src.display(), dst.display());
                    fs::write(dst, self.vars.render(&text))?;
                    return copy_permissions(src, dst);
                }
                Err(_) => debug!("{} is not UTF-8 past the probe, copying as is", src.display()),
            }
        }
        debug!("Copying file: {} -> {}", src.display(), dst.display());
        fs::copy(src, dst)?;
        copy_permissions(src, dst)
    }
}

/// Gives `dst` the permissions of `src`, keeping it writable by its owner.
fn copy_permissions(src: &Path, dst: &Path) -> Result<()> {
    let mut permissions = fs::metadata(src)?.permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }
    #[cfg(not(unix))]
    permissions.set_readonly(false);
    fs::set_permissions(dst, permissions)?;
    Ok(())
}

/// Probes the first bytes of `path` and reports whether they decode as UTF-8.
///
/// A multi-byte character cut off by the probe boundary still counts as text.
pub fn is_text_file(path: &Path) -> Result<bool> {
    let mut buf = Vec::with_capacity(TEXT_PROBE_LEN);
    File::open(path)?.take(TEXT_PROBE_LEN as u64).read_to_end(&mut buf)?;

    Ok(match std::str::from_utf8(&buf) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && buf.len() == TEXT_PROBE_LEN,
    })
}

/// Validates a resolved name as a relative path that stays below its parent.
pub fn checked_relative(name: &str) -> Result<&Path> {
    let invalid = |reason: &str| Error::InvalidPathError {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name resolves to an empty string"));
    }
    let path = Path::new(name);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(invalid("'..' is not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("path must be relative"))
            }
        }
    }
    Ok(path)
}
