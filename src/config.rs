//! Specification document handling.
//! Loads the YAML structure file and validates it into an immutable tree of
//! [`Node`]s and [`FileEntry`]s that the processor walks.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// A directory node of the structure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Raw directory name, may contain `{{TOKEN}}`s.
    pub name: String,
    /// Component id used with `--enable`.
    pub id: Option<String>,
    pub optional: bool,
    pub files: Vec<FileEntry>,
    pub children: Vec<Node>,
}

/// Where a file's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Inline text, tokens substituted before writing.
    Content(String),
    /// Path relative to the template root.
    From(String),
    /// Create an empty file.
    Empty,
}

/// A file entry inside a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Raw file name, may contain `{{TOKEN}}`s.
    pub name: String,
    pub source: FileSource,
    /// Raw `key=value` predicate, parsed when evaluated.
    pub only_if: Option<String>,
    pub id: Option<String>,
    pub optional: bool,
}

impl FileEntry {
    /// The `from:` reference, if this entry copies a template file.
    pub fn from_path(&self) -> Option<&str> {
        match &self.source {
            FileSource::From(path) => Some(path.as_str()),
            _ => None,
        }
    }
}

/// A parsed specification document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
    /// Variable defaults, in document order.
    pub defaults: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    root: Option<RawNode>,
    defaults: Option<IndexMap<String, serde_yaml::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    dir: Option<String>,
    id: Option<String>,
    #[serde(default)]
    optional: bool,
    files: Option<Vec<RawFile>>,
    children: Option<Vec<RawNode>>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    name: Option<String>,
    content: Option<String>,
    from: Option<String>,
    only_if: Option<String>,
    id: Option<String>,
    #[serde(default)]
    optional: bool,
}

impl Document {
    /// Parses a document from YAML text.
    ///
    /// # Errors
    /// * `Error::DocumentError` if the text is not valid YAML, has an unexpected
    ///   shape, or lacks a `root` mapping
    /// * `Error::StructuralError` if a node lacks `dir`, a file lacks `name`,
    ///   a file has both `content` and `from`, or a default is not a scalar
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: Option<RawDocument> = serde_yaml::from_str(content)
            .map_err(|e| Error::DocumentError(format!("invalid structure file: {e}")))?;
        let raw = raw.ok_or_else(|| Error::DocumentError("document is empty".to_string()))?;

        let root = raw
            .root
            .ok_or_else(|| Error::DocumentError("YAML must contain 'root' mapping".to_string()))?;

        let mut defaults = IndexMap::new();
        for (key, value) in raw.defaults.unwrap_or_default() {
            let value = scalar_to_string(&key, value)?;
            defaults.insert(key, value);
        }

        Ok(Self { root: build_node(root, "root")?, defaults })
    }

    /// Reads and parses a document from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading structure from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

/// Booleans become `True`/`False`, the spelling `only_if` predicates are written against.
fn scalar_to_string(key: &str, value: serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(true) => Ok("True".to_string()),
        serde_yaml::Value::Bool(false) => Ok("False".to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        _ => Err(Error::StructuralError(format!("default '{key}' must be a scalar value"))),
    }
}

/// `location` describes where the node sits, for error messages only.
fn build_node(raw: RawNode, location: &str) -> Result<Node> {
    let name = raw
        .dir
        .ok_or_else(|| Error::StructuralError(format!("node at {location} must define 'dir'")))?;

    let files = raw
        .files
        .unwrap_or_default()
        .into_iter()
        .map(|f| build_file(f, &name))
        .collect::<Result<Vec<_>>>()?;

    let children = raw
        .children
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, child)| build_node(child, &format!("{location} > {name} > children[{i}]")))
        .collect::<Result<Vec<_>>>()?;

    Ok(Node { name, id: raw.id, optional: raw.optional, files, children })
}

fn build_file(raw: RawFile, dir: &str) -> Result<FileEntry> {
    let name = raw.name.ok_or_else(|| {
        Error::StructuralError(format!("a file entry under '{dir}' is missing 'name'"))
    })?;

    let source = match (raw.content, raw.from) {
        (Some(_), Some(_)) => {
            return Err(Error::StructuralError(format!(
                "file '{name}' under '{dir}' sets both 'content' and 'from'"
            )))
        }
        (Some(content), None) => FileSource::Content(content),
        (None, Some(from)) => FileSource::From(from),
        (None, None) => FileSource::Empty,
    };

    Ok(FileEntry { name, source, only_if: raw.only_if, id: raw.id, optional: raw.optional })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_defaults_are_stringified() {
        let doc = Document::from_yaml(
            "root: {dir: x}\ndefaults: {sim: gtkwave, width: 32, strict: true, lax: false, empty: ~}",
        )
        .unwrap();
        let values: Vec<(&str, &str)> =
            doc.defaults.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            values,
            vec![
                ("sim", "gtkwave"),
                ("width", "32"),
                ("strict", "True"),
                ("lax", "False"),
                ("empty", "")
            ]
        );
    }

    #[test]
    fn test_nested_default_is_rejected() {
        let result = Document::from_yaml("root: {dir: x}\ndefaults: {list: [1, 2]}");
        assert!(matches!(result, Err(Error::StructuralError(_))));
    }

    #[test]
    fn test_child_location_in_error() {
        let result = Document::from_yaml("root:\n  dir: top\n  children:\n    - id: a\n");
        match result {
            Err(Error::StructuralError(msg)) => assert!(msg.contains("children[0]")),
            other => panic!("Expected StructuralError, got {other:?}"),
        }
    }
}
