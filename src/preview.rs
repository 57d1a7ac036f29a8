//! Structural tree preview of a specification.
//!
//! This is a view of the document as written, not of a run: tokens are shown
//! unresolved, `only_if` predicates are not evaluated and every optional
//! component is listed whether or not it is enabled. Use a dry run to see what
//! a run would actually create.

use crate::config::{FileEntry, Node};

const BRANCH: &str = "├── ";
const LAST: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Renders `root` as box-drawing tree lines, root first and flush left.
pub fn render_tree(root: &Node) -> Vec<String> {
    let mut lines = vec![node_header(root)];
    walk_children(root, "", &mut lines);
    lines
}

/// Header for a directory node: `dir [id=..., optional]`.
pub fn node_header(node: &Node) -> String {
    let mut bits = Vec::new();
    if let Some(id) = &node.id {
        bits.push(format!("id={id}"));
    }
    if node.optional {
        bits.push("optional".to_string());
    }
    if bits.is_empty() {
        node.name.clone()
    } else {
        format!("{} [{}]", node.name, bits.join(", "))
    }
}

/// One-line description of a file entry: `name <- from  (only_if: cond)`.
pub fn file_label(entry: &FileEntry) -> String {
    let mut label = entry.name.clone();
    if let Some(from) = entry.from_path() {
        label.push_str(&format!(" <- {from}"));
    }
    if let Some(cond) = &entry.only_if {
        label.push_str(&format!("  (only_if: {cond})"));
    }
    match (&entry.id, entry.optional) {
        (Some(id), true) => label.push_str(&format!(" [id={id}, optional]")),
        (Some(id), false) => label.push_str(&format!(" [id={id}]")),
        (None, true) => label.push_str(" [optional]"),
        (None, false) => {}
    }
    label
}

fn walk_children(node: &Node, prefix: &str, lines: &mut Vec<String>) {
    // files keep a '├──' while sibling directories follow them
    for (i, entry) in node.files.iter().enumerate() {
        let last = i + 1 == node.files.len() && node.children.is_empty();
        let connector = if last { LAST } else { BRANCH };
        lines.push(format!("{prefix}{connector}{}", file_label(entry)));
    }

    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == node.children.len();
        let (connector, extension) = if last { (LAST, SPACE) } else { (BRANCH, PIPE) };
        lines.push(format!("{prefix}{connector}{}", node_header(child)));
        walk_children(child, &format!("{prefix}{extension}"), lines);
    }
}
