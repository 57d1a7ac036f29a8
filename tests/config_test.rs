use scaffolder::config::{Document, FileSource};
use scaffolder::error::Error;
use std::fs;
use tempfile::TempDir;

const STRUCTURE: &str = r#"
defaults:
  sim: cdssim
  AUTHOR: nobody
root:
  dir: "{{PROJECT}}"
  files:
    - name: README.md
      content: "Project {{PROJECT}}"
    - name: .gitignore
  children:
    - dir: sim
      id: env.simulation
      optional: true
      files:
        - name: wave.do
          from: templates/wave.do
          only_if: "sim=gtkwave"
"#;

#[test]
fn test_load_structure() {
    let doc = Document::from_yaml(STRUCTURE).unwrap();

    let keys: Vec<&str> = doc.defaults.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["sim", "AUTHOR"]);

    let root = &doc.root;
    assert_eq!(root.name, "{{PROJECT}}");
    assert!(!root.optional);
    assert_eq!(root.files.len(), 2);
    assert_eq!(root.files[0].source, FileSource::Content("Project {{PROJECT}}".into()));
    assert_eq!(root.files[1].source, FileSource::Empty);

    let sim = &root.children[0];
    assert_eq!(sim.id.as_deref(), Some("env.simulation"));
    assert!(sim.optional);
    assert_eq!(sim.files[0].from_path(), Some("templates/wave.do"));
    assert_eq!(sim.files[0].only_if.as_deref(), Some("sim=gtkwave"));
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("structure.yaml");
    fs::write(&path, STRUCTURE).unwrap();

    let doc = Document::load(&path).unwrap();
    assert_eq!(doc, Document::from_yaml(STRUCTURE).unwrap());
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Document::load(temp_dir.path().join("nope.yaml"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_node_without_dir_is_structural_error() {
    let result = Document::from_yaml("root:\n  files:\n    - name: a\n");
    assert!(matches!(result, Err(Error::StructuralError(_))));
}

#[test]
fn test_file_without_name_is_structural_error() {
    let result = Document::from_yaml("root:\n  dir: x\n  files:\n    - content: hi\n");
    match result {
        Err(Error::StructuralError(msg)) => assert!(msg.contains("missing 'name'")),
        other => panic!("Expected StructuralError, got {other:?}"),
    }
}

#[test]
fn test_content_and_from_together_is_structural_error() {
    let result = Document::from_yaml(
        "root:\n  dir: x\n  files:\n    - name: a\n      content: hi\n      from: a.tpl\n",
    );
    assert!(matches!(result, Err(Error::StructuralError(_))));
}

#[test]
fn test_missing_root_is_document_error() {
    assert!(matches!(Document::from_yaml("defaults: {a: b}"), Err(Error::DocumentError(_))));
    assert!(matches!(Document::from_yaml(""), Err(Error::DocumentError(_))));
}

#[test]
fn test_invalid_yaml_is_document_error() {
    assert!(matches!(Document::from_yaml("root: [unclosed"), Err(Error::DocumentError(_))));
}
