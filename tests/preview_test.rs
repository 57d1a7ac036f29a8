use scaffolder::config::Document;
use scaffolder::preview::render_tree;

#[test]
fn test_render_tree() {
    let doc = Document::from_yaml(
        r#"
root:
  dir: "{{PROJECT}}"
  files:
    - name: README.md
      content: "Project {{PROJECT}}"
  children:
    - dir: src
      id: global_src
      files:
        - name: top.sv
          from: rtl/top.sv
      children:
        - dir: ip
    - dir: sim
      id: env.simulation
      optional: true
      files:
        - name: wave.do
          only_if: "sim=gtkwave"
        - name: run.sh
          from: sim/run.sh
          only_if: "sim=cdssim"
"#,
    )
    .unwrap();

    let expected = vec![
        "{{PROJECT}}",
        "├── README.md",
        "├── src [id=global_src]",
        "│   ├── top.sv <- rtl/top.sv",
        "│   └── ip",
        "└── sim [id=env.simulation, optional]",
        "    ├── wave.do  (only_if: sim=gtkwave)",
        "    └── run.sh <- sim/run.sh  (only_if: sim=cdssim)",
    ];
    assert_eq!(render_tree(&doc.root), expected);
}

#[test]
fn test_render_tree_single_node() {
    let doc = Document::from_yaml("root: {dir: lonely}").unwrap();
    assert_eq!(render_tree(&doc.root), vec!["lonely"]);
}
