/*!
 * End-to-end tests for the scan → render → deliver pipeline
 */

use std::fs;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::tempdir;

use projectmd::{deliver, Config, Delivery, MarkdownWriter, OutputTarget, Scanner};

fn document_for(root: &Path) -> String {
    let config = Config::for_root(root);
    let tree = Scanner::from_config(&config, Arc::new(ProgressBar::hidden()))
        .scan()
        .unwrap();
    MarkdownWriter::new(root).write(&tree)
}

#[test]
fn test_ignored_binary_scenario() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "print(1)").unwrap();
    fs::write(dir.path().join("b.bin"), [0u8, 1, 2]).unwrap();
    fs::write(dir.path().join(".gitignore"), "*.bin\n").unwrap();

    let doc = document_for(dir.path());

    assert!(doc.contains("- a.py"));
    assert!(doc.contains("## a.py\n\n```python\nprint(1)\n```\n"));
    assert!(!doc.contains("b.bin"));
    // the ignore file is listed like any other file
    assert!(doc.contains("## .gitignore\n\n```\n*.bin\n```\n"));
    assert_eq!(doc.matches("\n## ").count(), 2);
}

#[test]
fn test_short_file_with_incomplete_utf8_is_binary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.dat"), [b'a', 0xe2, 0x9c]).unwrap();

    let doc = document_for(dir.path());

    assert!(doc.contains("## x.dat\n\n_(binary file, not included)_\n"));
    assert!(!doc.contains("Could not read file"));
}

#[test]
fn test_empty_directory_scenario() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "").unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();

    let doc = document_for(dir.path());

    assert_eq!(
        doc,
        "<project>\n# Project Structure\n\n- .gitignore\n- **empty/**\n\n# File Contents\n\n## .gitignore\n\n```\n```\n\n</project>\n"
    );
}

#[test]
fn test_git_directory_scenario() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git").join("config"), "[core]\n").unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
    fs::write(dir.path().join("rules"), "!.git\n!.git/**\n").unwrap();

    let mut config = Config::for_root(dir.path());
    config.ignore_file = Some(dir.path().join("rules"));
    let tree = Scanner::from_config(&config, Arc::new(ProgressBar::hidden()))
        .scan()
        .unwrap();
    let doc = MarkdownWriter::new(dir.path()).write(&tree);

    assert!(!doc.contains("- **.git/**"));
    assert!(!doc.contains("## .git/config"));
    assert!(!doc.contains("[core]"));
    assert!(doc.contains("## main.rs"));
}

#[test]
fn test_pipeline_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src").join("nested")).unwrap();
    fs::write(dir.path().join("src").join("lib.rs"), "pub fn f() {}\n").unwrap();
    fs::write(dir.path().join("src").join("nested").join("data.json"), "{}").unwrap();
    fs::write(dir.path().join("logo.png"), [0x89, b'P', b'N', b'G', 0, 0]).unwrap();

    assert_eq!(document_for(dir.path()), document_for(dir.path()));
}

#[test]
fn test_deliver_to_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "print(1)").unwrap();
    let out = tempdir().unwrap();
    let out_path = out.path().join("context.md");

    let doc = document_for(dir.path());
    let delivery = deliver(&doc, &OutputTarget::File(out_path.clone())).unwrap();

    assert!(matches!(delivery, Delivery::File(_)));
    assert_eq!(fs::read_to_string(out_path).unwrap(), doc);
}
