//! Include resolution against real files on disk

use std::fs;
use std::path::PathBuf;

use cnf::cnf::file::ConfigurationFile;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn include_merges_child_document() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "child.cnf", "[extra]\nx = 1\n");
    let parent = write(&dir, "parent.cnf", "!include \"child.cnf\"\n[main]\na = 1\n");

    let file = ConfigurationFile::load(&parent);
    assert!(file.parse_succeeded());

    assert_eq!(file.includes().len(), 1);
    let record = &file.includes()[0];
    assert!(record.succeeded);
    assert_eq!(record.declared_path, "child.cnf");
    let nested = record.file.as_ref().expect("nested file");
    assert!(nested.parse_succeeded());
    assert_eq!(nested.file_name(), "child.cnf");

    let document = file.document().expect("document");
    // Own section first, merged-in content appended after
    assert_eq!(document.root.children.len(), 2);
    assert_eq!(document.root.children[0].name, "main");
    assert_eq!(document.root.children[0].file(), Some("parent.cnf"));
    assert_eq!(document.root.children[1].name, "extra");
    assert_eq!(document.root.children[1].file(), Some("child.cnf"));
}

#[test]
fn missing_include_is_not_fatal_to_parent() {
    let dir = TempDir::new().expect("tempdir");
    let parent = write(&dir, "parent.cnf", "!include \"missing.cnf\"\n[main]\na = 1\n");

    let file = ConfigurationFile::load(&parent);
    assert!(file.parse_succeeded());

    assert_eq!(file.includes().len(), 1);
    let record = &file.includes()[0];
    assert!(!record.succeeded);
    let nested = record.file.as_ref().expect("nested file");
    assert!(!nested.parse_succeeded());
    assert!(nested.last_io_error().is_some());

    // The parent document only holds the parent's own content
    let document = file.document().expect("document");
    assert_eq!(document.root.children.len(), 1);
}

#[test]
fn syntax_error_in_child_is_recorded_locally() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "broken.cnf", "[unterminated\n");
    let parent = write(&dir, "parent.cnf", "!include broken.cnf\n[main]\na = 1\n");

    let file = ConfigurationFile::load(&parent);
    assert!(file.parse_succeeded());

    let record = &file.includes()[0];
    assert!(!record.succeeded);
    let nested = record.file.as_ref().expect("nested file");
    assert!(nested.last_syntax_error().is_some());
    assert!(nested.last_io_error().is_none());
    assert!(nested.document().is_none());
    assert!(nested.statistics().is_none());
}

#[test]
fn includedir_resolves_files_sorted_by_name() {
    let dir = TempDir::new().expect("tempdir");
    let conf_d = dir.path().join("conf.d");
    fs::create_dir(&conf_d).expect("create conf.d");
    fs::write(conf_d.join("b.cnf"), "[bee]\n").expect("write");
    fs::write(conf_d.join("a.cnf"), "[ay]\n").expect("write");
    fs::write(conf_d.join("c.cnf"), "[cee]\n").expect("write");
    // Nested directories are not traversed
    fs::create_dir(conf_d.join("nested")).expect("create nested");

    let parent = write(&dir, "parent.cnf", "!includedir conf.d\n[main]\n");
    let file = ConfigurationFile::load(&parent);
    assert!(file.parse_succeeded());

    let names: Vec<String> = file
        .includes()
        .iter()
        .map(|r| {
            r.file
                .as_ref()
                .map(|f| f.file_name())
                .unwrap_or_default()
        })
        .collect();
    assert_eq!(names, vec!["a.cnf", "b.cnf", "c.cnf"]);
    assert!(file.includes().iter().all(|r| r.succeeded));

    let document = file.document().expect("document");
    let merged: Vec<&str> = document
        .root
        .children
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(merged, vec!["main", "ay", "bee", "cee"]);
}

#[test]
fn unlistable_includedir_yields_one_failed_record() {
    let dir = TempDir::new().expect("tempdir");
    let parent = write(&dir, "parent.cnf", "!includedir nowhere.d\n[main]\n");

    let file = ConfigurationFile::load(&parent);
    assert!(file.parse_succeeded());
    assert_eq!(file.includes().len(), 1);

    let record = &file.includes()[0];
    assert!(!record.succeeded);
    assert_eq!(record.declared_path, "nowhere.d");
    assert!(record.file.is_none());
}

#[test]
fn nested_includes_merge_transitively() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "c.cnf", "[level_c]\ndeep = 1\n");
    write(&dir, "b.cnf", "!include c.cnf\n[level_b]\n");
    let a = write(&dir, "a.cnf", "!include b.cnf\n[level_a]\n");

    let file = ConfigurationFile::load(&a);
    assert!(file.parse_succeeded());

    let b = file.includes()[0].file.as_ref().expect("b.cnf");
    assert_eq!(b.includes().len(), 1);
    assert!(b.includes()[0].succeeded);

    let document = file.document().expect("document");
    let names: Vec<&str> = document
        .root
        .children
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    // b's document already contains c's content when it is merged into a
    assert_eq!(names, vec!["level_a", "level_b", "level_c"]);

    let c_section = document
        .root
        .children
        .iter()
        .find(|e| e.name == "level_c")
        .expect("level_c");
    assert_eq!(c_section.file(), Some("c.cnf"));
}

#[test]
fn include_cycle_is_rejected_not_followed() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "b.cnf", "!include a.cnf\n[from_b]\n");
    let a = write(&dir, "a.cnf", "!include b.cnf\n[from_a]\n");

    let file = ConfigurationFile::load(&a);
    assert!(file.parse_succeeded());

    let b = file.includes()[0].file.as_ref().expect("b.cnf");
    assert!(file.includes()[0].succeeded);

    // b's attempt to re-enter a is recorded as a failed include
    assert_eq!(b.includes().len(), 1);
    assert!(!b.includes()[0].succeeded);
    assert!(b.includes()[0].file.is_none());
}

#[test]
fn self_include_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let a = write(&dir, "a.cnf", "!include a.cnf\n[main]\n");

    let file = ConfigurationFile::load(&a);
    assert!(file.parse_succeeded());
    assert_eq!(file.includes().len(), 1);
    assert!(!file.includes()[0].succeeded);
}

#[test]
fn missing_file_reports_io_failure_and_no_statistics() {
    let dir = TempDir::new().expect("tempdir");
    let file = ConfigurationFile::load(dir.path().join("absent.cnf"));

    assert!(!file.parse_succeeded());
    assert!(file.last_io_error().is_some());
    assert!(file.last_syntax_error().is_none());
    assert!(file.document().is_none());
    assert!(file.statistics().is_none());
    assert!(file.evaluate(&["//x"]).is_none());
    assert!(file.includes().is_empty());
}

#[test]
fn syntax_failure_reports_position_and_discards_tree() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "bad.cnf", "[ok]\nx = 1\n[broken\n");

    let file = ConfigurationFile::load(&path);
    assert!(!file.parse_succeeded());
    let error = file.last_syntax_error().expect("syntax error");
    assert!(error.position.line >= 1);

    // No partial tree or document is exposed
    assert!(file.tree().is_none());
    assert!(file.document().is_none());
    assert!(file.statistics().is_none());
}
