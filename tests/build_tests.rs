//! Integration tests for the build command

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::lectern_cmd;

fn init_curriculum(temp: &TempDir) {
    lectern_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--title")
        .arg("Test Bootcamp")
        .assert()
        .success();
}

fn write_linked_lesson(temp: &TempDir) {
    fs::write(
        temp.path().join("index.md"),
        "# Test Bootcamp\n\n- [Closures](lessons/closures.md#overview)\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("lessons/closures.md"),
        "# Closures\n\n## Overview\n\nProse.\n",
    )
    .unwrap();
}

#[test]
fn test_build_writes_site_tree() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);
    write_linked_lesson(&temp);

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 2 pages and 0 assets into _site"));

    assert!(temp.path().join("_site/index.html").exists());
    assert!(temp.path().join("_site/lessons/closures.html").exists());
}

#[test]
fn test_build_rewrites_links_and_injects_anchors() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);
    write_linked_lesson(&temp);

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success();

    let index_html = fs::read_to_string(temp.path().join("_site/index.html")).unwrap();
    assert!(index_html.contains("href=\"lessons/closures.html#overview\""));

    let closures_html =
        fs::read_to_string(temp.path().join("_site/lessons/closures.html")).unwrap();
    assert!(closures_html.contains("id=\"overview\""));
    assert!(closures_html.contains("<title>Closures - Test Bootcamp</title>"));
}

#[test]
fn test_build_copies_assets() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);
    fs::write(
        temp.path().join("index.md"),
        "# Test Bootcamp\n\n![logo](assets/logo.png)\n",
    )
    .unwrap();
    fs::create_dir_all(temp.path().join("assets")).unwrap();
    fs::write(temp.path().join("assets/logo.png"), b"fake image bytes").unwrap();

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 asset"));

    let copied = fs::read(temp.path().join("_site/assets/logo.png")).unwrap();
    assert_eq!(copied, b"fake image bytes");
}

#[test]
fn test_build_out_overrides_site_dir() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--out")
        .arg("public")
        .assert()
        .success()
        .stdout(predicate::str::contains("into public"));

    assert!(temp.path().join("public/index.html").exists());
    assert!(!temp.path().join("_site").exists());
}

#[test]
fn test_build_clean_removes_stale_files() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);
    fs::create_dir_all(temp.path().join("_site")).unwrap();
    fs::write(temp.path().join("_site/stale.html"), "old").unwrap();

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--clean")
        .assert()
        .success();

    assert!(!temp.path().join("_site/stale.html").exists());
    assert!(temp.path().join("_site/index.html").exists());
}

#[test]
fn test_build_refuses_failing_curriculum() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);
    fs::write(
        temp.path().join("index.md"),
        "# Test Bootcamp\n\n- [Gone](lessons/gone.md)\n",
    )
    .unwrap();

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .failure()
        .code(4)
        .stdout(predicate::str::contains("broken link"))
        .stderr(predicate::str::contains("Checks failed"));

    assert!(!temp.path().join("_site").exists());
}

#[test]
fn test_rebuild_does_not_recurse_into_site() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success();

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 1 page and 0 assets"));

    assert!(!temp.path().join("_site/_site").exists());
}

#[test]
fn test_rebuild_with_out_ignores_previous_output() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--out")
        .arg("public")
        .assert()
        .success();

    // The first build's output must not trip the orphan check
    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--out")
        .arg("public")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 1 page and 0 assets"));
}

#[test]
fn test_custom_page_template_is_used() {
    let temp = TempDir::new().unwrap();
    init_curriculum(&temp);
    fs::create_dir_all(temp.path().join(".lectern/templates")).unwrap();
    fs::write(
        temp.path().join(".lectern/templates/page.html"),
        "<main data-course=\"{CURRICULUM}\">{CONTENT}</main>\n",
    )
    .unwrap();

    lectern_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success();

    let index_html = fs::read_to_string(temp.path().join("_site/index.html")).unwrap();
    assert!(index_html.starts_with("<main data-course=\"Test Bootcamp\">"));
}
