use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;

fn plotwist() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("plotwist"));
    cmd.env_remove("PLOTWIST_CONFIG_FILE")
        .env_remove("RUST_LOG")
        .env("PLOTWIST__LOGGING__LEVEL", "info");
    cmd
}

fn write_manifest(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("report.toml");
    fs::write(&path, body).expect("write manifest");
    path
}

#[test]
fn build_writes_report_and_artifacts() {
    let workspace = TempDir::new().expect("workspace");
    fs::write(workspace.path().join("loss.svg"), SVG).expect("write figure");
    let manifest = write_manifest(
        workspace.path(),
        r#"
title = "From manifest"

[[instruction]]
kind = "title"
text = "Loss"

[[instruction]]
kind = "figure"
path = "loss.svg"
"#,
    );
    let out = workspace.path().join("out");

    plotwist()
        .current_dir(workspace.path())
        .arg("build")
        .arg(&manifest)
        .arg("--output-dir")
        .arg(&out)
        .arg("--mathjax")
        .arg("false")
        .assert()
        .success()
        .stderr(contains("Report written"));

    let html = fs::read_to_string(out.join("index.html")).expect("report written");
    assert!(html.contains("<title>From manifest</title>"));
    assert!(html.contains("<h1>Loss</h1>"));
    assert!(!html.contains("MathJax"));
    assert_eq!(
        fs::read_to_string(out.join("plots").join("plot_0.svg")).expect("artifact copied"),
        SVG
    );
}

#[test]
fn title_flag_overrides_manifest_title() {
    let workspace = TempDir::new().expect("workspace");
    let manifest = write_manifest(
        workspace.path(),
        "title = \"From manifest\"\n\n[[instruction]]\nkind = \"rule\"\n",
    );
    let out = workspace.path().join("out");

    plotwist()
        .current_dir(workspace.path())
        .arg("build")
        .arg(&manifest)
        .arg("--output-dir")
        .arg(&out)
        .arg("--title")
        .arg("From flag")
        .assert()
        .success();

    let html = fs::read_to_string(out.join("index.html")).expect("report written");
    assert!(html.contains("<title>From flag</title>"));
}

#[test]
fn check_validates_without_writing() {
    let workspace = TempDir::new().expect("workspace");
    fs::write(workspace.path().join("a.svg"), SVG).expect("write figure");
    let manifest = write_manifest(
        workspace.path(),
        "[[instruction]]\nkind = \"slider\"\npaths = [\"a.svg\"]\n",
    );

    plotwist()
        .current_dir(workspace.path())
        .env("PLOTWIST__OUTPUT__DIRECTORY", workspace.path().join("out"))
        .arg("check")
        .arg(&manifest)
        .assert()
        .success()
        .stderr(contains("Manifest is valid"));

    assert!(!workspace.path().join("out").exists());
}

#[test]
fn unknown_instruction_kind_fails() {
    let workspace = TempDir::new().expect("workspace");
    let manifest = write_manifest(workspace.path(), "[[instruction]]\nkind = \"table\"\n");

    plotwist()
        .current_dir(workspace.path())
        .arg("check")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(contains("table"));
}

#[test]
fn missing_artifact_fails_build() {
    let workspace = TempDir::new().expect("workspace");
    let manifest = write_manifest(
        workspace.path(),
        "[[instruction]]\nkind = \"figure\"\npath = \"absent.svg\"\n",
    );
    let out = workspace.path().join("out");

    plotwist()
        .current_dir(workspace.path())
        .arg("build")
        .arg(&manifest)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(contains("absent.svg"));

    assert!(!out.join("index.html").exists());
}
