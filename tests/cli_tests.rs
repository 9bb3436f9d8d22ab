// ABOUTME: Integration tests for the argoviz command line interface
// ABOUTME: Runs the built binary and checks exit status, messages, and written files

use assert_cmd::Command;
use predicates::prelude::*;

mod common;
use common::{TemplateDocumentBuilder, TestEnvironment};

fn argoviz_cmd() -> Command {
    let mut cmd = Command::cargo_bin("argoviz").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("ARGOVIZ_DOT")
        .env_remove("ARGOVIZ_LAYOUT");
    cmd
}

#[test]
fn test_cli_help_command() {
    argoviz_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input-file"))
        .stdout(predicate::str::contains("--output-file"));
}

#[test]
fn test_cli_version_command() {
    argoviz_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_requires_input_file() {
    argoviz_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input-file"));
}

#[test]
fn test_cli_missing_input_file() {
    let env = TestEnvironment::new();
    let input = env.input_file("absent");

    argoviz_cmd()
        .current_dir(env.path())
        .args(["--input-file", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    assert!(env.files().is_empty());
}

#[test]
fn test_cli_missing_entrypoint() {
    let env = TestEnvironment::new();
    let input = env.create_input_file(
        "workflow",
        &TemplateDocumentBuilder::new("main")
            .without_entrypoint()
            .add_step("S1"),
    );

    argoviz_cmd()
        .current_dir(env.path())
        .args(["--input-file", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spec.entrypoint"));

    assert_eq!(env.files(), vec!["workflow.yaml"]);
}

#[test]
fn test_cli_missing_style() {
    let env = TestEnvironment::new();
    let input = env.create_input_file("workflow", &TemplateDocumentBuilder::new("main"));

    argoviz_cmd()
        .current_dir(env.path())
        .args(["--input-file", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not contain a dag or steps"));

    assert_eq!(env.files(), vec!["workflow.yaml"]);
}

#[test]
fn test_cli_empty_steps() {
    let env = TestEnvironment::new();
    let input = env.create_input_file(
        "workflow",
        &TemplateDocumentBuilder::new("main").with_empty_steps(),
    );

    argoviz_cmd()
        .current_dir(env.path())
        .args(["--input-file", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty steps list"));

    assert_eq!(env.files(), vec!["workflow.yaml"]);
}

#[test]
fn test_cli_empty_dag() {
    let env = TestEnvironment::new();
    let input = env.create_raw_input_file(
        "workflow",
        "spec:\n  entrypoint: main\n  templates:\n    - name: main\n      dag:\n        tasks: []\n",
    );

    argoviz_cmd()
        .current_dir(env.path())
        .args(["--input-file", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty diagrams are not drawn"));

    assert_eq!(env.files(), vec!["workflow.yaml"]);
}

#[test]
fn test_cli_reports_missing_graphviz() {
    let env = TestEnvironment::new();
    let input = env.create_input_file(
        "workflow",
        &TemplateDocumentBuilder::new("main").add_step("S1"),
    );

    argoviz_cmd()
        .current_dir(env.path())
        .env("ARGOVIZ_DOT", "argoviz-no-such-graphviz-binary")
        .args(["--input-file", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("argoviz-no-such-graphviz-binary"));
}

#[test]
fn test_cli_renders_default_paths() {
    if !common::graphviz_available() {
        return;
    }

    let env = TestEnvironment::new();
    let input = env.create_input_file(
        "workflow",
        &TemplateDocumentBuilder::new("diamond")
            .add_dag_task("A")
            .add_dependent_task("B", vec!["A"])
            .add_dependent_task("C", vec!["A", "B"]),
    );

    argoviz_cmd()
        .current_dir(env.path())
        .args(["--input-file", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("workflow.png"))
        .stdout(predicate::str::contains("workflow.drawio"));

    assert_eq!(
        env.files(),
        vec!["workflow.drawio", "workflow.png", "workflow.yaml"]
    );
}

#[test]
fn test_cli_renders_explicit_output_file() {
    if !common::graphviz_available() {
        return;
    }

    let env = TestEnvironment::new();
    let input = env.create_input_file(
        "workflow",
        &TemplateDocumentBuilder::new("steps")
            .add_step("S1")
            .add_step("S2"),
    );
    let output = env.path().join("diagram.png");

    argoviz_cmd()
        .current_dir(env.path())
        .args([
            "--input-file",
            input.to_str().unwrap(),
            "--output-file",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(output.exists());
    assert!(env.path().join("diagram.drawio").exists());
}
