use assert_cmd::Command;
use predicates::prelude::*;

fn modgraph_cmd() -> Command {
    Command::cargo_bin("modgraph").unwrap()
}

#[test]
fn help_lists_commands() {
    modgraph_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("graph"))
        .stdout(predicate::str::contains("versions"));
}

#[test]
fn version_flag() {
    modgraph_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("modgraph"));
}

#[test]
fn graph_requires_module() {
    modgraph_cmd()
        .arg("graph")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MODULE"));
}

#[test]
fn graph_help_shows_flags() {
    modgraph_cmd()
        .args(["graph", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--sizes"))
        .stdout(predicate::str::contains("--max-depth"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn empty_module_path_rejected_before_any_network() {
    modgraph_cmd()
        .args(["graph", "@v1.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid module input"));
}

#[test]
fn versions_requires_module() {
    modgraph_cmd()
        .arg("versions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MODULE"));
}
