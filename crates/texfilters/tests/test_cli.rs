/*
 * test_cli.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Runs the texfilters binary the way pandoc does: JSON on stdin, format as
 * the first argument, JSON on stdout.
 */

use serde_json::{Value, json};
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn texfilters() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_texfilters"));
    for var in [
        "TEXFILTERS_FORMAT",
        "TEXFILTERS_FILTER",
        "TEXFILTERS_HEADING_DEPTH",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start texfilters");
    // The child may exit (e.g. on an argument error) before reading stdin.
    if let Err(e) = child.stdin.take().unwrap().write_all(input.as_bytes()) {
        assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe, "{e}");
    }
    child.wait_with_output().unwrap()
}

fn document() -> Value {
    json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": [
            {"t": "Header", "c": [3, ["deep", [], []], [{"t": "Str", "c": "Deep"}]]},
            {"t": "Table", "c": [
                [{"t": "Str", "c": "Cap"}],
                [{"t": "AlignLeft"}, {"t": "AlignRight"}],
                [0, 0],
                [[{"t": "Plain", "c": [{"t": "Str", "c": "a"}]}], [{"t": "Plain", "c": [{"t": "Str", "c": "b"}]}]],
                [[[{"t": "Plain", "c": [{"t": "Str", "c": "1"}]}], [{"t": "Plain", "c": [{"t": "Str", "c": "2"}]}]]]
            ]}
        ]
    })
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_filters_stdin_to_stdout() {
    let mut cmd = texfilters();
    cmd.arg("latex");
    let output = run_with_stdin(cmd, &document().to_string());
    assert!(output.status.success());
    let result = stdout_json(&output);
    let blocks = result["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 11);
    assert_eq!(blocks[0], document()["blocks"][0]);
    assert_eq!(blocks[4]["c"], json!(["latex", "\\begin{tabu}{lX[1,r]}"]));
    assert!(output.stdout.ends_with(b"\n"));
}

#[test]
fn test_filter_selection_from_environment() {
    let mut cmd = texfilters();
    cmd.env("TEXFILTERS_FILTER", "headings,tables");
    let output = run_with_stdin(cmd, &document().to_string());
    assert!(output.status.success());
    let result = stdout_json(&output);
    assert_eq!(result["blocks"][0]["c"][1], json!(["", ["unnumbered"], []]));
    assert_eq!(result["blocks"].as_array().unwrap().len(), 11);
}

#[test]
fn test_only_latex_passes_html_through() {
    let mut cmd = texfilters();
    cmd.args(["html", "--only-latex"]);
    let output = run_with_stdin(cmd, &document().to_string());
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), document());
}

#[test]
fn test_unknown_filter_is_rejected() {
    let mut cmd = texfilters();
    cmd.args(["-F", "citeproc"]);
    let output = run_with_stdin(cmd, &document().to_string());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("citeproc"));
}

#[test]
fn test_malformed_table_fails_without_output() {
    let input = json!({"blocks": [
        {"t": "Para", "c": []},
        {"t": "Table", "c": [[], [], []]}
    ]});
    let output = run_with_stdin(texfilters(), &input.to_string());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Table #1 at /blocks/1"), "stderr: {}", stderr);
    assert!(stderr.contains("3 elements"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_json_fails() {
    let output = run_with_stdin(texfilters(), "{not json");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read document"));
}

#[test]
fn test_file_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in.json");
    let output_path = dir.path().join("out.json");
    std::fs::write(&input_path, document().to_string()).unwrap();

    let output = texfilters()
        .arg("beamer")
        .arg("-i")
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .args(["-F", "headings", "--depth", "3", "--no-renumber"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    // depth 3 keeps the heading numbered; --no-renumber keeps its id
    assert_eq!(written, document());
}

#[test]
fn test_zero_depth_is_rejected() {
    let mut cmd = texfilters();
    cmd.args(["--depth", "0"]);
    let output = run_with_stdin(cmd, &document().to_string());
    assert!(!output.status.success());
}

#[test]
fn test_depth_beyond_six_levels_is_rejected() {
    for depth in ["7", "18446744073709551615"] {
        let mut cmd = texfilters();
        cmd.args(["-F", "headings", "--depth", depth]);
        let output = run_with_stdin(cmd, &document().to_string());
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("between 1 and 6"));
    }
}
