use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_escapify"))
}

fn create_temp_file(name: &str, content: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("target");
    path.push("tmp");
    fs::create_dir_all(&path).expect("Failed to create tmp dir");
    path.push(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

fn cleanup_temp_file(path: &PathBuf) {
    let _ = fs::remove_file(path);
}

fn run_with_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(get_binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute escapify binary");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for escapify")
}

#[test]
fn test_cli_decode_file() {
    println!("=== CLI: decode a file ===");

    let input_file = create_temp_file("cli_decode_input.json", "\"# Title\\n\\n*body*\"\n");

    let output = Command::new(get_binary_path())
        .arg("decode")
        .arg(&input_file)
        .output()
        .expect("Failed to execute escapify binary");

    println!("Stderr:\n{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.status.success(), "decode should succeed");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "# Title\n\n*body*");

    println!("✓ CLI decode successful\n");
    cleanup_temp_file(&input_file);
}

#[test]
fn test_cli_decode_stdin_to_output_file() {
    let output_file = create_temp_file("cli_decode_output.md", "");

    let output = run_with_stdin(
        &["decode", "-", "-o", output_file.to_str().expect("utf-8 path")],
        r#""a\tb""#,
    );

    assert!(output.status.success(), "decode should succeed");
    assert!(output.stdout.is_empty(), "Nothing should go to stdout");
    let written = fs::read_to_string(&output_file).expect("Output file should exist");
    assert_eq!(written, "a\tb");

    cleanup_temp_file(&output_file);
}

#[test]
fn test_cli_decode_rejects_non_string() {
    println!("=== CLI: decode rejects non-strings ===");

    let output = run_with_stdin(&["decode"], r#"{"a":1}"#);

    let stderr = String::from_utf8_lossy(&output.stderr);
    println!("Stderr:\n{}", stderr);
    assert!(!output.status.success(), "decode of an object should fail");
    assert!(stderr.contains("input must be a valid JSON-encoded string"));
    assert!(output.stdout.is_empty());

    println!("✓ Non-string rejected\n");
}

#[test]
fn test_cli_encode_stdin() {
    let output = run_with_stdin(&["encode"], "He said \"hi\"\n");

    assert!(output.status.success(), "encode should succeed");
    assert_eq!(String::from_utf8_lossy(&output.stdout), r#""He said \"hi\"\n""#);
}

#[test]
fn test_cli_encode_strip_newline() {
    let input_file = create_temp_file("cli_encode_input.md", "line one\nline two\n");

    let output = Command::new(get_binary_path())
        .args(["encode", "--strip-newline"])
        .arg(&input_file)
        .output()
        .expect("Failed to execute escapify binary");

    assert!(output.status.success(), "encode should succeed");
    assert_eq!(String::from_utf8_lossy(&output.stdout), r#""line one\nline two""#);

    cleanup_temp_file(&input_file);
}

#[test]
fn test_cli_encode_then_decode() {
    let raw = "tabs\tquotes\" backslashes\\ and caf\u{e9}";

    let encoded = run_with_stdin(&["encode"], raw);
    assert!(encoded.status.success());

    let decoded = run_with_stdin(&["decode"], &String::from_utf8_lossy(&encoded.stdout));
    assert!(decoded.status.success());
    assert_eq!(String::from_utf8_lossy(&decoded.stdout), raw);
}

#[test]
fn test_cli_missing_file_fails() {
    let output = Command::new(get_binary_path())
        .args(["decode", "/nonexistent/input.json"])
        .output()
        .expect("Failed to execute escapify binary");

    assert!(!output.status.success());
}
