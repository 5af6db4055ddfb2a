// e2e/cli_integration.rs - CLI integration tests
//
// Drives the `lzsa` binary as a black box with std::process::Command.
// Covers exit codes, the usage banner, failure diagnostics, progress,
// verbose summary and statistics output.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Locate the `lzsa` binary produced by Cargo.
fn lzsa_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_lzsa") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("lzsa");
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(lzsa_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run lzsa")
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

/// A TempDir holding `input.txt` with ~6 KB of repetitive text.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "Hello, LZSA! Hello again, LZSA!\n".repeat(200)).unwrap();
    (dir, input)
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).into_owned()
}

// ── 1. Success ────────────────────────────────────────────────────────────────

#[test]
fn test_cli_compress_quietly() {
    let (dir, input) = make_temp_input();
    let output = dir.path().join("out.lzsa");
    let o = run(&[s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(0), "stderr: {}", stderr(&o));
    assert!(o.stdout.is_empty(), "small input prints nothing: {:?}", stdout(&o));
    assert!(o.stderr.is_empty());
    let written = fs::read(&output).unwrap();
    assert_eq!(&written[..3], &[0x7B, 0x9E, 0x00]);
    assert!(written.len() < fs::metadata(&input).unwrap().len() as usize);
}

#[test]
fn test_cli_prefer_speed_and_backward() {
    let (dir, input) = make_temp_input();
    let output = dir.path().join("out.lzsa");
    let o = run(&["--prefer-speed", "-b", s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(0), "stderr: {}", stderr(&o));
    let written = fs::read(&output).unwrap();
    // Backward streams are stored reversed, header last.
    assert_eq!(&written[written.len() - 3..], &[0x00, 0x9E, 0x7B]);
}

#[test]
fn test_cli_dictionary() {
    let (dir, input) = make_temp_input();
    let dict = dir.path().join("dict.txt");
    fs::write(&dict, "Hello, LZSA! Hello again, LZSA!\n").unwrap();
    let output = dir.path().join("out.lzsa");
    let o = run(&["-D", s(&dict), s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(0), "stderr: {}", stderr(&o));

    let attached = format!("-D{}", s(&dict));
    let o = run(&[attached.as_str(), s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(0), "stderr: {}", stderr(&o));
}

// ── 2. Verbose and statistics ─────────────────────────────────────────────────

#[test]
fn test_cli_verbose_summary() {
    let (dir, input) = make_temp_input();
    let output = dir.path().join("out.lzsa");
    let o = run(&["-v", s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(0));
    let out = stdout(&o);
    let expected = format!("Compressed '{}' in ", s(&input));
    assert!(out.contains(&expected), "{out}");
    assert!(out.contains(" tokens ("), "{out}");
    assert!(out.contains("6400 into "), "{out}");
    assert!(out.contains("Safe distance: "), "{out}");
}

#[test]
fn test_cli_stats_lines() {
    let (dir, input) = make_temp_input();
    let output = dir.path().join("out.lzsa");
    let o = run(&["-stats", s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(0));
    let out = stdout(&o);
    let labels: Vec<&str> = out
        .lines()
        .map(|l| l.split(':').next().unwrap_or(""))
        .collect();
    assert_eq!(
        labels,
        ["Literals", "Offsets", "Match lens", "RLE1 lens", "RLE2 lens"]
    );
    assert!(out.contains("Offsets: min: "), "{out}");
}

#[test]
fn test_cli_progress_for_large_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("big.bin");
    let output = dir.path().join("big.lzsa");
    fs::write(&input, "0123456789abcdef".repeat(70_000)).unwrap();
    let o = run(&[s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(0));
    let out = stdout(&o);
    assert!(out.contains("\r1120000 => "), "{out:?}");
    assert!(out.contains(" %)"), "{out:?}");
}

#[cfg(target_os = "linux")]
#[test]
fn test_cli_full_stdout_keeps_success_code() {
    use std::process::Stdio;

    let (dir, input) = make_temp_input();
    let output = dir.path().join("out.lzsa");
    for flag in ["-v", "-stats"] {
        let full = fs::OpenOptions::new().write(true).open("/dev/full").unwrap();
        let o = Command::new(lzsa_bin())
            .args([flag, s(&input), s(&output)])
            .env_remove("RUST_LOG")
            .stdout(Stdio::from(full))
            .output()
            .expect("failed to run lzsa");
        assert_eq!(o.status.code(), Some(0), "{flag}: {}", stderr(&o));
        assert!(stderr(&o).contains("failed to write the compression report"));
        assert_eq!(&fs::read(&output).unwrap()[..3], &[0x7B, 0x9E, 0x00]);
    }
}

// ── 3. Usage errors ───────────────────────────────────────────────────────────

#[test]
fn test_cli_no_arguments_prints_usage() {
    let o = run(&[]);
    assert_eq!(o.status.code(), Some(100));
    assert!(o.stdout.is_empty());
    let err = stderr(&o);
    assert!(err.contains("usage: "), "{err}");
    assert!(err.contains("--prefer-speed"), "{err}");
}

#[test]
fn test_cli_usage_errors_exit_100() {
    let (dir, input) = make_temp_input();
    let output = dir.path().join("out.lzsa");
    let (i, out) = (s(&input), s(&output));
    let cases: Vec<Vec<&str>> = vec![
        vec!["-v", "-v", i, out],
        vec!["-b", "-b", i, out],
        vec!["-stats", "-stats", i, out],
        vec!["-m", "1", i, out],
        vec!["-m", "6", i, out],
        vec!["-m", "abc", i, out],
        vec!["-m3", "--prefer-speed", i, out],
        vec!["--prefer-ratio", "--prefer-ratio", i, out],
        vec![i, out, "extra"],
        vec![i],
    ];
    for args in cases {
        let o = run(&args);
        assert_eq!(o.status.code(), Some(100), "{args:?}");
        assert!(stderr(&o).contains("usage: "), "{args:?}");
        assert!(!output.exists(), "{args:?} must not reach the engine");
    }
}

// ── 4. Engine failures ────────────────────────────────────────────────────────

#[test]
fn test_cli_missing_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.bin");
    let output = dir.path().join("out.lzsa");
    let o = run(&["-v", "-stats", s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(100));
    assert!(o.stdout.is_empty(), "{}", stdout(&o));
    assert_eq!(stderr(&o), format!("error reading '{}'\n", s(&input)));
}

#[test]
fn test_cli_missing_dictionary() {
    let (dir, input) = make_temp_input();
    let dict = dir.path().join("nodict");
    let output = dir.path().join("out.lzsa");
    let o = run(&["-D", s(&dict), s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(100));
    assert_eq!(stderr(&o), format!("error reading dictionary '{}'\n", s(&dict)));
}

#[test]
fn test_cli_unwritable_output() {
    let (dir, input) = make_temp_input();
    let output = dir.path().join("no-such-dir").join("out.lzsa");
    let o = run(&[s(&input), s(&output)]);
    assert_eq!(o.status.code(), Some(100));
    assert_eq!(stderr(&o), format!("error writing '{}'\n", s(&output)));
}
