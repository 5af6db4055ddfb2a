// Integration tests for cli/help.rs

use lzsa::cli::help::write_usage;
use lzsa::version_string;

fn usage(program: &str) -> String {
    let mut buf = Vec::new();
    write_usage(&mut buf, program).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn usage_line_carries_program_name() {
    let text = usage("mytool");
    assert!(text.lines().any(|l| l.starts_with("usage: mytool ")), "{text}");
}

#[test]
fn usage_documents_match_range() {
    let text = usage("lzsa");
    assert!(text.contains("2..5"), "{text}");
    assert!(text.contains("same as -m3"), "{text}");
}

#[test]
fn banner_carries_the_package_version() {
    let text = usage("lzsa");
    let first = text.lines().next().unwrap();
    assert_eq!(first, format!("lzsa command-line tool v{}", version_string()));
    assert_eq!(version_string(), env!("CARGO_PKG_VERSION"));
}
