// Integration tests for cli/args.rs - option resolution.
//
// Covers:
//   - minimum-match policy equivalences (--prefer-speed, --prefer-ratio, -m)
//   - every duplicate / conflicting flag combination
//   - -m value validation
//   - positional argument count

use lzsa::cli::args::{parse_args_from, RunOptions, UsageError};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn parse(argv: &[&str]) -> RunOptions {
    parse_args_from(argv).expect("parse should succeed")
}

fn parse_err(argv: &[&str]) -> UsageError {
    parse_args_from(argv).expect_err("expected usage error")
}

// ─────────────────────────────────────────────────────────────────────────────
// Minimum-match policy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn prefer_speed_is_min_match_three() {
    assert_eq!(parse(&["--prefer-speed", "a", "b"]), parse(&["-m", "3", "a", "b"]));
    assert_eq!(parse(&["--prefer-speed", "a", "b"]), parse(&["-m3", "a", "b"]));
}

#[test]
fn prefer_ratio_is_the_default() {
    assert_eq!(parse(&["--prefer-ratio", "a", "b"]), parse(&["a", "b"]));
}

#[test]
fn explicit_min_match_clears_favor_ratio() {
    for n in 2..=5u32 {
        let value = n.to_string();
        let p = parse(&["-m", value.as_str(), "a", "b"]);
        assert_eq!(p.min_match_size, Some(n));
        assert!(!p.favor_ratio);
    }
}

#[test]
fn favor_ratio_never_carries_explicit_size() {
    let cases: &[&[&str]] = &[
        &["a", "b"],
        &["--prefer-ratio", "a", "b"],
        &["--prefer-speed", "a", "b"],
        &["-m2", "a", "b"],
        &["-m", "5", "-v", "a", "b"],
    ];
    for argv in cases {
        let p = parse(argv);
        assert!(
            !(p.favor_ratio && p.min_match_size.is_some()),
            "{argv:?} resolved to {p:?}"
        );
    }
}

#[test]
fn out_of_range_or_malformed_min_match_rejected() {
    for bad in ["1", "6", "abc", "3x", "", "-2"] {
        let err = parse_err(&["-m", bad, "a", "b"]);
        assert!(
            matches!(err, UsageError::InvalidMinMatch { .. }),
            "-m {bad:?} gave {err:?}"
        );
    }
    assert!(matches!(
        parse_err(&["-m9", "a", "b"]),
        UsageError::InvalidMinMatch { .. }
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Repeated flags
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn repeated_simple_flags_rejected() {
    assert_eq!(parse_err(&["-v", "-v", "a", "b"]), UsageError::DuplicateOption { flag: "-v" });
    assert_eq!(parse_err(&["-b", "a", "-b", "b"]), UsageError::DuplicateOption { flag: "-b" });
    assert_eq!(
        parse_err(&["-stats", "a", "b", "-stats"]),
        UsageError::DuplicateOption { flag: "-stats" }
    );
    assert_eq!(
        parse_err(&["-D", "x", "-Dy", "a", "b"]),
        UsageError::DuplicateOption { flag: "-D" }
    );
}

#[test]
fn any_two_min_match_specifications_rejected() {
    let specs: [&[&str]; 4] = [&["-m", "3"], &["-m4"], &["--prefer-ratio"], &["--prefer-speed"]];
    for first in specs {
        for second in specs {
            let mut argv: Vec<&str> = Vec::new();
            argv.extend_from_slice(first);
            argv.extend_from_slice(second);
            argv.extend_from_slice(&["a", "b"]);
            assert!(
                matches!(parse_err(&argv), UsageError::ConflictingMatchPolicy { .. }),
                "{argv:?} should be rejected"
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Positionals
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn third_positional_rejected() {
    assert_eq!(
        parse_err(&["a", "b", "c"]),
        UsageError::UnexpectedArgument { arg: "c".into() }
    );
}

#[test]
fn missing_paths_rejected() {
    assert_eq!(parse_err(&[]), UsageError::MissingInput);
    assert_eq!(parse_err(&["-v", "a"]), UsageError::MissingOutput);
}

#[test]
fn flags_and_paths_in_any_order() {
    let p = parse(&["a", "-v", "-stats", "b", "-b", "-Dwords"]);
    assert_eq!(p.input_path, "a");
    assert_eq!(p.output_path, "b");
    assert!(p.verbose && p.show_stats && p.backward);
    assert_eq!(p.dictionary_path.as_deref(), Some("words"));
}

#[test]
fn unknown_dash_token_is_a_path() {
    let p = parse(&["-x", "b"]);
    assert_eq!(p.input_path, "-x");
}
