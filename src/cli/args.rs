//! Command-line argument parsing for the `lzsa` compressor.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a validated [`RunOptions`] or the first [`UsageError`] found.
//!
//! Tokens are processed left to right in a single pass, first match wins:
//!
//! | Token                       | Effect |
//! |-----------------------------|--------|
//! | `-D <path>`, `-D<path>`     | dictionary file |
//! | `-m <n>`, `-m<n>`           | explicit minimum match size, `2..=5`; clears favor-ratio |
//! | `--prefer-ratio`            | ratio mode, no explicit minimum |
//! | `--prefer-speed`            | same as `-m 3` |
//! | `-v`, `-b`, `-stats`        | verbose, backward, statistics |
//! | anything else               | input path, then output path |
//!
//! `-m`, `--prefer-ratio` and `--prefer-speed` all claim the same minimum-match
//! slot, so any two of them (or the same one twice) are rejected. Repeating
//! `-v`, `-b`, `-stats` or `-D` is rejected too; a repeated flag is a usage
//! error, never a no-op.

use thiserror::Error;

use crate::cli::arg_utils::{attached_value, read_int_exact};
use crate::config::{MIN_MATCH_SIZE_MAX, MIN_MATCH_SIZE_MIN, PREFER_SPEED_MIN_MATCH};

// ── Public output type ─────────────────────────────────────────────────────────

/// Validated configuration for one compression run.
///
/// Built once by [`parse_args_from`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Ratio-favoring engine policy. Always `false` when an explicit minimum
    /// match size is set.
    pub favor_ratio: bool,
    /// Produce a stream meant to be decompressed from the end (`-b`).
    pub backward: bool,
    /// Print timing and the summary line (`-v`).
    pub verbose: bool,
    /// Print token statistics (`-stats`).
    pub show_stats: bool,
    /// Explicit minimum match size in `2..=5`, `None` to let the engine choose.
    pub min_match_size: Option<u32>,
    /// Dictionary file path (`-D`).
    pub dictionary_path: Option<String>,
    pub input_path: String,
    pub output_path: String,
}

// ── Errors ─────────────────────────────────────────────────────────────────────

/// Why an argument list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("{flag}: option given more than once")]
    DuplicateOption { flag: &'static str },

    #[error("{flag}: minimum match size is already set by an earlier option")]
    ConflictingMatchPolicy { flag: &'static str },

    #[error("{flag}: missing argument")]
    MissingValue { flag: &'static str },

    #[error("-m: invalid minimum match size '{value}' (expected {min}-{max})", min = MIN_MATCH_SIZE_MIN, max = MIN_MATCH_SIZE_MAX)]
    InvalidMinMatch { value: String },

    #[error("{arg}: too many file arguments")]
    UnexpectedArgument { arg: String },

    #[error("missing input file")]
    MissingInput,

    #[error("missing output file")]
    MissingOutput,
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse `std::env::args()`, skipping argv[0].
pub fn parse_args() -> Result<RunOptions, UsageError> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&argv)
}

/// Parse an explicit argument list (argv[1..]).
///
/// This variant is callable from tests without touching `std::env`.
pub fn parse_args_from<S: AsRef<str>>(argv: &[S]) -> Result<RunOptions, UsageError> {
    // --- Mutable parsing state ---
    let mut favor_ratio = true;
    let mut backward = false;
    let mut verbose = false;
    let mut show_stats = false;
    let mut min_match_defined = false;
    let mut min_match_size: Option<u32> = None;
    let mut dictionary_path: Option<String> = None;
    let mut input_path: Option<String> = None;
    let mut output_path: Option<String> = None;

    let mut arg_idx = 0usize;
    while arg_idx < argv.len() {
        let argument = argv[arg_idx].as_ref();

        if argument.starts_with("-D") {
            if dictionary_path.is_some() {
                return Err(UsageError::DuplicateOption { flag: "-D" });
            }
            let value = option_value(argv, &mut arg_idx, "-D")?;
            dictionary_path = Some(value.to_owned());
        } else if argument.starts_with("-m") {
            if min_match_defined {
                return Err(UsageError::ConflictingMatchPolicy { flag: "-m" });
            }
            let value = option_value(argv, &mut arg_idx, "-m")?;
            min_match_size = Some(parse_min_match(value)?);
            min_match_defined = true;
            favor_ratio = false;
        } else if argument == "--prefer-ratio" {
            if min_match_defined {
                return Err(UsageError::ConflictingMatchPolicy { flag: "--prefer-ratio" });
            }
            min_match_size = None;
            min_match_defined = true;
        } else if argument == "--prefer-speed" {
            if min_match_defined {
                return Err(UsageError::ConflictingMatchPolicy { flag: "--prefer-speed" });
            }
            min_match_size = Some(PREFER_SPEED_MIN_MATCH);
            min_match_defined = true;
            favor_ratio = false;
        } else if argument == "-v" {
            if verbose {
                return Err(UsageError::DuplicateOption { flag: "-v" });
            }
            verbose = true;
        } else if argument == "-b" {
            if backward {
                return Err(UsageError::DuplicateOption { flag: "-b" });
            }
            backward = true;
        } else if argument == "-stats" {
            if show_stats {
                return Err(UsageError::DuplicateOption { flag: "-stats" });
            }
            show_stats = true;
        } else if input_path.is_none() {
            input_path = Some(argument.to_owned());
        } else if output_path.is_none() {
            output_path = Some(argument.to_owned());
        } else {
            return Err(UsageError::UnexpectedArgument {
                arg: argument.to_owned(),
            });
        }

        arg_idx += 1;
    }

    let input_path = input_path.ok_or(UsageError::MissingInput)?;
    let output_path = output_path.ok_or(UsageError::MissingOutput)?;

    Ok(RunOptions {
        favor_ratio,
        backward,
        verbose,
        show_stats,
        min_match_size,
        dictionary_path,
        input_path,
        output_path,
    })
}

// ── Helpers ────────────────────────────────────────────────────────────────────

/// Value of a short option that accepts both `-X value` and `-Xvalue`.
///
/// For the separated form the next token is consumed (advancing `arg_idx`),
/// whatever it looks like.
fn option_value<'a, S: AsRef<str>>(
    argv: &'a [S],
    arg_idx: &mut usize,
    flag: &'static str,
) -> Result<&'a str, UsageError> {
    if let Some(value) = attached_value(argv[*arg_idx].as_ref(), flag) {
        return Ok(value);
    }
    *arg_idx += 1;
    argv.get(*arg_idx)
        .map(|s| s.as_ref())
        .ok_or(UsageError::MissingValue { flag })
}

fn parse_min_match(value: &str) -> Result<u32, UsageError> {
    let invalid = || UsageError::InvalidMinMatch {
        value: value.to_owned(),
    };
    let n = read_int_exact(value).ok_or_else(invalid)?;
    if n < MIN_MATCH_SIZE_MIN as i64 || n > MIN_MATCH_SIZE_MAX as i64 {
        return Err(invalid());
    }
    Ok(n as u32)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
