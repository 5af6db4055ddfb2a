//! Command-line interface for the `lzsa` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings and the `display!` macro. |
//! | [`help`]      | Usage banner and per-flag help text. |
//! | [`arg_utils`] | Low-level helpers: path basename, strict integer parsing, attached option values. |
//! | [`args`]      | `RunOptions` and `UsageError`: the single-pass argument parser. |
//!
//! Typical call sequence: `parse_args` → on error `print_usage` and exit 100,
//! otherwise hand the `RunOptions` to the invoker.

pub mod constants;
pub mod help;
pub mod arg_utils;
pub mod args;
