// lzsa - command-line LZSA compressor: option parsing, engine invocation and reporting.

pub mod timefn;
pub mod config;
pub mod cli;
pub mod engine;
pub mod invoke;
pub mod report;

// ── Version ───────────────────────────────────────────────────────────────────
pub const LZSA_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Version shown in the usage banner.
pub fn version_string() -> &'static str {
    LZSA_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use cli::args::{parse_args_from, RunOptions, UsageError};
pub use engine::{CompressionOutcome, Engine, EngineFlags, FileCompressor, StatusCode};
pub use invoke::{invoke, Invocation};
