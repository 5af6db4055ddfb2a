// cli/constants.rs - program identity strings and the stderr display macro.

// ── Identity ──────────────────────────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "lzsa";
pub const AUTHOR: &str = "Emmanuel Marty and spke";

/// First line of the usage banner. Caller substitutes the version string.
pub const WELCOME_MESSAGE_FMT: &str = "lzsa command-line tool v{}";

/// Renders [`WELCOME_MESSAGE_FMT`] for `version`.
pub fn welcome_message(version: &str) -> String {
    WELCOME_MESSAGE_FMT.replacen("{}", version, 1)
}

// ── Display helpers ───────────────────────────────────────────────────────────
//
// Results and progress are written to stdout by the reporters; one-line
// driver diagnostics go to stderr through `display!`. Developer-level detail
// goes through `log` instead.

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}
