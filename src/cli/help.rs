// cli/help.rs - usage banner and flag help.
//
// Functions:
//   write_usage  → render the full usage text into any writer
//   print_usage  → write_usage to stderr (the form the binary uses)

use std::io::{self, Write};

use crate::cli::constants::{welcome_message, AUTHOR};
use crate::config::{MIN_MATCH_SIZE_MAX, MIN_MATCH_SIZE_MIN, PREFER_SPEED_MIN_MATCH};

/// Render the usage banner and the help line for every flag.
pub fn write_usage<W: Write>(out: &mut W, program: &str) -> io::Result<()> {
    writeln!(out, "{}", welcome_message(crate::version_string()))?;
    writeln!(out, "  (based upon lzsa tool by {})", AUTHOR)?;
    writeln!(
        out,
        "usage: {} [-v] [-b] [-stats] [-D <dict>] [-m <{}..{}> | --prefer-ratio | --prefer-speed] <infile> <outfile>",
        program, MIN_MATCH_SIZE_MIN, MIN_MATCH_SIZE_MAX
    )?;
    writeln!(out, "   -stats: show compressed data stats")?;
    writeln!(out, "       -v: be verbose")?;
    writeln!(out, "       -b: compress backward (requires a backward decompressor)")?;
    writeln!(out, "       -D <filename>: use dictionary file")?;
    writeln!(
        out,
        "       -m <value>: minimum match size ({}-{}) (default: chosen by the compressor)",
        MIN_MATCH_SIZE_MIN, MIN_MATCH_SIZE_MAX
    )?;
    writeln!(out, "       --prefer-ratio: favor compression ratio (default)")?;
    writeln!(
        out,
        "       --prefer-speed: favor decompression speed (same as -m{})",
        PREFER_SPEED_MIN_MATCH
    )?;
    Ok(())
}

/// Print the usage text to stderr. Write failures are ignored: the process is
/// about to exit with a usage error either way.
pub fn print_usage(program: &str) {
    let stderr = io::stderr();
    let mut lock = stderr.lock();
    let _ = write_usage(&mut lock, program);
    let _ = lock.flush();
}
