//! Progress and result reporting.
//!
//! Everything the tool prints after argument parsing goes through here:
//!
//! - [`render_progress`]: the `\r<orig> => <comp> (<pct> %)` line the engine
//!   triggers while it works;
//! - [`report`]: the failure diagnostic on stderr, or the verbose summary and
//!   statistics on stdout, and the exit code.
//!
//! Numbers are rendered with [`format_g`], which follows C's `%g` rules so the
//! output reads the same as other LZSA tools.

use std::io::{self, Write};

use crate::cli::args::RunOptions;
use crate::config::{EXIT_FAILURE, EXIT_SUCCESS, PROGRESS_THRESHOLD};
use crate::engine::{StatusCode, TokenStats};
use crate::invoke::Invocation;
use crate::timefn::Micros;

// ── Number formatting ─────────────────────────────────────────────────────────

/// Formats `value` like C's `%.<precision>g`: `precision` significant digits,
/// trailing zeros removed, exponent notation outside `1e-4 ..= 10^precision`.
pub fn format_g(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Compressed size as a percentage of the original; 0 for empty input.
pub fn compression_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    compressed as f64 * 100.0 / original as f64
}

/// Original bytes per emitted command; 0 when no command was emitted.
pub fn bytes_per_token(original: u64, commands: u32) -> f64 {
    if commands == 0 {
        return 0.0;
    }
    original as f64 / f64::from(commands)
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Writes one progress update, overwriting the previous one, once the
/// original size reaches [`PROGRESS_THRESHOLD`]. Smaller sizes print nothing.
///
/// The trailing spaces and backspaces blank out leftovers from a longer
/// previous line. Write and flush errors are ignored.
pub fn render_progress<W: Write>(out: &mut W, original: u64, compressed: u64) {
    if original < PROGRESS_THRESHOLD {
        return;
    }
    let _ = write!(
        out,
        "\r{} => {} ({} %)     \x08\x08\x08\x08\x08",
        original,
        compressed,
        format_g(compression_percent(original, compressed), 6)
    );
    let _ = out.flush();
}

/// A progress callback bound to `out`, ready to hand to the engine.
pub fn progress_to<W: Write>(mut out: W) -> impl FnMut(u64, u64) {
    move |original, compressed| render_progress(&mut out, original, compressed)
}

// ── Results ───────────────────────────────────────────────────────────────────

/// The one-line diagnostic for a failed run, `None` on success.
pub fn failure_message(status: StatusCode, opts: &RunOptions) -> Option<String> {
    let message = match status {
        StatusCode::Ok => return None,
        StatusCode::SourceReadError => format!("error reading '{}'", opts.input_path),
        StatusCode::DestinationWriteError => format!("error writing '{}'", opts.output_path),
        StatusCode::DictionaryReadError => format!(
            "error reading dictionary '{}'",
            opts.dictionary_path.as_deref().unwrap_or("")
        ),
        StatusCode::OutOfMemory => "out of memory".to_string(),
        StatusCode::InternalCompressionError => "internal compression error".to_string(),
        StatusCode::RawBlockTooLarge => {
            "error: raw blocks can only be used with files <= 64 Kb".to_string()
        }
        StatusCode::RawBlockIncompressibleTooLarge => {
            "error: incompressible data needs to be <= 64 Kb in raw blocks".to_string()
        }
        StatusCode::UnknownError(code) => format!("unknown compression error {}", code),
    };
    Some(message)
}

/// Process exit code for `status`: 0 on success, 100 otherwise.
pub fn exit_code(status: StatusCode) -> i32 {
    if status.is_ok() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

/// Writes the verbose summary and safe-distance lines.
///
/// An elapsed time under one microsecond is counted as one microsecond so
/// the throughput stays finite.
pub fn write_verbose_summary<W: Write>(
    out: &mut W,
    input_path: &str,
    inv: &Invocation,
) -> io::Result<()> {
    let outcome = &inv.outcome;
    let elapsed: Micros = inv.elapsed_us.unwrap_or(0).max(1);
    let seconds = elapsed as f64 / 1_000_000.0;
    let speed = (outcome.original_size as f64 / 1_048_576.0) / seconds;

    writeln!(
        out,
        "\rCompressed '{}' in {} seconds, {} Mb/s, {} tokens ({} bytes/token), {} into {} bytes ==> {} %",
        input_path,
        format_g(seconds, 6),
        format_g(speed, 2),
        outcome.command_count,
        format_g(bytes_per_token(outcome.original_size, outcome.command_count), 6),
        outcome.original_size,
        outcome.compressed_size,
        format_g(compression_percent(outcome.original_size, outcome.compressed_size), 6)
    )?;
    writeln!(
        out,
        "Safe distance: {} (0x{:X})",
        outcome.safe_distance, outcome.safe_distance
    )
}

/// Writes one line per statistics category; `none` for categories that never
/// occurred.
pub fn write_stats<W: Write>(out: &mut W, stats: &TokenStats) -> io::Result<()> {
    let lit = &stats.literals;
    match lit.average() {
        Some(avg) => writeln!(
            out,
            "Literals: min: {} avg: {} max: {} count: {}",
            lit.min, avg, lit.max, lit.divisor
        )?,
        None => writeln!(out, "Literals: none")?,
    }

    let m = &stats.matches;
    match (m.average_offset(), m.average_len()) {
        (Some(avg_offset), Some(avg_len)) => {
            writeln!(
                out,
                "Offsets: min: {} avg: {} max: {} reps: {} count: {}",
                m.min_offset, avg_offset, m.max_offset, m.rep_offsets, m.divisor
            )?;
            writeln!(
                out,
                "Match lens: min: {} avg: {} max: {} count: {}",
                m.min_len, avg_len, m.max_len, m.divisor
            )?;
        }
        _ => {
            writeln!(out, "Offsets: none")?;
            writeln!(out, "Match lens: none")?;
        }
    }

    for (label, run) in [("RLE1 lens", &stats.rle1), ("RLE2 lens", &stats.rle2)] {
        match run.average() {
            Some(avg) => writeln!(
                out,
                "{}: min: {} avg: {} max: {} count: {}",
                label, run.min, avg, run.max, run.divisor
            )?,
            None => writeln!(out, "{}: none", label)?,
        }
    }
    Ok(())
}

/// Writes the report for a finished invocation.
///
/// A failure produces one line on `err` and nothing on `out`. A success
/// produces the summary (verbose) and the statistics (`-stats`) on `out`.
/// The exit code comes from [`exit_code`] alone; a failed write here never
/// changes it.
pub fn report<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    opts: &RunOptions,
    inv: &Invocation,
) -> io::Result<()> {
    if let Some(message) = failure_message(inv.outcome.status, opts) {
        return writeln!(err, "{}", message);
    }
    if opts.verbose {
        write_verbose_summary(out, &opts.input_path, inv)?;
    }
    if opts.show_stats {
        write_stats(out, &inv.outcome.stats)?;
    }
    out.flush()
}
