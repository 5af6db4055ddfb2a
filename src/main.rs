//! Binary entry point for the `lzsa` command-line compressor.
//!
//! # Control flow
//!
//! 1. [`parse_args`] resolves `argv` into [`RunOptions`]; any usage error
//!    prints the reason and the usage text to stderr and exits 100.
//! 2. [`run`] invokes the bundled engine once, rendering progress to stdout
//!    as it goes, then reports the outcome. The exit code depends on the
//!    engine status only; a report that cannot be written is logged.
//!
//! Developer diagnostics go through `log`; set `RUST_LOG=debug` to see the
//! resolved request and the I/O error behind a failed status.

use std::io;

use anyhow::Context;
use log::{debug, warn};

use lzsa::cli::arg_utils::last_name_from_path;
use lzsa::cli::args::{parse_args, RunOptions};
use lzsa::cli::constants::COMPRESSOR_NAME;
use lzsa::cli::help::print_usage;
use lzsa::config::EXIT_FAILURE;
use lzsa::engine::FileCompressor;
use lzsa::invoke::invoke;
use lzsa::report::{exit_code, progress_to, report};
use lzsa::timefn::Clock;

/// Compress once and report. Returns the process exit code.
fn run(opts: &RunOptions) -> i32 {
    let clock = Clock::new();
    let engine = FileCompressor::new();

    let invocation = {
        let mut progress = progress_to(io::stdout());
        invoke(&engine, &clock, opts, &mut progress)
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    if let Err(e) = report(&mut stdout.lock(), &mut stderr.lock(), opts, &invocation)
        .context("failed to write the compression report")
    {
        warn!("{:#}", e);
    }
    exit_code(invocation.outcome.status)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| COMPRESSOR_NAME.to_owned());

    let opts = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            lzsa::display!("{}: {}\n", COMPRESSOR_NAME, e);
            print_usage(last_name_from_path(&argv0));
            std::process::exit(EXIT_FAILURE);
        }
    };
    debug!("resolved options: {:?}", opts);

    std::process::exit(run(&opts));
}
