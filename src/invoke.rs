// invoke.rs - turn resolved options into one engine call.
//
// The invoker owns the only two clock reads of a run, and only makes them
// when verbose output was asked for.

use log::debug;

use crate::cli::args::RunOptions;
use crate::engine::{CompressionOutcome, Engine, EngineFlags, EngineRequest};
use crate::timefn::{span_us, Micros, TimeSource};

/// Result of [`invoke`]: the engine's outcome plus the wall time spent in the
/// engine call, measured only in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub outcome: CompressionOutcome,
    pub elapsed_us: Option<Micros>,
}

/// Engine flag set for `opts`.
pub fn engine_flags(opts: &RunOptions) -> EngineFlags {
    let mut flags = EngineFlags::NONE;
    if opts.favor_ratio {
        flags |= EngineFlags::FAVOR_RATIO;
    }
    if opts.backward {
        flags |= EngineFlags::BACKWARD;
    }
    flags
}

/// Engine minimum-match argument: 0 lets the engine choose.
pub fn engine_min_match(opts: &RunOptions) -> u32 {
    opts.min_match_size.unwrap_or(0)
}

/// Runs the engine once for `opts`. `progress` is forwarded to the engine
/// unchanged.
pub fn invoke<E, C>(
    engine: &E,
    clock: &C,
    opts: &RunOptions,
    progress: &mut dyn FnMut(u64, u64),
) -> Invocation
where
    E: Engine + ?Sized,
    C: TimeSource + ?Sized,
{
    let request = EngineRequest {
        input_path: &opts.input_path,
        output_path: &opts.output_path,
        dictionary_path: opts.dictionary_path.as_deref(),
        flags: engine_flags(opts),
        min_match_size: engine_min_match(opts),
    };
    debug!(
        "invoking engine: '{}' -> '{}', dictionary {:?}, flags {:#x}, min match {}",
        request.input_path,
        request.output_path,
        request.dictionary_path,
        request.flags.bits(),
        request.min_match_size
    );

    let start = opts.verbose.then(|| clock.now_us());
    let outcome = engine.compress_file(&request, progress);
    let elapsed_us = start.map(|start| span_us(start, clock.now_us()));

    debug!("engine returned {:?}", outcome.status);
    Invocation {
        outcome,
        elapsed_us,
    }
}
