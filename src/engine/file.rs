//! File-to-file compression.
//!
//! [`FileCompressor`] is the engine the `lzsa` binary ships with. One call:
//!
//! 1. loads the tail of the dictionary file, if any, as history;
//! 2. reads the whole input;
//! 3. reverses input and dictionary in backward mode;
//! 4. encodes the input in 64 KiB blocks, storing any block that does not
//!    shrink, and reports cumulative sizes after every block;
//! 5. reverses the finished stream in backward mode and writes it out.
//!
//! Raw mode skips all framing and requires the input to fit a single block.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};

use log::debug;

use crate::config::{
    BLOCK_SIZE, DEFAULT_MIN_MATCH_RATIO, DEFAULT_MIN_MATCH_SPEED, MAX_DICT_SIZE,
    MIN_MATCH_SIZE_MAX, MIN_MATCH_SIZE_MIN, RAW_BLOCK_LIMIT,
};
use crate::engine::encode::compress_block;
use crate::engine::frame::{write_block_header, write_frame_end, write_frame_header};
use crate::engine::matcher::MatchFinder;
use crate::engine::{
    CompressionOutcome, Engine, EngineError, EngineFlags, EngineRequest, StatusCode, TokenStats,
};

/// Hash-chain walk budget per position.
const RATIO_MAX_ATTEMPTS: usize = 256;
const SPEED_MAX_ATTEMPTS: usize = 16;

/// The bundled engine. Stateless; every call is an independent job.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCompressor;

impl FileCompressor {
    pub fn new() -> Self {
        FileCompressor
    }
}

impl Engine for FileCompressor {
    fn compress_file(
        &self,
        request: &EngineRequest<'_>,
        progress: &mut dyn FnMut(u64, u64),
    ) -> CompressionOutcome {
        let mut outcome = CompressionOutcome::default();
        match compress_into(request, progress, &mut outcome) {
            Ok(()) => outcome.status = StatusCode::Ok,
            Err(e) => {
                debug!("compression of '{}' failed: {}", request.input_path, e);
                outcome.status = e.status();
            }
        }
        outcome
    }
}

/// Running totals across blocks.
struct StreamState {
    out: Vec<u8>,
    original: u64,
    command_count: u32,
    stats: TokenStats,
    last_offset: usize,
    /// max(original produced − compressed consumed) over all boundaries.
    max_gain: i64,
}

impl StreamState {
    fn gain(&self) -> i64 {
        self.original as i64 - self.out.len() as i64
    }
}

fn compress_into(
    request: &EngineRequest<'_>,
    progress: &mut dyn FnMut(u64, u64),
    outcome: &mut CompressionOutcome,
) -> Result<(), EngineError> {
    let backward = request.flags.contains(EngineFlags::BACKWARD);
    let raw = request.flags.contains(EngineFlags::RAW_BLOCK);
    let favor_ratio = request.flags.contains(EngineFlags::FAVOR_RATIO);
    let min_match = effective_min_match(request.min_match_size, favor_ratio)?;

    let mut dictionary = match request.dictionary_path {
        Some(path) => load_dict_file(path).map_err(EngineError::DictionaryRead)?,
        None => Vec::new(),
    };
    let mut input = read_source(request.input_path)?;
    outcome.original_size = input.len() as u64;

    if backward {
        input.reverse();
        dictionary.reverse();
    }
    if raw && input.len() as u64 > RAW_BLOCK_LIMIT {
        return Err(EngineError::RawTooLarge(input.len() as u64));
    }

    let dict_len = dictionary.len();
    let mut window = dictionary;
    window
        .try_reserve_exact(input.len())
        .map_err(|_| EngineError::OutOfMemory(dict_len + input.len()))?;
    window.extend_from_slice(&input);
    drop(input);

    let max_attempts = if favor_ratio {
        RATIO_MAX_ATTEMPTS
    } else {
        SPEED_MAX_ATTEMPTS
    };
    let mut finder = MatchFinder::new(min_match, max_attempts)
        .ok_or(EngineError::OutOfMemory(std::mem::size_of::<u32>() * (1 << 16)))?;
    finder.insert(&window, dict_len);
    debug!(
        "compressing {} bytes (dictionary {} bytes, min match {}, {})",
        window.len() - dict_len,
        dict_len,
        min_match,
        if favor_ratio { "ratio" } else { "speed" }
    );

    let mut state = StreamState {
        out: Vec::new(),
        original: 0,
        command_count: 0,
        stats: TokenStats::default(),
        last_offset: 0,
        max_gain: 0,
    };

    if raw {
        let input_len = window.len() - dict_len;
        let block = compress_block(
            &window,
            dict_len,
            window.len(),
            &mut finder,
            favor_ratio,
            true,
            0,
        )
        .ok_or(EngineError::RawIncompressible(input_len))?;
        state.max_gain = state.max_gain.max(block.max_gain);
        state.out = block.bytes;
        state.original = input_len as u64;
        state.command_count = block.command_count;
        state.stats = block.stats;
        progress(state.original, state.out.len() as u64);
    } else {
        write_frame_header(&mut state.out);
        let mut start = dict_len;
        let mut blocks = 0usize;
        while start < window.len() {
            let end = (start + BLOCK_SIZE).min(window.len());
            append_block(&window, start, end, &mut finder, favor_ratio, &mut state);
            start = end;
            blocks += 1;
            progress(state.original, state.out.len() as u64);
        }
        write_frame_end(&mut state.out);
        debug!("wrote {} blocks", blocks);
    }

    let compressed = state.out.len() as u64;
    let tail = state.original as i64 - compressed as i64;
    outcome.compressed_size = compressed;
    outcome.command_count = state.command_count;
    outcome.stats = state.stats;
    outcome.safe_distance = (state.max_gain - tail).max(0) as u32;

    if backward {
        state.out.reverse();
    }
    fs::write(request.output_path, &state.out).map_err(EngineError::DestinationWrite)?;
    Ok(())
}

/// Encodes one framed block, falling back to a stored block when encoding
/// does not shrink it.
fn append_block(
    window: &[u8],
    start: usize,
    end: usize,
    finder: &mut MatchFinder,
    lazy: bool,
    state: &mut StreamState,
) {
    let len = end - start;
    let encoded = compress_block(window, start, end, finder, lazy, false, state.last_offset)
        .filter(|block| block.bytes.len() < len);

    match encoded {
        Some(block) => {
            write_block_header(&mut state.out, block.bytes.len(), false);
            let base = state.gain();
            state.max_gain = state.max_gain.max(base + block.max_gain);
            state.out.extend_from_slice(&block.bytes);
            state.command_count += block.command_count;
            state.stats.merge(&block.stats);
            state.last_offset = block.last_offset;
        }
        None => {
            write_block_header(&mut state.out, len, true);
            state.out.extend_from_slice(&window[start..end]);
        }
    }
    state.original += len as u64;
    state.max_gain = state.max_gain.max(state.gain());
}

/// The explicit minimum if one was given, else the policy default.
fn effective_min_match(requested: u32, favor_ratio: bool) -> Result<usize, EngineError> {
    match requested {
        0 if favor_ratio => Ok(DEFAULT_MIN_MATCH_RATIO),
        0 => Ok(DEFAULT_MIN_MATCH_SPEED),
        n if (MIN_MATCH_SIZE_MIN..=MIN_MATCH_SIZE_MAX).contains(&n) => Ok(n as usize),
        n => Err(EngineError::Compression(format!(
            "unsupported minimum match size {}",
            n
        ))),
    }
}

fn read_source(path: &str) -> Result<Vec<u8>, EngineError> {
    let mut file = File::open(path).map_err(EngineError::SourceRead)?;
    let size_hint = file
        .metadata()
        .map(|m| m.len() as usize)
        .map_err(EngineError::SourceRead)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(size_hint)
        .map_err(|_| EngineError::OutOfMemory(size_hint))?;
    file.read_to_end(&mut buf).map_err(EngineError::SourceRead)?;
    Ok(buf)
}

/// Reads at most [`MAX_DICT_SIZE`] bytes from the end of a file.
fn load_dict_file(path: &str) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    if len > MAX_DICT_SIZE as u64 {
        file.seek(SeekFrom::Start(len - MAX_DICT_SIZE as u64))?;
    }
    let mut dict = Vec::with_capacity(len.min(MAX_DICT_SIZE as u64) as usize);
    file.take(MAX_DICT_SIZE as u64).read_to_end(&mut dict)?;
    Ok(dict)
}
