//! Block encoder.
//!
//! A block is a sequence of commands. Each command is a run of literals
//! followed by a match, except the last one of a block, which carries
//! literals only.
//!
//! ```text
//! token     := O LLL MMMM
//! command   := token [lit-ext] literal* offset-lo [offset-hi] [match-ext]
//! last      := token [lit-ext] literal*
//! ```
//!
//! - `LLL`: literal count 0..=6; 7 means a `lit-ext` byte follows. Values
//!   below [`LITERALS_U16_MARKER`] add 7; the marker is followed by the full
//!   count as a little-endian `u16`.
//! - `offset`: distance minus one, one byte when `O` is clear, two bytes
//!   (little-endian) when set.
//! - `MMMM`: match length minus [`MATCH_BASE`], 0..=14; 15 means a
//!   `match-ext` byte follows. Values below [`MATCH_U16_MARKER`] add 15; the
//!   marker is followed by the full length as a little-endian `u16`.
//!
//! Raw (frameless) streams end with an end-of-data command: `MMMM = 15`, a
//! zero offset byte, the `u16` marker and a length of 0.

use crate::engine::matcher::{Match, MatchFinder};
use crate::engine::stats::TokenStats;

pub const MATCH_BASE: usize = 2;
pub const LITERALS_RUN_LEN: usize = 7;
pub const MATCH_RUN_LEN: usize = 15;
pub const LITERALS_U16_MARKER: u8 = 250;
pub const MATCH_U16_MARKER: u8 = 239;
pub const MAX_LITERALS: usize = 0xFFFF;

/// Everything one encoded block contributes to the stream.
#[derive(Debug, Clone)]
pub struct EncodedBlock {
    pub bytes: Vec<u8>,
    pub command_count: u32,
    pub stats: TokenStats,
    /// Largest (original bytes produced − encoded bytes consumed) seen at any
    /// command boundary inside the block, never below zero.
    pub max_gain: i64,
    /// Offset of the last match, for repeat tracking in the next block.
    pub last_offset: usize,
}

/// Encodes `data[start..end]`, using everything before `start` as history.
///
/// `lazy` enables one-position-ahead lazy matching. `raw` terminates the
/// block with an end-of-data command. `prev_offset` is the offset of the
/// last match before this block.
///
/// Returns `None` when a literal run is too long to encode.
pub fn compress_block(
    data: &[u8],
    start: usize,
    end: usize,
    finder: &mut MatchFinder,
    lazy: bool,
    raw: bool,
    prev_offset: usize,
) -> Option<EncodedBlock> {
    let mut block = EncodedBlock {
        bytes: Vec::with_capacity(end - start + 16),
        command_count: 0,
        stats: TokenStats::default(),
        max_gain: 0,
        last_offset: prev_offset,
    };

    let mut anchor = start;
    let mut pos = start;
    while pos < end {
        let mut m = match finder.find(data, pos, end) {
            Some(m) => m,
            None => {
                pos += 1;
                continue;
            }
        };
        if lazy {
            while pos + 1 < end {
                match finder.find(data, pos + 1, end) {
                    Some(next) if next.len > m.len => {
                        pos += 1;
                        m = next;
                    }
                    _ => break,
                }
            }
        }

        write_command(&mut block, &data[anchor..pos], Some(m))?;
        pos += m.len;
        anchor = pos;
        block.max_gain = block
            .max_gain
            .max((pos - start) as i64 - block.bytes.len() as i64);
    }
    finder.insert(data, end);

    let token_pos = write_command(&mut block, &data[anchor..end], None)?;
    if raw {
        write_end_of_data(&mut block.bytes, token_pos);
    }
    Some(block)
}

/// Appends one command and returns the position of its token.
fn write_command(block: &mut EncodedBlock, literals: &[u8], m: Option<Match>) -> Option<usize> {
    let lit = literals.len();
    if lit > MAX_LITERALS {
        return None;
    }

    let (long_offset, match_code) = match m {
        Some(m) => (m.offset - 1 > 0xFF, (m.len - MATCH_BASE).min(MATCH_RUN_LEN)),
        None => (false, 0),
    };
    let token = (u8::from(long_offset) << 7)
        | ((lit.min(LITERALS_RUN_LEN) as u8) << 4)
        | match_code as u8;

    let out = &mut block.bytes;
    let token_pos = out.len();
    out.push(token);
    if lit >= LITERALS_RUN_LEN {
        let ext = lit - LITERALS_RUN_LEN;
        if ext < LITERALS_U16_MARKER as usize {
            out.push(ext as u8);
        } else {
            out.push(LITERALS_U16_MARKER);
            out.extend_from_slice(&(lit as u16).to_le_bytes());
        }
    }
    out.extend_from_slice(literals);
    block.command_count += 1;
    if lit > 0 {
        block.stats.literals.record(lit as u32);
    }

    if let Some(m) = m {
        let stored = (m.offset - 1) as u16;
        out.push(stored as u8);
        if long_offset {
            out.push((stored >> 8) as u8);
        }
        let code = m.len - MATCH_BASE;
        if code >= MATCH_RUN_LEN {
            let ext = code - MATCH_RUN_LEN;
            if ext < MATCH_U16_MARKER as usize {
                out.push(ext as u8);
            } else {
                out.push(MATCH_U16_MARKER);
                out.extend_from_slice(&(m.len as u16).to_le_bytes());
            }
        }

        let repeated = m.offset == block.last_offset;
        block.stats.matches.record(m.offset as u32, m.len as u32, repeated);
        match m.offset {
            1 => block.stats.rle1.record(m.len as u32),
            2 => block.stats.rle2.record(m.len as u32),
            _ => {}
        }
        block.last_offset = m.offset;
    }
    Some(token_pos)
}

/// Turns the literals-only command whose token sits at `token_pos` into an
/// end-of-data command.
fn write_end_of_data(out: &mut Vec<u8>, token_pos: usize) {
    out[token_pos] |= MATCH_RUN_LEN as u8;
    out.push(0);
    out.push(MATCH_U16_MARKER);
    out.extend_from_slice(&0u16.to_le_bytes());
}
