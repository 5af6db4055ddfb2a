//! The compression engine boundary.
//!
//! The driver knows the engine only through [`Engine::compress_file`]:
//! compress one file into another under a flag set and a minimum match size,
//! optionally seeded by a dictionary, reporting progress along the way and
//! a [`CompressionOutcome`] at the end.
//!
//! | Submodule  | Responsibility |
//! |------------|----------------|
//! | [`status`] | `StatusCode`, the closed set of outcomes. |
//! | [`stats`]  | `TokenStats`, per-category token statistics. |
//! | [`frame`]  | Stream and block headers. |
//! | [`matcher`]| Hash-chain match finder. |
//! | [`encode`] | Block encoder: commands, literals, offsets, lengths. |
//! | [`file`]   | `FileCompressor`, the bundled file-to-file engine. |

use std::io;
use std::ops::{BitOr, BitOrAssign};

use thiserror::Error;

pub mod encode;
pub mod file;
pub mod frame;
pub mod matcher;
pub mod stats;
pub mod status;

pub use file::FileCompressor;
pub use stats::{MatchStats, RunStats, TokenStats};
pub use status::StatusCode;

// ── Flags ─────────────────────────────────────────────────────────────────────

/// Engine flag set. Bits are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineFlags(u32);

impl EngineFlags {
    pub const NONE: EngineFlags = EngineFlags(0);
    /// Prefer smaller output over decompression speed.
    pub const FAVOR_RATIO: EngineFlags = EngineFlags(1 << 1);
    /// Produce a stream decompressed from the end of the buffer.
    pub const BACKWARD: EngineFlags = EngineFlags(1 << 2);
    /// Single frameless block with an end-of-data marker, input ≤ 64 KiB.
    pub const RAW_BLOCK: EngineFlags = EngineFlags(1 << 3);

    #[inline]
    pub fn contains(self, other: EngineFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for EngineFlags {
    type Output = EngineFlags;

    fn bitor(self, rhs: EngineFlags) -> EngineFlags {
        EngineFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for EngineFlags {
    fn bitor_assign(&mut self, rhs: EngineFlags) {
        self.0 |= rhs.0;
    }
}

// ── Request / outcome ─────────────────────────────────────────────────────────

/// Everything the engine needs for one job. Paths only; the engine opens
/// the files itself.
#[derive(Debug, Clone, Copy)]
pub struct EngineRequest<'a> {
    pub input_path: &'a str,
    pub output_path: &'a str,
    pub dictionary_path: Option<&'a str>,
    pub flags: EngineFlags,
    /// 0 lets the engine pick from `FAVOR_RATIO`; otherwise 2..=5.
    pub min_match_size: u32,
}

/// What one engine call produced. Sizes and counters are whatever was reached
/// before a failure; only `status` is meaningful when it is not `Ok`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionOutcome {
    pub status: StatusCode,
    pub original_size: u64,
    pub compressed_size: u64,
    pub command_count: u32,
    pub safe_distance: u32,
    pub stats: TokenStats,
}

/// A file-to-file compressor.
///
/// `progress` receives cumulative (original, compressed) byte counts. It is
/// called synchronously, zero or more times, and never after `compress_file`
/// returns.
pub trait Engine {
    fn compress_file(
        &self,
        request: &EngineRequest<'_>,
        progress: &mut dyn FnMut(u64, u64),
    ) -> CompressionOutcome;
}

// ── Internal errors ───────────────────────────────────────────────────────────

/// Failure inside the bundled engine, folded into a [`StatusCode`] at the
/// boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot read source: {0}")]
    SourceRead(#[source] io::Error),

    #[error("cannot write destination: {0}")]
    DestinationWrite(#[source] io::Error),

    #[error("cannot read dictionary: {0}")]
    DictionaryRead(#[source] io::Error),

    #[error("cannot allocate {0} bytes of working memory")]
    OutOfMemory(usize),

    #[error("{0}")]
    Compression(String),

    #[error("raw block input is {0} bytes, limit is 65536")]
    RawTooLarge(u64),

    #[error("raw block of {0} bytes does not compress")]
    RawIncompressible(usize),
}

impl EngineError {
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::SourceRead(_) => StatusCode::SourceReadError,
            EngineError::DestinationWrite(_) => StatusCode::DestinationWriteError,
            EngineError::DictionaryRead(_) => StatusCode::DictionaryReadError,
            EngineError::OutOfMemory(_) => StatusCode::OutOfMemory,
            EngineError::Compression(_) => StatusCode::InternalCompressionError,
            EngineError::RawTooLarge(_) => StatusCode::RawBlockTooLarge,
            EngineError::RawIncompressible(_) => StatusCode::RawBlockIncompressibleTooLarge,
        }
    }
}
