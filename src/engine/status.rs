//! Engine status codes.
//!
//! The engine reports exactly one [`StatusCode`] per invocation. The numeric
//! values are the engine's wire values; anything outside the known set is kept
//! verbatim in [`StatusCode::UnknownError`] so a newer engine can still be
//! reported on.

/// Outcome of one engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusCode {
    #[default]
    Ok,
    /// The input file could not be read.
    SourceReadError,
    /// The output file could not be written.
    DestinationWriteError,
    /// The dictionary file could not be read.
    DictionaryReadError,
    /// Working memory could not be allocated.
    OutOfMemory,
    /// Unspecified internal engine failure.
    InternalCompressionError,
    /// Raw block mode was asked to handle more than 64 KiB of input.
    RawBlockTooLarge,
    /// Incompressible data was destined for a raw block.
    RawBlockIncompressibleTooLarge,
    /// A status value outside the known set.
    UnknownError(i32),
}

impl StatusCode {
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 => StatusCode::Ok,
            1 => StatusCode::SourceReadError,
            2 => StatusCode::DestinationWriteError,
            3 => StatusCode::DictionaryReadError,
            4 => StatusCode::OutOfMemory,
            5 => StatusCode::InternalCompressionError,
            6 => StatusCode::RawBlockTooLarge,
            7 => StatusCode::RawBlockIncompressibleTooLarge,
            other => StatusCode::UnknownError(other),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::SourceReadError => 1,
            StatusCode::DestinationWriteError => 2,
            StatusCode::DictionaryReadError => 3,
            StatusCode::OutOfMemory => 4,
            StatusCode::InternalCompressionError => 5,
            StatusCode::RawBlockTooLarge => 6,
            StatusCode::RawBlockIncompressibleTooLarge => 7,
            StatusCode::UnknownError(code) => code,
        }
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }
}
