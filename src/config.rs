// config.rs - Compile-time configuration constants.
//
// Everything tunable about the driver and the bundled engine lives here, the
// same way the block-size and worker defaults of a build configuration header
// would. Nothing is read from the environment except `RUST_LOG`.

// Exit status for both usage errors and engine failures.
pub const EXIT_FAILURE: i32 = 100;

// Exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;

// Progress lines are only rendered once this many input bytes have been seen.
pub const PROGRESS_THRESHOLD: u64 = 1024 * 1024;

// Accepted range for `-m`.
pub const MIN_MATCH_SIZE_MIN: u32 = 2;
pub const MIN_MATCH_SIZE_MAX: u32 = 5;

// Minimum match used by `--prefer-speed`.
pub const PREFER_SPEED_MIN_MATCH: u32 = 3;

// Engine choice when no explicit minimum is given (engine minimum match = 0).
pub const DEFAULT_MIN_MATCH_RATIO: usize = 2;
pub const DEFAULT_MIN_MATCH_SPEED: usize = 3;

// Uncompressed bytes per block.
pub const BLOCK_SIZE: usize = 64 * 1024;

// Only the tail of a dictionary file is used as history.
pub const MAX_DICT_SIZE: usize = 64 * 1024;

// Farthest back a match may reach, in bytes.
pub const MAX_OFFSET: usize = 64 * 1024;

// Raw (frameless) output is limited to a single block.
pub const RAW_BLOCK_LIMIT: u64 = 64 * 1024;
