//! Stream framing.
//!
//! ```text
//! frame  := header block* end
//! header := 7B 9E <format>
//! block  := <u24 LE size | STORED_BLOCK_FLAG?> <payload>
//! end    := 00 00 00
//! ```
//!
//! A stored block carries its bytes verbatim. Raw (frameless) streams have
//! no header, block headers or end mark; the last command ends with an
//! end-of-data marker instead.

pub const FRAME_MAGIC: [u8; 2] = [0x7B, 0x9E];
pub const FORMAT_VERSION: u8 = 0x00;
pub const FRAME_HEADER_SIZE: usize = 3;
pub const BLOCK_HEADER_SIZE: usize = 3;

/// Bit 23 of a block header: payload is stored uncompressed.
pub const STORED_BLOCK_FLAG: u32 = 0x80_0000;
/// Largest payload size a block header can carry.
pub const MAX_BLOCK_PAYLOAD: usize = (STORED_BLOCK_FLAG - 1) as usize;

pub fn write_frame_header(out: &mut Vec<u8>) {
    out.extend_from_slice(&FRAME_MAGIC);
    out.push(FORMAT_VERSION);
}

pub fn write_block_header(out: &mut Vec<u8>, payload_len: usize, stored: bool) {
    debug_assert!(payload_len > 0 && payload_len <= MAX_BLOCK_PAYLOAD);
    let mut word = payload_len as u32;
    if stored {
        word |= STORED_BLOCK_FLAG;
    }
    out.extend_from_slice(&word.to_le_bytes()[..BLOCK_HEADER_SIZE]);
}

pub fn write_frame_end(out: &mut Vec<u8>) {
    out.extend_from_slice(&[0, 0, 0]);
}

/// Decodes a block header into `(payload_len, stored)`. A zero length marks
/// the end of the frame.
pub fn read_block_header(bytes: [u8; BLOCK_HEADER_SIZE]) -> (usize, bool) {
    let word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]);
    ((word & !STORED_BLOCK_FLAG) as usize, word & STORED_BLOCK_FLAG != 0)
}
