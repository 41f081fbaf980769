#![forbid(unsafe_code)]

//! Plaintext range descriptors and their block-aligned read windows.

use crate::{BLOCK_LEN, NONCE_LEN};

/// A byte range in plaintext coordinates.
///
/// Valid when `position + length` does not exceed the resource's plaintext
/// size; a full-resource range has `position == 0` and `length` equal to
/// the plaintext size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecryptionRange {
    /// Offset of the first requested plaintext byte.
    pub position: u64,
    /// Number of requested bytes.
    pub length: usize,
}

impl DecryptionRange {
    pub const fn new(position: u64, length: usize) -> Self {
        Self { position, length }
    }

    /// Exclusive end of the range, or `None` on overflow.
    pub(crate) fn end(&self) -> Option<u64> {
        self.position.checked_add(self.length as u64)
    }
}

/// Block-aligned ciphertext window covering a plaintext range.
///
/// `read_pos`/`read_len` are stream coordinates (nonce prefix included);
/// `skip` is the offset of the first requested byte inside the decrypted
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockWindow {
    pub read_pos: u64,
    pub read_len: usize,
    pub skip: usize,
}

impl BlockWindow {
    /// Smallest whole-block window covering `range`.
    ///
    /// The first (partial) block is counted only when the range starts
    /// inside a block; the remainder rounds up to whole blocks. An empty
    /// range maps to an empty window.
    pub(crate) fn covering(range: DecryptionRange) -> Self {
        let skip = (range.position % BLOCK_LEN as u64) as usize;
        let first_block_bytes = if skip == 0 { 0 } else { BLOCK_LEN - skip };

        let mut blocks = 0usize;
        if skip != 0 && range.length > 0 {
            blocks += 1;
        }
        if range.length > first_block_bytes {
            blocks += (range.length - first_block_bytes).div_ceil(BLOCK_LEN);
        }

        BlockWindow {
            read_pos: NONCE_LEN as u64 + (range.position - skip as u64),
            read_len: blocks * BLOCK_LEN,
            skip,
        }
    }

    /// Offset of the window's first byte inside the ciphertext (nonce
    /// excluded) — the keystream seek position.
    pub(crate) fn keystream_offset(&self) -> u64 {
        self.read_pos - NONCE_LEN as u64
    }
}
