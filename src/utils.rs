// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

use crate::consts::{DECRYPTED_SUFFIX, ENCRYPTED_SUFFIX};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// # Panics (by contract)
///
/// Panics if any slice is shorter than 16 bytes. Callers only pass whole
/// blocks carved out of a chunk buffer.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// `ceil(len / chunk)` on stream lengths.
#[inline]
pub const fn chunk_count(len: u64, chunk: usize) -> u64 {
    len.div_ceil(chunk as u64)
}

/// Default destination for an encrypted copy of `source`: `"{source}.enc"`.
pub fn encrypted_path(source: &Path) -> PathBuf {
    append_suffix(source, ENCRYPTED_SUFFIX)
}

/// Default destination for a decrypted copy of `source`.
///
/// Strips a trailing `.enc` when present, otherwise appends `.dec`.
pub fn decrypted_path(source: &Path) -> PathBuf {
    let raw = source.as_os_str().to_string_lossy();
    match raw.strip_suffix(ENCRYPTED_SUFFIX) {
        Some(stem) if !stem.is_empty() && !stem.ends_with(std::path::MAIN_SEPARATOR) => {
            PathBuf::from(stem)
        }
        _ => append_suffix(source, DECRYPTED_SUFFIX),
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
