//! tests/common.rs
//! Shared fixtures for the integration tests.

#![allow(dead_code)] // Each test binary uses a different subset

use filevault_rs::consts::{CIPHER_CHUNK, IV_LEN, PLAIN_CHUNK};
use filevault_rs::{CipherAlgorithm, CipherSpec, FileVaultError, StreamCodec, StreamSource};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::io::Cursor;

pub const KEY_128: [u8; 16] = *b"0123456789abcdef";
pub const KEY_256: [u8; 32] = *b"0123456789abcdef0123456789abcdef";
pub const FIXED_IV: [u8; 16] = [0x24; 16];

/// Lengths around every block and chunk boundary that matters.
pub const EDGE_LENGTHS: &[usize] = &[
    0,
    1,
    15,
    16,
    17,
    PLAIN_CHUNK - 1,
    PLAIN_CHUNK,
    PLAIN_CHUNK + 1,
    2 * PLAIN_CHUNK,
    2 * PLAIN_CHUNK + 16,
    10_000,
];

pub fn spec(algorithm: CipherAlgorithm) -> CipherSpec {
    match algorithm {
        CipherAlgorithm::Aes128Cbc => CipherSpec::new(KEY_128, algorithm).unwrap(),
        CipherAlgorithm::Aes256Cbc => CipherSpec::new(KEY_256, algorithm).unwrap(),
    }
}

pub fn codec(algorithm: CipherAlgorithm) -> StreamCodec {
    StreamCodec::new(&spec(algorithm)).unwrap()
}

pub fn source(bytes: &[u8]) -> StreamSource<Cursor<Vec<u8>>> {
    StreamSource::new(Cursor::new(bytes.to_vec())).unwrap()
}

/// Deterministic pseudo-random bytes.
pub fn pseudo_random(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0u8; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    data
}

pub fn encode_bytes(codec: &StreamCodec, plain: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    codec.encode(source(plain), &mut out).unwrap();
    out
}

pub fn encode_fixed(codec: &StreamCodec, plain: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    codec.encode_with_iv(source(plain), &mut out, &FIXED_IV).unwrap();
    out
}

pub fn decode_bytes(codec: &StreamCodec, framed: &[u8]) -> Result<Vec<u8>, FileVaultError> {
    let mut out = Vec::new();
    codec.decode(source(framed), &mut out)?;
    Ok(out)
}

/// Frame length the encoder must produce for `len` plaintext bytes.
pub fn framed_len(len: usize) -> usize {
    if len == 0 {
        return IV_LEN + 16;
    }
    let full = len / PLAIN_CHUNK;
    let rest = len % PLAIN_CHUNK;
    let tail = if rest == 0 { 0 } else { (rest / 16 + 1) * 16 };
    IV_LEN + full * CIPHER_CHUNK + tail
}
