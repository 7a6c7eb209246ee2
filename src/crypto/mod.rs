// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! Block-level AES-CBC with PKCS#7 over a single chunk, and the OS-backed IV
//! source. No I/O happens here.

pub mod cbc;
pub mod rng;

pub use cbc::ChunkCipher;
pub use rng::SecureRandomExt;
