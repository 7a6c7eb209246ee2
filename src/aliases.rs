//! # Type Aliases
//!
//! Fixed-size buffers used by the codec, plus the zeroizing key container.
//!
//! - [`Block16`] - one AES block
//! - [`Iv16`] - running initialization vector
//! - [`ChunkBuffer`] - the single working buffer of an encode/decode call
//! - [`KeyBytes`] - raw key material, wiped on drop

use crate::consts::{BLOCK_SIZE, CIPHER_CHUNK, IV_LEN};
use zeroize::Zeroizing;

pub type Block16 = [u8; BLOCK_SIZE];

pub type Iv16 = [u8; IV_LEN];

// Sized for the larger (ciphertext) chunk; encoding pads in place.
pub type ChunkBuffer = [u8; CIPHER_CHUNK];

pub type KeyBytes = Zeroizing<Vec<u8>>;
