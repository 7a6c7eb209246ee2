//! # Constants
//!
//! Chunk geometry and codec defaults shared by the encoder and decoder.

/// AES block size in bytes. Both supported algorithms use 128-bit blocks.
pub const BLOCK_SIZE: usize = 16;

/// Length of the IV stored at the start of every encoded stream.
pub const IV_LEN: usize = 16;

/// Number of cipher blocks read from the plaintext for each chunk.
///
/// 255 blocks of plaintext encrypt to 256 blocks once PKCS#7 adds its padding
/// block, which makes every full ciphertext chunk exactly 4 KiB.
pub const FILE_ENCRYPTION_BLOCKS: usize = 255;

/// Plaintext bytes consumed per chunk while encoding (4080).
pub const PLAIN_CHUNK: usize = BLOCK_SIZE * FILE_ENCRYPTION_BLOCKS;

/// Ciphertext bytes consumed per chunk while decoding (4096).
pub const CIPHER_CHUNK: usize = BLOCK_SIZE * (FILE_ENCRYPTION_BLOCKS + 1);

/// Default number of consecutive short reads tolerated on one chunk before the
/// source is declared stalled.
pub const DEFAULT_MAX_SHORT_READS: u32 = 16;

/// Suffix appended to encrypted files when no destination is given.
pub const ENCRYPTED_SUFFIX: &str = ".enc";

/// Suffix appended to decrypted files whose name does not end in [`ENCRYPTED_SUFFIX`].
pub const DECRYPTED_SUFFIX: &str = ".dec";

/// Prefix marking a base64-encoded key in configuration values.
pub const BASE64_KEY_PREFIX: &str = "base64:";
