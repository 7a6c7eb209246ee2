//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All operations return [`Result<T, FileVaultError>`](FileVaultError).

use std::path::PathBuf;
use thiserror::Error;

/// The error type for all file vault operations.
///
/// Every variant is fatal for the call that produced it. A failed encode or
/// decode leaves the sink holding a partial prefix that must be discarded.
#[derive(Error, Debug)]
pub enum FileVaultError {
    /// I/O error while reading the source or writing the sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key length does not match the requested algorithm.
    ///
    /// Raised at construction time, before any I/O takes place.
    #[error(
        "unsupported cipher or key length: {algorithm} with a {key_len}-byte key \
         (only AES-128-CBC with 16-byte keys and AES-256-CBC with 32-byte keys are supported)"
    )]
    UnsupportedCipherOrKeyLength { algorithm: String, key_len: usize },

    /// A cipher identifier that is neither `AES-128-CBC` nor `AES-256-CBC`.
    #[error("unknown cipher: {0}")]
    UnknownCipher(String),

    /// A `base64:` key whose payload is not valid base64.
    #[error("invalid base64 key: {0}")]
    InvalidKeyEncoding(#[from] base64::DecodeError),

    /// The source file could not be opened for reading.
    #[error("cannot open {} for reading: {source}", .path.display())]
    SourceOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination file could not be opened for writing.
    #[error("cannot open {} for writing: {source}", .path.display())]
    SinkOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoded stream is shorter than its 16-byte IV header.
    #[error("truncated header: stream holds {len} bytes, IV needs 16")]
    TruncatedHeader { len: u64 },

    /// A ciphertext chunk did not decrypt to validly padded plaintext.
    ///
    /// Usually a wrong key or corrupted ciphertext. Never retried.
    #[error("decryption failed at chunk {chunk}")]
    DecryptionFailed { chunk: u64 },

    /// The source kept returning short reads for the same chunk.
    #[error("source stalled at chunk {chunk} after {attempts} consecutive short reads")]
    StalledSource { chunk: u64, attempts: u32 },
}
