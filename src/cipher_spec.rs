//! # Cipher Specification
//!
//! A validated (key, algorithm) pair. Construction is the only place key
//! lengths are checked; everything downstream can rely on the invariant.

use crate::aliases::KeyBytes;
use crate::consts::{BASE64_KEY_PREFIX, BLOCK_SIZE};
use crate::error::FileVaultError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Supported block cipher modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CipherAlgorithm {
    /// AES with a 128-bit key in CBC mode.
    Aes128Cbc,
    /// AES with a 256-bit key in CBC mode.
    #[default]
    Aes256Cbc,
}

impl CipherAlgorithm {
    /// Key length in bytes required by this algorithm.
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128Cbc => 16,
            Self::Aes256Cbc => 32,
        }
    }

    /// Block size in bytes (16 for both variants).
    #[must_use]
    pub const fn block_size(self) -> usize {
        BLOCK_SIZE
    }

    /// Configuration identifier, e.g. `"AES-256-CBC"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aes128Cbc => "AES-128-CBC",
            Self::Aes256Cbc => "AES-256-CBC",
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherAlgorithm {
    type Err = FileVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AES-128-CBC" => Ok(Self::Aes128Cbc),
            "AES-256-CBC" => Ok(Self::Aes256Cbc),
            _ => Err(FileVaultError::UnknownCipher(s.to_string())),
        }
    }
}

/// A key validated against its algorithm.
///
/// # Thread Safety
///
/// Immutable after construction, so it is `Send + Sync` and can back any
/// number of concurrent codec calls.
#[derive(Clone)]
pub struct CipherSpec {
    key: KeyBytes,
    algorithm: CipherAlgorithm,
}

impl CipherSpec {
    /// Validate `key` for `algorithm`.
    ///
    /// `key` is raw key material; presentation encodings must already be
    /// decoded (see [`CipherSpec::from_config`]).
    ///
    /// # Errors
    ///
    /// [`FileVaultError::UnsupportedCipherOrKeyLength`] if the key length does
    /// not match the algorithm.
    pub fn new(key: impl AsRef<[u8]>, algorithm: CipherAlgorithm) -> Result<Self, FileVaultError> {
        let key = key.as_ref();
        if key.len() != algorithm.key_len() {
            return Err(FileVaultError::UnsupportedCipherOrKeyLength {
                algorithm: algorithm.to_string(),
                key_len: key.len(),
            });
        }
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            algorithm,
        })
    }

    /// Build from configuration values.
    ///
    /// A key of the form `base64:<payload>` is decoded first; any other
    /// string is taken as raw bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use filevault_rs::{CipherAlgorithm, CipherSpec};
    ///
    /// let spec = CipherSpec::from_config(
    ///     "base64:AAECAwQFBgcICQoLDA0ODw==",
    ///     "AES-128-CBC",
    /// )?;
    /// assert_eq!(spec.algorithm(), CipherAlgorithm::Aes128Cbc);
    /// # Ok::<(), filevault_rs::FileVaultError>(())
    /// ```
    pub fn from_config(key: &str, cipher: &str) -> Result<Self, FileVaultError> {
        let algorithm: CipherAlgorithm = cipher.parse()?;
        let raw = match key.strip_prefix(BASE64_KEY_PREFIX) {
            Some(encoded) => Zeroizing::new(STANDARD.decode(encoded)?),
            None => Zeroizing::new(key.as_bytes().to_vec()),
        };
        Self::new(raw.as_slice(), algorithm)
    }

    #[must_use]
    pub fn algorithm(&self) -> CipherAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub fn key_len(&self) -> usize {
        self.algorithm.key_len()
    }

    #[must_use]
    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    pub(crate) fn key(&self) -> &[u8] {
        &self.key
    }
}

// Keys stay out of logs and panic messages.
impl fmt::Debug for CipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherSpec")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .finish()
    }
}
