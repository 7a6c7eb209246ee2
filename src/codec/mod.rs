// src/codec/mod.rs

//! Streaming codec.
//!
//! Core API: [`StreamCodec::encode`] / [`StreamCodec::decode`] over a
//! [`Source`] and any [`Write`] sink. Memory use is one 4 KiB chunk buffer
//! regardless of stream size; chunks are processed strictly in order because
//! each one's IV is taken from the previous chunk's ciphertext.

pub(crate) mod config;
pub(crate) mod decoder;
pub(crate) mod encoder;
pub(crate) mod read;

pub use config::{CodecConfig, CodecConfigBuilder};

use crate::aliases::Iv16;
use crate::cipher_spec::{CipherAlgorithm, CipherSpec};
use crate::crypto::{ChunkCipher, SecureRandomExt};
use crate::error::FileVaultError;
use crate::source::Source;
use std::fmt;
use std::io::Write;

/// Chunked AES-CBC encoder/decoder bound to one key.
///
/// # Thread Safety
///
/// Holds only the keyed block cipher and its settings, so one codec can serve
/// many concurrent calls on different streams.
pub struct StreamCodec {
    cipher: ChunkCipher,
    algorithm: CipherAlgorithm,
    config: CodecConfig,
}

impl StreamCodec {
    /// Codec with the default [`CodecConfig`].
    pub fn new(spec: &CipherSpec) -> Result<Self, FileVaultError> {
        Self::with_config(spec, CodecConfig::default())
    }

    pub fn with_config(spec: &CipherSpec, config: CodecConfig) -> Result<Self, FileVaultError> {
        Ok(Self {
            cipher: ChunkCipher::new(spec)?,
            algorithm: spec.algorithm(),
            config,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> CipherAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encrypt `source` into `sink` under a fresh random IV.
    ///
    /// # Errors
    ///
    /// [`FileVaultError::Io`] on read/write failure and
    /// [`FileVaultError::StalledSource`] when the source keeps under-delivering.
    /// On error the sink holds a partial frame that must be discarded.
    ///
    /// # Example
    ///
    /// ```
    /// use filevault_rs::{CipherAlgorithm, CipherSpec, StreamCodec, StreamSource};
    /// use std::io::Cursor;
    ///
    /// let spec = CipherSpec::new([0x11u8; 32], CipherAlgorithm::Aes256Cbc)?;
    /// let codec = StreamCodec::new(&spec)?;
    ///
    /// let mut framed = Vec::new();
    /// codec.encode(StreamSource::new(Cursor::new(b"attack at dawn"))?, &mut framed)?;
    /// assert_eq!(framed.len(), 16 + 16);
    ///
    /// let mut plain = Vec::new();
    /// codec.decode(StreamSource::new(Cursor::new(framed))?, &mut plain)?;
    /// assert_eq!(plain, b"attack at dawn");
    /// # Ok::<(), filevault_rs::FileVaultError>(())
    /// ```
    pub fn encode<S, W>(&self, source: S, sink: W) -> Result<(), FileVaultError>
    where
        S: Source,
        W: Write,
    {
        let iv = Iv16::random()?;
        self.encode_with_iv(source, sink, &iv)
    }

    /// Encrypt with a caller-chosen IV.
    ///
    /// Produces byte-identical output for identical inputs, which is what
    /// fixtures and fuzzing need. Never reuse an IV for real data.
    pub fn encode_with_iv<S, W>(
        &self,
        mut source: S,
        mut sink: W,
        iv: &Iv16,
    ) -> Result<(), FileVaultError>
    where
        S: Source,
        W: Write,
    {
        encoder::encode_stream(&self.cipher, &self.config, &mut source, &mut sink, iv).map(|_| ())
    }

    /// Decrypt a frame produced by [`StreamCodec::encode`].
    ///
    /// # Errors
    ///
    /// - [`FileVaultError::TruncatedHeader`] if the source is shorter than the IV
    /// - [`FileVaultError::DecryptionFailed`] on malformed padding or a body
    ///   that is not a whole number of blocks (wrong key, corrupted data)
    /// - [`FileVaultError::StalledSource`] / [`FileVaultError::Io`] as for encode
    pub fn decode<S, W>(&self, mut source: S, mut sink: W) -> Result<(), FileVaultError>
    where
        S: Source,
        W: Write,
    {
        decoder::decode_stream(&self.cipher, &self.config, &mut source, &mut sink).map(|_| ())
    }
}

impl fmt::Debug for StreamCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamCodec")
            .field("algorithm", &self.algorithm)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// One-shot encode with default settings.
pub fn encode<S: Source, W: Write>(spec: &CipherSpec, source: S, sink: W) -> Result<(), FileVaultError> {
    StreamCodec::new(spec)?.encode(source, sink)
}

/// One-shot decode with default settings.
pub fn decode<S: Source, W: Write>(spec: &CipherSpec, source: S, sink: W) -> Result<(), FileVaultError> {
    StreamCodec::new(spec)?.decode(source, sink)
}
