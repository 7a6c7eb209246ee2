//! src/codec/config.rs
//! Codec tuning knobs and their builder.

use crate::consts::DEFAULT_MAX_SHORT_READS;

/// Runtime settings for [`StreamCodec`](crate::StreamCodec).
///
/// # Thread Safety
///
/// Plain `Copy` data; share freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    max_short_reads: u32,
}

impl CodecConfig {
    #[must_use]
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::new()
    }

    /// Consecutive short reads on one chunk that make the codec give up with
    /// [`FileVaultError::StalledSource`](crate::FileVaultError::StalledSource).
    #[must_use]
    pub const fn max_short_reads(&self) -> u32 {
        self.max_short_reads
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_short_reads: DEFAULT_MAX_SHORT_READS,
        }
    }
}

/// Builder for [`CodecConfig`].
///
/// Defaults: [`DEFAULT_MAX_SHORT_READS`] short reads per chunk.
#[derive(Debug, Clone)]
pub struct CodecConfigBuilder {
    max_short_reads: u32,
}

impl CodecConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_short_reads: DEFAULT_MAX_SHORT_READS,
        }
    }

    /// Set the short-read bound (minimum 1)
    #[must_use]
    pub fn with_max_short_reads(mut self, attempts: u32) -> Self {
        self.max_short_reads = attempts.max(1);
        self
    }

    #[must_use]
    pub fn build(self) -> CodecConfig {
        CodecConfig {
            max_short_reads: self.max_short_reads,
        }
    }
}

impl Default for CodecConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
