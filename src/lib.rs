// src/lib.rs

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod cipher_spec;
pub mod codec;
pub mod consts;
pub(crate) mod crypto;
pub mod error;
pub mod source;
pub mod utils;
pub mod vault;

// High-level API
pub use cipher_spec::{CipherAlgorithm, CipherSpec};
pub use codec::{decode, encode, CodecConfig, CodecConfigBuilder, StreamCodec};
pub use error::FileVaultError;
pub use source::{Source, StreamSource};
pub use vault::FileVault;

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decode_batch, encode_batch};
