//! Parallel encode/decode of many independent streams (feature `batch-ops`).
//!
//! Each pair runs the ordinary sequential codec; parallelism is only across
//! streams, never within one. The first error aborts the batch.

#[cfg(feature = "batch-ops")]
use rayon::prelude::*;
#[cfg(feature = "batch-ops")]
use std::io::Write;

#[cfg(feature = "batch-ops")]
use crate::{FileVaultError, Source, StreamCodec};

#[cfg(feature = "batch-ops")]
pub fn encode_batch<S, W>(codec: &StreamCodec, batch: &mut [(S, W)]) -> Result<(), FileVaultError>
where
    S: Source + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| codec.encode(src, dst))
}

#[cfg(feature = "batch-ops")]
pub fn decode_batch<S, W>(codec: &StreamCodec, batch: &mut [(S, W)]) -> Result<(), FileVaultError>
where
    S: Source + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| codec.decode(src, dst))
}
