//! src/codec/read.rs
//! Chunk reads with seek-back recovery for under-delivering sources.

use crate::error::FileVaultError;
use crate::source::Source;
use tracing::warn;

/// Where one chunk lives in the source and how much of it to expect.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChunkSpan {
    pub index: u64,
    pub offset: u64,
    pub len: usize,
}

/// Fill `buf[..span.len]` with the chunk at `span.offset`.
///
/// A read returning fewer bytes than the chunk holds is a short read, not an
/// error: the source is rewound to the chunk start and asked again. After
/// `max_short_reads` consecutive short reads the source is declared stalled.
pub(crate) fn read_chunk<S>(
    source: &mut S,
    buf: &mut [u8],
    span: ChunkSpan,
    max_short_reads: u32,
) -> Result<(), FileVaultError>
where
    S: Source + ?Sized,
{
    let mut attempts = 0u32;
    loop {
        let n = source.read(&mut buf[..span.len])?;
        if n == span.len {
            return Ok(());
        }

        attempts += 1;
        warn!(
            chunk = span.index,
            got = n,
            expected = span.len,
            attempt = attempts,
            "short read, re-requesting chunk"
        );
        if attempts >= max_short_reads {
            return Err(FileVaultError::StalledSource {
                chunk: span.index,
                attempts,
            });
        }
        source.seek(span.offset)?;
    }
}
