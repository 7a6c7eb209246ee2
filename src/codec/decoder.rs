//! src/codec/decoder.rs
//! Framed ciphertext → plaintext stream. Exact inverse of `encode`.

use crate::aliases::{ChunkBuffer, Iv16};
use crate::codec::config::CodecConfig;
use crate::codec::read::{read_chunk, ChunkSpan};
use crate::consts::{CIPHER_CHUNK, IV_LEN};
use crate::crypto::ChunkCipher;
use crate::error::FileVaultError;
use crate::source::Source;
use crate::utils::chunk_count;
use std::io::Write;
use tracing::{debug, trace};
use zeroize::Zeroizing;

pub(crate) fn decode_stream<S, W>(
    cipher: &ChunkCipher,
    config: &CodecConfig,
    source: &mut S,
    sink: &mut W,
) -> Result<u64, FileVaultError>
where
    S: Source + ?Sized,
    W: Write + ?Sized,
{
    let len = source.length();
    if len < IV_LEN as u64 {
        return Err(FileVaultError::TruncatedHeader { len });
    }

    let body = len - IV_LEN as u64;
    let total_chunks = chunk_count(body, CIPHER_CHUNK);
    debug!(len, total_chunks, "decoding stream");

    // A header with nothing after it cannot have come from the encoder.
    if total_chunks == 0 {
        return Err(FileVaultError::DecryptionFailed { chunk: 0 });
    }

    source.seek(0)?;
    let mut iv: Iv16 = [0u8; IV_LEN];
    let header = ChunkSpan {
        index: 0,
        offset: 0,
        len: IV_LEN,
    };
    read_chunk(source, &mut iv, header, config.max_short_reads())?;

    let mut next_iv: Iv16 = [0u8; IV_LEN];
    let mut buf: Zeroizing<ChunkBuffer> = Zeroizing::new([0u8; CIPHER_CHUNK]);
    let mut written = 0u64;

    for index in 0..total_chunks {
        let offset = IV_LEN as u64 + index * CIPHER_CHUNK as u64;
        let span = ChunkSpan {
            index,
            offset,
            len: (len - offset).min(CIPHER_CHUNK as u64) as usize,
        };
        read_chunk(source, &mut buf[..], span, config.max_short_reads())?;

        // Chain on ciphertext, so capture it before decrypting in place.
        next_iv.copy_from_slice(&buf[..IV_LEN]);
        let pt_len = cipher
            .decrypt_chunk(&iv, &mut buf[..span.len])
            .ok_or(FileVaultError::DecryptionFailed { chunk: index })?;
        iv = next_iv;

        sink.write_all(&buf[..pt_len])?;
        written += pt_len as u64;
        trace!(chunk = index, cipher = span.len, plain = pt_len, "decoded chunk");
    }

    sink.flush()?;
    debug!(written, "decoding finished");
    Ok(written)
}
