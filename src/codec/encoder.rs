//! src/codec/encoder.rs
//! Plaintext stream → framed ciphertext.
//!
//! Frame layout: `[IV (16)][chunk 0][chunk 1]...`, where each chunk is an
//! independently padded AES-CBC encryption of up to 4080 plaintext bytes and
//! the IV for chunk `i + 1` is the first ciphertext block of chunk `i`.

use crate::aliases::{ChunkBuffer, Iv16};
use crate::codec::config::CodecConfig;
use crate::codec::read::{read_chunk, ChunkSpan};
use crate::consts::{CIPHER_CHUNK, IV_LEN, PLAIN_CHUNK};
use crate::crypto::ChunkCipher;
use crate::error::FileVaultError;
use crate::source::Source;
use crate::utils::chunk_count;
use std::io::Write;
use tracing::{debug, trace};
use zeroize::Zeroizing;

pub(crate) fn encode_stream<S, W>(
    cipher: &ChunkCipher,
    config: &CodecConfig,
    source: &mut S,
    sink: &mut W,
    initial_iv: &Iv16,
) -> Result<u64, FileVaultError>
where
    S: Source + ?Sized,
    W: Write + ?Sized,
{
    let len = source.length();
    // An empty stream still yields one chunk: a lone padding block.
    let total_chunks = chunk_count(len, PLAIN_CHUNK).max(1);
    debug!(len, total_chunks, "encoding stream");

    source.seek(0)?;
    sink.write_all(initial_iv)?;
    let mut written = IV_LEN as u64;

    let mut iv: Iv16 = *initial_iv;
    let mut buf: Zeroizing<ChunkBuffer> = Zeroizing::new([0u8; CIPHER_CHUNK]);

    for index in 0..total_chunks {
        let offset = index * PLAIN_CHUNK as u64;
        let span = ChunkSpan {
            index,
            offset,
            len: (len - offset).min(PLAIN_CHUNK as u64) as usize,
        };
        read_chunk(source, &mut buf[..], span, config.max_short_reads())?;

        let ct_len = cipher.encrypt_chunk(&iv, &mut buf[..], span.len);
        iv.copy_from_slice(&buf[..IV_LEN]);
        sink.write_all(&buf[..ct_len])?;

        written += ct_len as u64;
        trace!(chunk = index, plain = span.len, cipher = ct_len, "encoded chunk");
    }

    sink.flush()?;
    debug!(written, "encoding finished");
    Ok(written)
}
