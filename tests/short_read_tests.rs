//! tests/short_read_tests.rs
//! Sources that under-deliver, stall, or lie about their length.

mod common;
use common::*;

use filevault_rs::consts::{CIPHER_CHUNK, PLAIN_CHUNK};
use filevault_rs::{CipherAlgorithm, CodecConfig, FileVaultError, Source, StreamCodec};
use std::collections::HashSet;
use std::io;

/// Serves every request in two pieces: the first read at any offset returns
/// a prefix, and the read after the codec seeks back returns the full chunk.
struct FlakySource {
    data: Vec<u8>,
    pos: usize,
    served_short: HashSet<usize>,
    seeks: usize,
}

impl FlakySource {
    fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            served_short: HashSet::new(),
            seeks: 0,
        }
    }
}

impl Source for FlakySource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.data.len() - self.pos;
        let mut n = buf.len().min(available);
        if n > 1 && self.served_short.insert(self.pos) {
            // Arbitrary split point that depends on the offset.
            n = 1 + (self.pos * 7 + 13) % (n - 1);
        }
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.seeks += 1;
        self.pos = offset as usize;
        Ok(())
    }

    fn length(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Claims `len` bytes but never returns any.
struct StuckSource {
    len: u64,
    reads: u32,
}

impl Source for StuckSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        Ok(0)
    }

    fn seek(&mut self, _offset: u64) -> io::Result<()> {
        Ok(())
    }

    fn length(&self) -> u64 {
        self.len
    }
}

/// Fails every read with a hard I/O error.
struct BrokenSource;

impl Source for BrokenSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "backend went away"))
    }

    fn seek(&mut self, _offset: u64) -> io::Result<()> {
        Ok(())
    }

    fn length(&self) -> u64 {
        4096
    }
}

#[test]
fn flaky_encode_matches_clean_encode() {
    let codec = codec(CipherAlgorithm::Aes256Cbc);
    for &len in EDGE_LENGTHS {
        let plain = pseudo_random(len, 21);
        let clean = encode_fixed(&codec, &plain);

        let mut flaky_src = FlakySource::new(plain.clone());
        let mut flaky = Vec::new();
        codec
            .encode_with_iv(&mut flaky_src, &mut flaky, &FIXED_IV)
            .unwrap();

        assert_eq!(flaky, clean, "len {len}");
        if len > 1 {
            assert!(flaky_src.seeks > 1, "len {len}: no retry happened");
        }
    }
}

#[test]
fn flaky_decode_matches_clean_decode() {
    let codec = codec(CipherAlgorithm::Aes128Cbc);
    let plain = pseudo_random(5 * PLAIN_CHUNK + 333, 22);
    let framed = encode_bytes(&codec, &plain);

    let mut decoded = Vec::new();
    codec
        .decode(FlakySource::new(framed), &mut decoded)
        .unwrap();
    assert_eq!(decoded, plain);
}

#[test]
fn stuck_source_stalls_instead_of_spinning() {
    let config = CodecConfig::builder().with_max_short_reads(5).build();
    let codec = StreamCodec::with_config(&spec(CipherAlgorithm::Aes128Cbc), config).unwrap();

    let mut src = StuckSource { len: 10_000, reads: 0 };
    let err = codec.encode(&mut src, &mut Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        FileVaultError::StalledSource {
            chunk: 0,
            attempts: 5
        }
    ));
    assert_eq!(src.reads, 5);
}

#[test]
fn overstated_length_stalls_on_last_chunk() {
    let codec = codec(CipherAlgorithm::Aes256Cbc);
    let framed = encode_bytes(&codec, &pseudo_random(2 * PLAIN_CHUNK + 100, 23));

    // Backend metadata promises more bytes than the object holds.
    let src = filevault_rs::StreamSource::with_length(
        io::Cursor::new(framed.clone()),
        framed.len() as u64 + 16,
    );
    let err = codec.decode(src, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, FileVaultError::StalledSource { chunk: 2, .. }));
    assert!(framed.len() > 2 * CIPHER_CHUNK);
}

#[test]
fn hard_errors_are_not_retried() {
    let codec = codec(CipherAlgorithm::Aes256Cbc);
    let err = codec.encode(BrokenSource, &mut Vec::new()).unwrap_err();
    match err {
        FileVaultError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn sink_errors_surface() {
    struct FullDisk;
    impl io::Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::WriteZero, "no space left"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let codec = codec(CipherAlgorithm::Aes128Cbc);
    let err = codec.encode(source(b"data"), FullDisk).unwrap_err();
    assert!(matches!(err, FileVaultError::Io(_)));
}
