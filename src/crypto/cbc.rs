//! src/crypto/cbc.rs
//! AES-CBC with PKCS#7 over one in-memory chunk.
//!
//! Every chunk of the stream is an independent padded CBC message; the caller
//! chains chunks by choosing the IV. Both directions work in place on the
//! codec's single chunk buffer.

use crate::aliases::{Block16, Iv16};
use crate::cipher_spec::{CipherAlgorithm, CipherSpec};
use crate::consts::BLOCK_SIZE;
use crate::error::FileVaultError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes256, Block as AesBlock};
use subtle::ConstantTimeEq;

/// Keyed AES block cipher for one of the supported algorithms.
pub enum ChunkCipher {
    Aes128(Aes128),
    Aes256(Aes256),
}

impl ChunkCipher {
    /// Key the block cipher from a validated spec.
    pub fn new(spec: &CipherSpec) -> Result<Self, FileVaultError> {
        let algorithm = spec.algorithm();
        let keyed = match algorithm {
            CipherAlgorithm::Aes128Cbc => Aes128::new_from_slice(spec.key()).map(Self::Aes128),
            CipherAlgorithm::Aes256Cbc => Aes256::new_from_slice(spec.key()).map(Self::Aes256),
        };
        keyed.map_err(|_| FileVaultError::UnsupportedCipherOrKeyLength {
            algorithm: algorithm.to_string(),
            key_len: spec.key().len(),
        })
    }

    #[inline(always)]
    fn encrypt_block(&self, block: &mut AesBlock) {
        match self {
            Self::Aes128(c) => c.encrypt_block(block),
            Self::Aes256(c) => c.encrypt_block(block),
        }
    }

    #[inline(always)]
    fn decrypt_block(&self, block: &mut AesBlock) {
        match self {
            Self::Aes128(c) => c.decrypt_block(block),
            Self::Aes256(c) => c.decrypt_block(block),
        }
    }

    /// PKCS#7-pad `buf[..len]` in place and CBC-encrypt it under `iv`.
    ///
    /// Returns the ciphertext length, always `len` rounded up to the next
    /// block boundary (a full padding block when `len` is already aligned).
    ///
    /// `buf` must have room for the padding (`len + 16 - len % 16` bytes);
    /// the codec's chunk buffer always does.
    pub(crate) fn encrypt_chunk(&self, iv: &Iv16, buf: &mut [u8], len: usize) -> usize {
        let pad = BLOCK_SIZE - len % BLOCK_SIZE;
        let total = len + pad;
        buf[len..total].fill(pad as u8);

        let mut prev: Block16 = *iv;
        let mut mixed: Block16 = [0u8; BLOCK_SIZE];
        for block in buf[..total].chunks_exact_mut(BLOCK_SIZE) {
            xor_blocks(block, &prev, &mut mixed);
            let mut aes_block = AesBlock::from(mixed);
            self.encrypt_block(&mut aes_block);
            block.copy_from_slice(aes_block.as_slice());
            prev.copy_from_slice(block);
        }
        total
    }

    /// CBC-decrypt `buf` in place under `iv` and strip PKCS#7 padding.
    ///
    /// Returns the plaintext length, or `None` if `buf` is not a non-empty
    /// whole number of blocks or the padding is malformed.
    pub(crate) fn decrypt_chunk(&self, iv: &Iv16, buf: &mut [u8]) -> Option<usize> {
        if buf.is_empty() || buf.len() % BLOCK_SIZE != 0 {
            return None;
        }

        let mut prev: Block16 = *iv;
        let mut ciphertext: Block16 = [0u8; BLOCK_SIZE];
        for block in buf.chunks_exact_mut(BLOCK_SIZE) {
            ciphertext.copy_from_slice(block);
            let mut aes_block = AesBlock::from(ciphertext);
            self.decrypt_block(&mut aes_block);
            xor_blocks(aes_block.as_slice(), &prev, block);
            prev = ciphertext;
        }

        strip_pkcs7(buf)
    }
}

/// Validate PKCS#7 padding on a decrypted chunk, returning the unpadded length.
fn strip_pkcs7(plaintext: &[u8]) -> Option<usize> {
    let last = &plaintext[plaintext.len() - BLOCK_SIZE..];
    let padding = last[BLOCK_SIZE - 1];

    // The range check leaks nothing the length of the output would not.
    if padding == 0 || padding as usize > BLOCK_SIZE {
        return None;
    }

    let start = BLOCK_SIZE - padding as usize;
    let expected = [padding; BLOCK_SIZE];
    if !bool::from(last[start..].ct_eq(&expected[start..])) {
        return None;
    }

    Some(plaintext.len() - padding as usize)
}
