// src/crypto/rng.rs
//! OS-backed randomness for fixed-size values (IVs).

use crate::error::FileVaultError;
use rand::{rngs::OsRng, TryRngCore};
use std::io;

/// Extension trait giving `.random()` to fixed-size byte arrays.
pub trait SecureRandomExt: Sized {
    /// Fill a fresh value from the operating system RNG.
    fn random() -> Result<Self, FileVaultError>;
}

impl<const N: usize> SecureRandomExt for [u8; N] {
    #[inline]
    fn random() -> Result<Self, FileVaultError> {
        let mut bytes = [0u8; N];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| io::Error::other(format!("OS RNG unavailable: {e}")))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::Iv16;

    #[test]
    fn consecutive_ivs_differ() {
        let a = Iv16::random().unwrap();
        let b = Iv16::random().unwrap();
        assert_ne!(a, b);
    }
}
