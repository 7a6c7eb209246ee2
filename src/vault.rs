//! # File Vault
//!
//! Path-based encryption and decryption on the local filesystem, built on
//! [`StreamCodec`].
//!
//! - [`FileVault::encrypt`] / [`FileVault::decrypt`] replace the source with
//!   its transformed counterpart.
//! - [`FileVault::encrypt_copy`] / [`FileVault::decrypt_copy`] keep the source.
//! - [`FileVault::stream_decrypt`] decrypts straight into any writer.
//!
//! Without an explicit destination, encryption writes `"{source}.enc"` and
//! decryption writes the source path minus `.enc` (or `"{source}.dec"` when
//! there is no `.enc` suffix to strip).

use crate::cipher_spec::CipherSpec;
use crate::codec::StreamCodec;
use crate::error::FileVaultError;
use crate::source::StreamSource;
use crate::utils::{decrypted_path, encrypted_path};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Filesystem front end for a [`StreamCodec`].
#[derive(Debug)]
pub struct FileVault {
    codec: StreamCodec,
}

impl FileVault {
    pub fn new(spec: &CipherSpec) -> Result<Self, FileVaultError> {
        Ok(Self::with_codec(StreamCodec::new(spec)?))
    }

    pub fn with_codec(codec: StreamCodec) -> Self {
        Self { codec }
    }

    #[must_use]
    pub fn codec(&self) -> &StreamCodec {
        &self.codec
    }

    /// Encrypt `source` and delete it once the encrypted file is complete.
    ///
    /// Returns the path that was written.
    pub fn encrypt(
        &self,
        source: impl AsRef<Path>,
        dest: Option<&Path>,
    ) -> Result<PathBuf, FileVaultError> {
        self.transform(source.as_ref(), dest, Direction::Encrypt, true)
    }

    /// Encrypt `source`, leaving it in place.
    pub fn encrypt_copy(
        &self,
        source: impl AsRef<Path>,
        dest: Option<&Path>,
    ) -> Result<PathBuf, FileVaultError> {
        self.transform(source.as_ref(), dest, Direction::Encrypt, false)
    }

    /// Decrypt `source` and delete it once the plaintext file is complete.
    pub fn decrypt(
        &self,
        source: impl AsRef<Path>,
        dest: Option<&Path>,
    ) -> Result<PathBuf, FileVaultError> {
        self.transform(source.as_ref(), dest, Direction::Decrypt, true)
    }

    /// Decrypt `source`, leaving it in place.
    pub fn decrypt_copy(
        &self,
        source: impl AsRef<Path>,
        dest: Option<&Path>,
    ) -> Result<PathBuf, FileVaultError> {
        self.transform(source.as_ref(), dest, Direction::Decrypt, false)
    }

    /// Decrypt `source` into `writer` (an HTTP body, stdout, ...) without
    /// touching the filesystem beyond the read.
    pub fn stream_decrypt<W: Write>(
        &self,
        source: impl AsRef<Path>,
        writer: W,
    ) -> Result<(), FileVaultError> {
        let source = source.as_ref();
        info!(source = %source.display(), "stream-decrypting file");
        self.codec.decode(open_source(source)?, writer)
    }

    fn transform(
        &self,
        source: &Path,
        dest: Option<&Path>,
        direction: Direction,
        delete_source: bool,
    ) -> Result<PathBuf, FileVaultError> {
        let dest = match (dest, direction) {
            (Some(path), _) => path.to_path_buf(),
            (None, Direction::Encrypt) => encrypted_path(source),
            (None, Direction::Decrypt) => decrypted_path(source),
        };
        info!(
            ?direction,
            source = %source.display(),
            dest = %dest.display(),
            delete_source,
            "transforming file"
        );

        let input = open_source(source)?;
        // `File::create` would truncate the source through any alias of it.
        if same_file(source, &dest) {
            return Err(FileVaultError::SinkOpenFailed {
                path: dest,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "destination would overwrite the source",
                ),
            });
        }
        let mut output = open_sink(&dest)?;

        let outcome = match direction {
            Direction::Encrypt => self.codec.encode(input, &mut output),
            Direction::Decrypt => self.codec.decode(input, &mut output),
        };

        if let Err(err) = outcome {
            drop(output);
            // A partial frame or plaintext prefix is never useful.
            if let Err(cleanup) = fs::remove_file(&dest) {
                warn!(dest = %dest.display(), error = %cleanup, "could not remove partial output");
            }
            return Err(err);
        }

        output.into_inner().map_err(|e| e.into_error())?.sync_all()?;

        if delete_source {
            fs::remove_file(source)?;
        }
        Ok(dest)
    }
}

/// Whether `dest` names the same file as `source` (`..` segments, symlinks
/// and hard links included). A destination that does not exist yet never does.
fn same_file(source: &Path, dest: &Path) -> bool {
    if source == dest {
        return true;
    }
    let (Ok(src_meta), Ok(dest_meta)) = (fs::metadata(source), fs::metadata(dest)) else {
        return false;
    };
    if same_inode(&src_meta, &dest_meta) {
        return true;
    }
    match (fs::canonicalize(source), fs::canonicalize(dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
fn same_inode(a: &fs::Metadata, b: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn same_inode(_: &fs::Metadata, _: &fs::Metadata) -> bool {
    false
}

fn open_source(path: &Path) -> Result<StreamSource<File>, FileVaultError> {
    File::open(path)
        .and_then(StreamSource::new)
        .map_err(|source| FileVaultError::SourceOpenFailed {
            path: path.to_path_buf(),
            source,
        })
}

fn open_sink(path: &Path) -> Result<BufWriter<File>, FileVaultError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| FileVaultError::SinkOpenFailed {
            path: path.to_path_buf(),
            source,
        })
}
