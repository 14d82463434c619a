use std::fs::File;
use std::path::Path;

use blake3::Hasher;
use memmap2::Mmap;

use crate::error::RevError;

/// Computes the BLAKE3 content digest of a file as lowercase hex.
///
/// Uses memory-mapped I/O and BLAKE3's built-in parallelism. The digest is
/// derived purely from the file's bytes, so two sources with identical
/// content always produce the same 64-character hex string regardless of
/// path or timestamps.
///
/// # Errors
///
/// Returns [`RevError::Hash`] if the file cannot be opened or memory
/// mapping fails, e.g. because the file was truncated or unlinked after the
/// caller's readability check.
pub fn content_digest(path: &Path) -> Result<String, RevError> {
    let metadata = std::fs::metadata(path).map_err(|source| RevError::Hash {
        path: path.to_path_buf(),
        source,
    })?;

    // Empty files cannot be memory mapped
    if metadata.len() == 0 {
        let hasher = Hasher::new();
        return Ok(hasher.finalize().to_hex().to_string());
    }

    let file = File::open(path).map_err(|source| RevError::Hash {
        path: path.to_path_buf(),
        source,
    })?;

    let mmap = unsafe { Mmap::map(&file) }.map_err(|source| RevError::Hash {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Hasher::new();
    hasher.update_rayon(&mmap);

    Ok(hasher.finalize().to_hex().to_string())
}

/// Number of lowercase hex characters in a [`content_digest`] result.
pub const DIGEST_HEX_LEN: usize = blake3::OUT_LEN * 2;
