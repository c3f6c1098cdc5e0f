//! Payload digest computer: SHA-512 over `[offset, EOF)` of a bundle.
//!
//! Reads in bounded chunks (see [`DigestConfig`]), so the payload is never
//! held in memory at once. Any seek or read failure discards the hasher;
//! there is no partial digest.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{ConfigError, DigestConfig};
use wbsign_kernel::hash::{PayloadDigestV1, PayloadHasher};

/// Error computing a payload digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    #[error("invalid digest config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to seek to payload offset {offset}: {detail}")]
    Seek { offset: u64, detail: String },
    /// Read failed after `bytes_hashed` payload bytes.
    #[error("read failed after {bytes_hashed} payload bytes: {detail}")]
    Read { bytes_hashed: u64, detail: String },
}

/// Hash everything from `offset` to the end of `reader`.
///
/// An `offset` at or past the end hashes zero bytes.
///
/// # Errors
///
/// Returns [`DigestError::Config`] for an invalid chunk size,
/// [`DigestError::Seek`] if the offset cannot be reached, or
/// [`DigestError::Read`] if the stream fails mid-way.
#[instrument(skip(reader, config))]
pub fn compute_payload_digest<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    config: &DigestConfig,
) -> Result<PayloadDigestV1, DigestError> {
    let chunk_size = config.effective_chunk_size()?;

    reader
        .seek(SeekFrom::Start(offset))
        .map_err(|e| DigestError::Seek {
            offset,
            detail: e.to_string(),
        })?;

    let mut hasher = PayloadHasher::new();
    let mut buf = vec![0u8; chunk_size];
    let mut bytes_hashed = 0u64;
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buf[..n]);
                bytes_hashed += n as u64;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                return Err(DigestError::Read {
                    bytes_hashed,
                    detail: e.to_string(),
                });
            }
        }
    }

    let digest = hasher.finalize();
    debug!(bytes_hashed, chunk_size, "payload digest computed");
    Ok(digest)
}
