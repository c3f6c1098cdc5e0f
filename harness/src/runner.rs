//! Harness runner: turns an unsigned bundle into signing input.
//!
//! The runner uses ONLY kernel APIs and the harness stages. It does not
//! encode or hash anything itself.
//!
//! # Pipeline
//!
//! ```text
//! open() → resolve_integrity_block() → compute_payload_digest(offset)
//!   → encode_block() → SigningInputV1
//! ```
//!
//! One handle is used for every stage, strictly in this order.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use thiserror::Error;
use tracing::{info, instrument};

use crate::config::DigestConfig;
use crate::digest::{compute_payload_digest, DigestError};
use crate::resolve::{resolve_integrity_block, ResolveError};
use wbsign_kernel::block::model::IntegrityBlockV1;
use wbsign_kernel::block::serialize::{encode_block, EncodeError};
use wbsign_kernel::hash::PayloadDigestV1;

/// Error preparing a bundle for signing, tagged by stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    #[error("cannot open bundle {path}: {detail}")]
    Open { path: String, detail: String },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Digest(#[from] DigestError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Everything an external signer needs for one unsigned bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningInputV1 {
    /// The (empty) block that will carry the new signature.
    pub block: IntegrityBlockV1,
    /// Where the hashed payload starts in the original file.
    pub payload_offset: u64,
    /// SHA-512 of `[payload_offset, EOF)`.
    pub payload_digest: PayloadDigestV1,
    /// Canonical CBOR of `block`.
    pub block_bytes: Vec<u8>,
}

/// Run the pipeline over an open bundle stream.
///
/// # Errors
///
/// Returns [`PrepareError`] wrapping the first failing stage.
#[instrument(skip_all)]
pub fn prepare_signing_input<R: Read + Seek>(
    reader: &mut R,
    config: &DigestConfig,
) -> Result<SigningInputV1, PrepareError> {
    let resolved = resolve_integrity_block(reader)?;
    let payload_digest = compute_payload_digest(reader, resolved.payload_offset, config)?;
    let block_bytes = encode_block(&resolved.block)?;

    info!(
        payload_offset = resolved.payload_offset,
        block_len = block_bytes.len(),
        payload_digest = %payload_digest.content_hash(),
        "bundle ready for signing"
    );
    Ok(SigningInputV1 {
        block: resolved.block,
        payload_offset: resolved.payload_offset,
        payload_digest,
        block_bytes,
    })
}

/// Open `path` read-only and run [`prepare_signing_input`] on it.
///
/// # Errors
///
/// Returns [`PrepareError::Open`] if the file cannot be opened, otherwise
/// whatever the pipeline returns.
pub fn prepare_bundle_file(
    path: &Path,
    config: &DigestConfig,
) -> Result<SigningInputV1, PrepareError> {
    let mut file = File::open(path).map_err(|e| PrepareError::Open {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    prepare_signing_input(&mut file, config)
}
