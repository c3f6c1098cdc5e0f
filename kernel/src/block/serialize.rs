//! Integrity block serializer: model → canonical CBOR bytes.
//!
//! Pure byte transform. All CBOR is produced by [`CborEncoder`]. A failed
//! step returns an error and drops the partially filled buffer, so callers
//! never see truncated output.
//!
//! # Layout
//!
//! ```text
//! block     = 83 <bytes magic> <bytes version> <array(N) signature*>
//! signature = 82 <map attributes> <bytes signature>
//! ```

use thiserror::Error;

use crate::block::model::{IntegrityBlockV1, IntegritySignatureV1};
use crate::canon::cbor::{CborEncoder, CborError, MapEntry};

/// Which part of the block could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The `array(2)` head that opens a signature.
    #[error("failed to encode signature header: {source}")]
    SignatureHeader { source: CborError },
    /// The attribute map of a signature.
    #[error("failed to encode signature attributes: {source}")]
    SignatureAttributes { source: CborError },
    /// The signature value.
    #[error("failed to encode signature bytes: {source}")]
    SignatureBytes { source: CborError },
    /// One of the block's fixed header items.
    #[error("failed to encode block {field}: {source}")]
    BlockHeader {
        field: &'static str,
        source: CborError,
    },
    /// A nested stack entry failed.
    #[error("failed to encode signature stack entry {index}: {source}")]
    StackEntry {
        index: usize,
        source: Box<EncodeError>,
    },
}

/// Encode one signature as `array(2) [attributes, signature]`.
///
/// # Errors
///
/// Returns [`EncodeError::SignatureAttributes`] if the attribute map cannot
/// be encoded (e.g. duplicate encoded keys), [`EncodeError::SignatureHeader`]
/// if the array head cannot be written, or [`EncodeError::SignatureBytes`] if
/// the signature value cannot be written.
pub fn encode_signature(signature: &IntegritySignatureV1) -> Result<Vec<u8>, EncodeError> {
    let mut enc = CborEncoder::new();
    enc.array_header(2)
        .map_err(|source| EncodeError::SignatureHeader { source })?;

    let entries = signature
        .attributes
        .iter()
        .map(|(name, value)| {
            MapEntry::encode(|key, val| {
                key.text_string(name)?;
                val.byte_string(value)
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| EncodeError::SignatureAttributes { source })?;
    enc.canonical_map(entries)
        .map_err(|source| EncodeError::SignatureAttributes { source })?;

    enc.byte_string(&signature.signature)
        .map_err(|source| EncodeError::SignatureBytes { source })?;

    Ok(enc.into_bytes())
}

/// Encode a block as `array(3) [magic, version, array(N) signatures]`.
///
/// Signatures are emitted in stack order (newest first), one encoded item
/// per stack entry.
///
/// # Errors
///
/// Returns [`EncodeError::BlockHeader`] if a header item fails, or
/// [`EncodeError::StackEntry`] wrapping the first failing signature.
pub fn encode_block(block: &IntegrityBlockV1) -> Result<Vec<u8>, EncodeError> {
    let mut enc = CborEncoder::new();
    enc.array_header(3).map_err(header("array header"))?;
    enc.byte_string(block.magic()).map_err(header("magic"))?;
    enc.byte_string(block.version()).map_err(header("version"))?;

    let stack = block.signature_stack();
    enc.array_header(stack.len())
        .map_err(header("signature stack header"))?;
    for (index, signature) in stack.iter().enumerate() {
        let item = encode_signature(signature).map_err(|e| EncodeError::StackEntry {
            index,
            source: Box::new(e),
        })?;
        enc.raw(&item);
    }

    Ok(enc.into_bytes())
}

fn header(field: &'static str) -> impl FnOnce(CborError) -> EncodeError {
    move |source| EncodeError::BlockHeader { field, source }
}
