//! Bundle offset resolver: find where the payload starts in a bundle file.
//!
//! # Trailing length
//!
//! ```text
//! [integrity block?][payload ............................][len:u64be]
//!                   |<-------------- len ------------------------->|
//! ```
//!
//! The last 8 bytes of a web bundle hold, big-endian, the byte length of
//! the payload (the trailing length field is counted in it). Anything in
//! front of the payload is an integrity block.
//!
//! # Fail-closed semantics
//!
//! - File shorter than 8 bytes → error
//! - Declared payload longer than the file → error, never clamped
//! - Bytes in front of the payload → error (reading an existing block is
//!   not supported in b1)

use std::io::{Read, Seek, SeekFrom};

use thiserror::Error;
use tracing::{debug, instrument, warn};

use wbsign_kernel::block::model::IntegrityBlockV1;

/// Width of the trailing length field.
pub const TRAILING_LENGTH_LEN: u64 = 8;

/// Error resolving a bundle's payload offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The file cannot hold a trailing length field.
    #[error("bundle is {file_size} bytes, too short for the 8-byte trailing length")]
    TooShort { file_size: u64 },
    /// Seek or read failure.
    #[error("I/O error during {op}: {detail}")]
    Io { op: &'static str, detail: String },
    /// The trailing length claims more bytes than the file holds.
    #[error(
        "integrity block length should never be negative: trailing length \
         {payload_length} exceeds file size {file_size}"
    )]
    NegativeBlockLength { file_size: u64, payload_length: u64 },
    /// The bundle is already prefixed by an integrity block.
    ///
    /// `block_length` is diagnostic only.
    #[error(
        "web bundle already contains an integrity block ({block_length} bytes); \
         please provide an unsigned web bundle"
    )]
    ExistingBlockUnsupported { block_length: u64 },
}

/// What sits in front of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPresence {
    /// Payload starts at byte 0.
    Absent,
    /// `length` bytes precede the payload; b1 cannot parse them.
    Unsupported { length: u64 },
}

/// Result of resolving an unsigned bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBundleV1 {
    /// Fresh empty block to be signed and prepended.
    pub block: IntegrityBlockV1,
    /// Offset to hash the payload from. Valid for the file as it is now,
    /// not after a block has been prepended.
    pub payload_offset: u64,
}

/// Read the big-endian payload length from the last 8 bytes.
///
/// Leaves the reader positioned at end of file.
///
/// # Errors
///
/// Returns [`ResolveError::TooShort`] for files under 8 bytes, or
/// [`ResolveError::Io`] if seeking or reading fails.
pub fn read_payload_length<R: Read + Seek>(reader: &mut R) -> Result<u64, ResolveError> {
    let file_size = stream_len(reader)?;
    read_trailing_length(reader, file_size)
}

/// Classify the region in front of the payload.
///
/// # Errors
///
/// Returns [`ResolveError::NegativeBlockLength`] if `payload_length`
/// exceeds `file_size`.
pub fn block_presence(file_size: u64, payload_length: u64) -> Result<BlockPresence, ResolveError> {
    match file_size.checked_sub(payload_length) {
        None => Err(ResolveError::NegativeBlockLength {
            file_size,
            payload_length,
        }),
        Some(0) => Ok(BlockPresence::Absent),
        Some(length) => Ok(BlockPresence::Unsupported { length }),
    }
}

/// Resolve a bundle into a fresh block plus the payload offset.
///
/// # Errors
///
/// Returns [`ResolveError`] if the trailing length cannot be read, is
/// larger than the file, or shows an existing integrity block.
#[instrument(skip_all)]
pub fn resolve_integrity_block<R: Read + Seek>(
    reader: &mut R,
) -> Result<ResolvedBundleV1, ResolveError> {
    let file_size = stream_len(reader)?;
    let payload_length = read_trailing_length(reader, file_size)?;
    debug!(file_size, payload_length, "read trailing length");

    match block_presence(file_size, payload_length)? {
        BlockPresence::Absent => Ok(ResolvedBundleV1 {
            block: IntegrityBlockV1::new_empty(),
            payload_offset: 0,
        }),
        BlockPresence::Unsupported { length } => {
            warn!(block_length = length, "bundle already carries an integrity block");
            Err(ResolveError::ExistingBlockUnsupported {
                block_length: length,
            })
        }
    }
}

fn stream_len<R: Seek>(reader: &mut R) -> Result<u64, ResolveError> {
    reader.seek(SeekFrom::End(0)).map_err(|e| ResolveError::Io {
        op: "seek to end",
        detail: e.to_string(),
    })
}

fn read_trailing_length<R: Read + Seek>(
    reader: &mut R,
    file_size: u64,
) -> Result<u64, ResolveError> {
    if file_size < TRAILING_LENGTH_LEN {
        return Err(ResolveError::TooShort { file_size });
    }
    reader
        .seek(SeekFrom::End(-8))
        .map_err(|e| ResolveError::Io {
            op: "seek to trailing length",
            detail: e.to_string(),
        })?;
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).map_err(|e| ResolveError::Io {
        op: "read trailing length",
        detail: e.to_string(),
    })?;
    Ok(u64::from_be_bytes(buf))
}
