//! Canonical CBOR emission on top of `ciborium-ll`.
//!
//! `ciborium-ll` owns the head encoding (major type + shortest-form argument).
//! This module adds the rules the integrity block format depends on.
//!
//! # Canonicalization rules
//!
//! 1. Every array, map, byte string and text string uses a definite length.
//! 2. Length arguments use the shortest head (`0x80` for an empty array,
//!    `0x58 0x20` for a 32-byte string, and so on).
//! 3. Map entries are sorted by their *encoded* key: shorter keys first,
//!    then bytewise. Insertion order never reaches the output.
//! 4. Two entries with identical encoded keys are rejected, not merged.

use ciborium_ll::{Encoder, Header};
use thiserror::Error;

/// Error type for canonical CBOR emission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CborError {
    /// The underlying writer refused an item.
    #[error("failed to write CBOR {item}: {detail}")]
    Write { item: &'static str, detail: String },
    /// Two map entries encode to the same key bytes.
    #[error("duplicate map key (encoded {key_hex})")]
    DuplicateMapKey { key_hex: String },
}

/// Append-only canonical CBOR writer over an owned buffer.
#[derive(Debug, Default, Clone)]
pub struct CborEncoder {
    buf: Vec<u8>,
}

impl CborEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a definite-length array head announcing `len` items.
    ///
    /// The caller is responsible for emitting exactly `len` items afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::Write`] if the head cannot be written.
    pub fn array_header(&mut self, len: usize) -> Result<(), CborError> {
        self.emit("array header", |enc| enc.push(Header::Array(Some(len))))
    }

    /// Emit a definite-length byte string.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::Write`] if the string cannot be written.
    pub fn byte_string(&mut self, bytes: &[u8]) -> Result<(), CborError> {
        self.emit("byte string", |enc| enc.bytes(bytes, None::<usize>))
    }

    /// Emit a definite-length UTF-8 text string.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::Write`] if the string cannot be written.
    pub fn text_string(&mut self, text: &str) -> Result<(), CborError> {
        self.emit("text string", |enc| enc.text(text, None::<usize>))
    }

    /// Emit a map whose entries are ordered by the canonical key rule.
    ///
    /// Entries may arrive in any order; the output depends only on the set
    /// of entries.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::DuplicateMapKey`] if two entries share the same
    /// encoded key, or [`CborError::Write`] if the map head cannot be written.
    pub fn canonical_map(&mut self, mut entries: Vec<MapEntry>) -> Result<(), CborError> {
        entries.sort_by(|a, b| {
            a.key
                .len()
                .cmp(&b.key.len())
                .then_with(|| a.key.cmp(&b.key))
        });
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].key == pair[1].key) {
            return Err(CborError::DuplicateMapKey {
                key_hex: hex::encode(&pair[0].key),
            });
        }

        let len = entries.len();
        self.emit("map header", |enc| enc.push(Header::Map(Some(len))))?;
        for entry in &entries {
            self.buf.extend_from_slice(&entry.key);
            self.buf.extend_from_slice(&entry.value);
        }
        Ok(())
    }

    /// Splice one already-encoded, complete CBOR item into the output.
    ///
    /// Only pass bytes produced by another `CborEncoder`.
    pub fn raw(&mut self, item: &[u8]) {
        self.buf.extend_from_slice(item);
    }

    /// Bytes emitted so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the encoder and return the emitted bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn emit<E, F>(&mut self, item: &'static str, write: F) -> Result<(), CborError>
    where
        E: core::fmt::Debug,
        F: FnOnce(&mut Encoder<&mut Vec<u8>>) -> Result<(), E>,
    {
        let mut enc = Encoder::from(&mut self.buf);
        write(&mut enc).map_err(|e| CborError::Write {
            item,
            detail: format!("{e:?}"),
        })
    }
}

/// One key/value pair of a canonical map, held as encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl MapEntry {
    /// Build an entry by running `write` against two scratch encoders, one
    /// for the key and one for the value.
    ///
    /// # Errors
    ///
    /// Propagates any [`CborError`] raised inside `write`.
    pub fn encode<F>(write: F) -> Result<Self, CborError>
    where
        F: FnOnce(&mut CborEncoder, &mut CborEncoder) -> Result<(), CborError>,
    {
        let mut key = CborEncoder::new();
        let mut value = CborEncoder::new();
        write(&mut key, &mut value)?;
        Ok(Self {
            key: key.into_bytes(),
            value: value.into_bytes(),
        })
    }
}
