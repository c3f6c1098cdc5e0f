//! `IntegrityBlockV1`: magic, version and a newest-first signature stack.
//!
//! # Binary format
//!
//! ```text
//! IntegrityBlock = array(3) [
//!   bytes magic      -- F0 9F 96 8B F0 9F 93 A6
//!   bytes version    -- 31 62 00 00 ("1b", labelled b1)
//!   array(N) signatures, newest first
//! ]
//! IntegritySignature = array(2) [
//!   map attributes   -- text -> bytes, canonical key order
//!   bytes signature
//! ]
//! ```
//!
//! Encoding lives in [`super::serialize`]. This module only holds data.

use std::collections::BTreeMap;

/// Magic bytes identifying an integrity block (UTF-8 for U+1F58B U+1F4E6).
pub const INTEGRITY_BLOCK_MAGIC: [u8; 8] = [0xf0, 0x9f, 0x96, 0x8b, 0xf0, 0x9f, 0x93, 0xa6];

/// Version marker for format b1: ASCII `"1b"` followed by two zero bytes.
pub const VERSION_B1: [u8; 4] = [0x31, 0x62, 0x00, 0x00];

/// Attribute name carrying the signer's Ed25519 public key.
pub const ED25519_PUBLIC_KEY_ATTRIBUTE: &str = "ed25519PublicKey";

/// Attribute name → raw attribute value.
pub type SignatureAttributes = BTreeMap<String, Vec<u8>>;

/// One entry of the signature stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntegritySignatureV1 {
    pub attributes: SignatureAttributes,
    /// Opaque signature bytes.
    pub signature: Vec<u8>,
}

impl IntegritySignatureV1 {
    #[must_use]
    pub fn new(attributes: SignatureAttributes, signature: Vec<u8>) -> Self {
        Self {
            attributes,
            signature,
        }
    }

    /// A signature whose only attribute is the Ed25519 public key.
    #[must_use]
    pub fn ed25519(public_key: &[u8], signature: Vec<u8>) -> Self {
        let mut attributes = SignatureAttributes::new();
        attributes.insert(ED25519_PUBLIC_KEY_ATTRIBUTE.to_string(), public_key.to_vec());
        Self::new(attributes, signature)
    }

    /// The Ed25519 public key attribute, if present.
    #[must_use]
    pub fn ed25519_public_key(&self) -> Option<&[u8]> {
        self.attributes
            .get(ED25519_PUBLIC_KEY_ATTRIBUTE)
            .map(Vec::as_slice)
    }
}

/// A complete integrity block.
///
/// `magic` and `version` are fixed at construction and have no setters.
/// The stack only grows at the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityBlockV1 {
    magic: [u8; 8],
    version: [u8; 4],
    signature_stack: Vec<IntegritySignatureV1>,
}

impl Default for IntegrityBlockV1 {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl IntegrityBlockV1 {
    /// A block with the b1 markers and no signatures yet.
    #[must_use]
    pub fn new_empty() -> Self {
        Self {
            magic: INTEGRITY_BLOCK_MAGIC,
            version: VERSION_B1,
            signature_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn magic(&self) -> &[u8; 8] {
        &self.magic
    }

    #[must_use]
    pub fn version(&self) -> &[u8; 4] {
        &self.version
    }

    /// Signatures, newest first.
    #[must_use]
    pub fn signature_stack(&self) -> &[IntegritySignatureV1] {
        &self.signature_stack
    }

    /// Add `signature` as the newest entry (index 0).
    pub fn push_signature(&mut self, signature: IntegritySignatureV1) {
        self.signature_stack.insert(0, signature);
    }

    /// Attributes of the newest signature, or a new empty map when the
    /// stack is empty.
    ///
    /// Always returns an owned map: mutating it never touches the block,
    /// and two calls never share storage.
    #[must_use]
    pub fn newest_signature_attributes(&self) -> SignatureAttributes {
        self.signature_stack
            .first()
            .map(|newest| newest.attributes.clone())
            .unwrap_or_default()
    }
}
