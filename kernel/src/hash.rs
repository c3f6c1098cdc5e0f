//! Payload digest types: the SHA-512 value a signer commits to.
//!
//! **Exactly one place defines the payload hash algorithm.** The harness
//! streams bytes into [`PayloadHasher`]; nothing else touches `sha2`
//! for signing input.

use sha2::{Digest, Sha512};

/// Length of a payload digest in bytes.
pub const PAYLOAD_DIGEST_LEN: usize = 64;

/// Algorithm label used in [`ContentHash`] strings.
pub const PAYLOAD_DIGEST_ALGORITHM: &str = "sha512";

/// Textual form of a payload digest: `"sha512:<128 lowercase hex>"`.
///
/// This is what gets logged and printed next to signing input. [`parse`]
/// accepts only that exact shape, so a parsed value always maps back to a
/// [`PayloadDigestV1`].
///
/// [`parse`]: ContentHash::parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(PayloadDigestV1);

impl ContentHash {
    /// Parse `"sha512:<hex>"`.
    ///
    /// Returns `None` for any other algorithm label, a digest that is not
    /// exactly 128 lowercase hex characters, or a missing separator.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (algorithm, digest_hex) = s.split_once(':')?;
        if algorithm != PAYLOAD_DIGEST_ALGORITHM
            || digest_hex.len() != PAYLOAD_DIGEST_LEN * 2
            || !digest_hex
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return None;
        }
        let mut bytes = [0u8; PAYLOAD_DIGEST_LEN];
        hex::decode_to_slice(digest_hex, &mut bytes).ok()?;
        Some(Self(PayloadDigestV1(bytes)))
    }

    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        PAYLOAD_DIGEST_ALGORITHM
    }

    #[must_use]
    pub fn hex_digest(&self) -> String {
        self.0.to_hex()
    }

    /// The digest this string names.
    #[must_use]
    pub fn digest(&self) -> PayloadDigestV1 {
        self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PAYLOAD_DIGEST_ALGORITHM}:{}", self.0.to_hex())
    }
}

/// SHA-512 digest of a bundle's payload region.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayloadDigestV1([u8; PAYLOAD_DIGEST_LEN]);

impl PayloadDigestV1 {
    #[must_use]
    pub fn from_bytes(bytes: [u8; PAYLOAD_DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PAYLOAD_DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex, 128 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// `"sha512:<hex>"`.
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        ContentHash(*self)
    }

    /// One-shot digest of an in-memory slice.
    #[must_use]
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = PayloadHasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl std::fmt::Debug for PayloadDigestV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PayloadDigestV1({})", self.to_hex())
    }
}

/// Incremental SHA-512 accumulator.
#[derive(Debug, Clone, Default)]
pub struct PayloadHasher {
    inner: Sha512,
}

impl PayloadHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
    }

    #[must_use]
    pub fn finalize(self) -> PayloadDigestV1 {
        let mut out = [0u8; PAYLOAD_DIGEST_LEN];
        out.copy_from_slice(&self.inner.finalize());
        PayloadDigestV1(out)
    }
}
