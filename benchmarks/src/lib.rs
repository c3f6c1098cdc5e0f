//! Shared helpers for wbsign benchmark suites.

use wbsign_kernel::block::model::{IntegrityBlockV1, IntegritySignatureV1};

/// A block carrying `n` Ed25519 signatures (32-byte keys, 64-byte values).
#[must_use]
pub fn block_with_signatures(n: usize) -> IntegrityBlockV1 {
    let mut block = IntegrityBlockV1::new_empty();
    for i in 0..n {
        let b = u8::try_from(i % 256).unwrap_or(0);
        block.push_signature(IntegritySignatureV1::ed25519(&[b; 32], vec![b; 64]));
    }
    block
}

/// An unsigned bundle of `total_len` bytes (trailing length == size).
///
/// # Panics
///
/// Panics if `total_len < 8`. Benchmark setup failures are fatal.
#[must_use]
pub fn unsigned_bundle(total_len: usize) -> Vec<u8> {
    assert!(total_len >= 8, "bundle must hold the trailing length");
    let mut data = vec![0x5a; total_len - 8];
    data.extend_from_slice(&(total_len as u64).to_be_bytes());
    data
}
