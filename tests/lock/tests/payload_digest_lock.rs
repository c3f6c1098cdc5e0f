//! Payload digest lock tests.
//!
//! - Same range twice → identical digest
//! - Offset 0 → SHA-512 of the whole file
//! - Offset == file size → SHA-512 of the empty input
//! - Digest is independent of chunk size
//! - Resolver and digest share one handle sequentially

use std::fs::File;

use lock_tests::bundle_test_helpers::{sha512_hex, unsigned_bundle, write_bundle_file};
use wbsign_harness::config::DigestConfig;
use wbsign_harness::digest::compute_payload_digest;
use wbsign_harness::resolve::resolve_integrity_block;
use wbsign_kernel::hash::PAYLOAD_DIGEST_LEN;

/// SHA-512 of zero bytes.
const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
                            47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

fn bundle_file(bytes: &[u8]) -> (tempfile::TempDir, File) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bundle_file(dir.path(), "bundle.wbn", bytes);
    (dir, File::open(path).unwrap())
}

#[test]
fn same_range_twice_is_identical() {
    let (_dir, mut file) = bundle_file(&unsigned_bundle(5_000));
    let config = DigestConfig::default();
    let first = compute_payload_digest(&mut file, 17, &config).unwrap();
    let second = compute_payload_digest(&mut file, 17, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_bytes().len(), PAYLOAD_DIGEST_LEN);
}

#[test]
fn offset_zero_hashes_whole_file() {
    let bytes = unsigned_bundle(200_000);
    let (_dir, mut file) = bundle_file(&bytes);
    let digest = compute_payload_digest(&mut file, 0, &DigestConfig::default()).unwrap();
    assert_eq!(digest.to_hex(), sha512_hex(&bytes));
}

#[test]
fn offset_at_end_hashes_empty_input() {
    let bytes = unsigned_bundle(321);
    let (_dir, mut file) = bundle_file(&bytes);
    let digest = compute_payload_digest(&mut file, 321, &DigestConfig::default()).unwrap();
    assert_eq!(digest.to_hex(), EMPTY_SHA512);
}

#[test]
fn chunk_size_is_not_observable() {
    let bytes = unsigned_bundle(10_007);
    let (_dir, mut file) = bundle_file(&bytes);
    let expected = sha512_hex(&bytes[5..]);
    for chunk_size in [1usize, 13, 1024, 65_536] {
        let config = DigestConfig {
            chunk_size: Some(chunk_size),
        };
        let digest = compute_payload_digest(&mut file, 5, &config).unwrap();
        assert_eq!(digest.to_hex(), expected, "chunk_size={chunk_size}");
    }
}

#[test]
fn resolver_then_digest_on_one_handle() {
    let bytes = unsigned_bundle(1_000);
    let (_dir, mut file) = bundle_file(&bytes);

    // The resolver leaves the handle at EOF; the digest must seek back.
    let resolved = resolve_integrity_block(&mut file).unwrap();
    let digest =
        compute_payload_digest(&mut file, resolved.payload_offset, &DigestConfig::default())
            .unwrap();
    assert_eq!(digest.to_hex(), sha512_hex(&bytes));
}
