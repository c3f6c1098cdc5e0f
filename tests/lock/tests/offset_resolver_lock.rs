//! Offset resolver lock tests against real files on disk.
//!
//! - Trailing length == file size → offset 0, fresh empty block
//! - Trailing length > file size → negative-length invariant error
//! - Trailing length < file size → existing-block error with its length
//! - Files under 8 bytes → too-short error

use std::fs::File;

use lock_tests::bundle_test_helpers::{
    bundle_with_trailing, prefixed_bundle, unsigned_bundle, write_bundle_file,
};
use wbsign_harness::resolve::{
    block_presence, read_payload_length, resolve_integrity_block, BlockPresence, ResolveError,
};
use wbsign_kernel::block::model::IntegrityBlockV1;

fn open(bytes: &[u8]) -> (tempfile::TempDir, File) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bundle_file(dir.path(), "bundle.wbn", bytes);
    let file = File::open(path).unwrap();
    (dir, file)
}

#[test]
fn unsigned_bundle_yields_offset_zero_and_empty_block() {
    for size in [8usize, 9, 100, 4096, 70_000] {
        let (_dir, mut file) = open(&unsigned_bundle(size));
        let resolved = resolve_integrity_block(&mut file).unwrap();
        assert_eq!(resolved.payload_offset, 0, "size={size}");
        assert_eq!(resolved.block, IntegrityBlockV1::new_empty(), "size={size}");
    }
}

#[test]
fn trailing_length_is_big_endian() {
    let (_dir, mut file) = open(&bundle_with_trailing(32, 0x0000_0000_0000_0120));
    assert_eq!(read_payload_length(&mut file).unwrap(), 288);
}

#[test]
fn trailing_length_larger_than_file_is_fatal() {
    let (_dir, mut file) = open(&bundle_with_trailing(100, 101));
    assert_eq!(
        resolve_integrity_block(&mut file),
        Err(ResolveError::NegativeBlockLength {
            file_size: 100,
            payload_length: 101
        })
    );

    let (_dir, mut file) = open(&bundle_with_trailing(100, u64::MAX));
    assert!(matches!(
        resolve_integrity_block(&mut file),
        Err(ResolveError::NegativeBlockLength { .. })
    ));
}

#[test]
fn existing_block_is_rejected() {
    let prefix = hex::decode("8348f09f968bf09f93a6443162000080").unwrap();
    let (_dir, mut file) = open(&prefixed_bundle(&prefix, 100));
    let err = resolve_integrity_block(&mut file).unwrap_err();
    assert_eq!(
        err,
        ResolveError::ExistingBlockUnsupported { block_length: 16 }
    );
    assert!(err.to_string().contains("already contains an integrity block"));
}

#[test]
fn one_byte_prefix_is_still_a_block() {
    let (_dir, mut file) = open(&prefixed_bundle(&[0], 50));
    assert_eq!(
        resolve_integrity_block(&mut file),
        Err(ResolveError::ExistingBlockUnsupported { block_length: 1 })
    );
}

#[test]
fn short_files_are_rejected() {
    for size in 0..8u64 {
        let bytes = vec![0u8; usize::try_from(size).unwrap()];
        let (_dir, mut file) = open(&bytes);
        assert_eq!(
            resolve_integrity_block(&mut file),
            Err(ResolveError::TooShort { file_size: size })
        );
    }
}

#[test]
fn presence_is_a_tagged_result() {
    assert_eq!(block_presence(64, 64), Ok(BlockPresence::Absent));
    assert_eq!(
        block_presence(64, 8),
        Ok(BlockPresence::Unsupported { length: 56 })
    );
}
