//! Binary that writes a fixed 100-byte unsigned bundle to a temp directory,
//! prepares it for signing through the harness, and prints deterministic
//! output lines for cross-process verification.
//!
//! Usage: `signing_fixture`
//! Output: five lines, each `key=value`:
//!   `payload_offset`=0
//!   `block_len`=16
//!   `block_hex`=8348...
//!   `payload_digest`=sha512:...
//!   `two_signature_block_hex`=8348...
//!
//! Logs go to stderr, filtered by `RUST_LOG`.

use lock_tests::bundle_test_helpers::{signed_block, unsigned_bundle, write_bundle_file};
use tracing_subscriber::EnvFilter;
use wbsign_harness::config::DigestConfig;
use wbsign_harness::runner::prepare_bundle_file;
use wbsign_kernel::block::serialize::encode_block;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_bundle_file(dir.path(), "fixture.wbn", &unsigned_bundle(100));

    let input = prepare_bundle_file(&path, &DigestConfig::default()).expect("prepare failed");
    tracing::info!(path = %path.display(), "fixture prepared");

    let two = encode_block(&signed_block(2)).expect("encode two-signature block");

    println!("payload_offset={}", input.payload_offset);
    println!("block_len={}", input.block_bytes.len());
    println!("block_hex={}", hex::encode(&input.block_bytes));
    println!("payload_digest={}", input.payload_digest.content_hash());
    println!("two_signature_block_hex={}", hex::encode(two));
}
