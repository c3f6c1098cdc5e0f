//! wbsign kernel: the deterministic byte layer for web bundle integrity blocks.
//!
//! # API Surface
//!
//! - [`block::model::IntegrityBlockV1`] -- the integrity block and its signature stack
//! - [`block::serialize::encode_block`] -- canonical CBOR bytes of a block
//! - [`block::serialize::encode_signature`] -- canonical CBOR bytes of one signature
//! - [`hash::PayloadDigestV1`] -- the SHA-512 digest value handed to signers
//!
//! # Module Dependency Direction
//!
//! `canon` ← `block`, and `hash` standalone.
//!
//! No file I/O happens here. Reading bundle files lives in the harness.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod block;
pub mod canon;
pub mod hash;
