//! wbsign harness: bundle-file orchestration for the kernel.
//!
//! The harness reads a web bundle file through the kernel's pipeline
//! (`resolve_integrity_block` → `compute_payload_digest` → `encode_block`)
//! and packages the result as a [`runner::SigningInputV1`].
//!
//! The harness does NOT implement encoding or hashing. It owns seeking,
//! reading and the order in which one file handle is used.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod digest;
pub mod resolve;
pub mod runner;
