//! Canonical encoding: the single serialization-for-signing implementation.
//!
//! **Exactly one place** produces CBOR bytes in the kernel. Every byte that
//! ends up in an integrity block or in signing input must route through
//! [`cbor::CborEncoder`].

pub mod cbor;
