//! Integrity block: the signature envelope prepended to a web bundle.
//!
//! Depends on `canon`. Nothing in `canon` depends on `block`.

pub mod model;
pub mod serialize;
