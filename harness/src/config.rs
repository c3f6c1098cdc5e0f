//! Harness configuration.
//!
//! Every field is an optional override; `None` selects the default. The
//! library never reads environment variables or flags.

use thiserror::Error;

/// Default read size for payload hashing.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Payload digest settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestConfig {
    /// Bytes read per hashing step. `None` uses [`DEFAULT_CHUNK_SIZE`].
    pub chunk_size: Option<usize>,
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("digest chunk size must be non-zero")]
    ZeroChunkSize,
}

impl DigestConfig {
    /// The chunk size to use, after defaults and validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroChunkSize`] for an explicit `Some(0)`.
    pub fn effective_chunk_size(&self) -> Result<usize, ConfigError> {
        match self.chunk_size {
            None => Ok(DEFAULT_CHUNK_SIZE),
            Some(0) => Err(ConfigError::ZeroChunkSize),
            Some(n) => Ok(n),
        }
    }
}
