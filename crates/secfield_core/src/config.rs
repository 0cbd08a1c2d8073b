//! Secure field configuration.

/// Default upper bound on an inbound envelope (256 MB).
pub const DEFAULT_MAX_ENVELOPE_LEN: usize = 256 * 1024 * 1024;

/// Configuration for a secure field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest envelope accepted by `open`/`scan`. Larger inputs are rejected
    /// before any decryption work.
    pub max_envelope_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_envelope_len: DEFAULT_MAX_ENVELOPE_LEN,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest accepted inbound envelope.
    #[must_use]
    pub const fn max_envelope_len(mut self, len: usize) -> Self {
        self.max_envelope_len = len;
        self
    }
}
