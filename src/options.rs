//! Configuration for a validation run.
//!
//! The defaults reproduce the plain validator: a nesting cap of
//! `DEFAULT_MAX_DEPTH`, a 10MB input ceiling and no end-of-input check
//! after the top-level value.

/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The default maximum size of an input (10MB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Tunables for `validate_with`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum nesting depth of objects and arrays.
    pub max_depth: usize,
    /// Maximum input size in bytes, checked before tokenization.
    pub max_input_bytes: usize,
    /// Whether tokens after the top-level value are an error.
    pub reject_trailing_tokens: bool,
}

impl Options {
    /// The default options: trailing tokens after the top-level value
    /// are ignored.
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            reject_trailing_tokens: false,
        }
    }

    /// Like `new`, but the input must hold exactly one value.
    pub const fn strict() -> Self {
        Self {
            reject_trailing_tokens: true,
            ..Self::new()
        }
    }

    /// Sets the nesting limit.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the input size limit.
    pub const fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    /// Sets whether trailing tokens are rejected.
    pub const fn with_trailing_tokens_rejected(mut self, reject: bool) -> Self {
        self.reject_trailing_tokens = reject;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.max_depth, 100);
        assert_eq!(options.max_input_bytes, 10 * 1024 * 1024);
        assert!(!options.reject_trailing_tokens);
    }

    #[test]
    fn test_strict_options() {
        let options = Options::strict();
        assert!(options.reject_trailing_tokens);
        assert_eq!(options.max_depth, Options::new().max_depth);
    }

    #[test]
    fn test_builders() {
        let options = Options::new()
            .with_max_depth(3)
            .with_max_input_bytes(64)
            .with_trailing_tokens_rejected(true);
        assert_eq!(options.max_depth, 3);
        assert_eq!(options.max_input_bytes, 64);
        assert_eq!(options, Options::strict().with_max_depth(3).with_max_input_bytes(64));
    }
}
