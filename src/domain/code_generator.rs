//! Short code generation and validation.

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Length of generated codes when nothing else is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Pattern a caller-requested code must match.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("custom code pattern is valid"));

/// Source of short codes.
///
/// Implementations must be callable from many tasks at once.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a code of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Generates codes from the 62-symbol alphabet `[0-9A-Za-z]`.
///
/// Draws from the thread-local CSPRNG, so no state is shared between
/// callers. With the default length there are 62^6 (about 5.6e10) codes;
/// the store still has the final say on uniqueness.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphanumericGenerator;

impl CodeGenerator for AlphanumericGenerator {
    fn generate(&self, length: usize) -> String {
        rand::rng()
            .sample_iter(Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

/// Returns true if `code` is non-empty and strictly alphanumeric ASCII.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_code("promo2025"));
/// assert!(is_valid_code("AbC"));
/// assert!(!is_valid_code("ab!"));
/// assert!(!is_valid_code("my-link"));
/// ```
pub fn is_valid_code(code: &str) -> bool {
    CUSTOM_CODE_REGEX.is_match(code)
}
