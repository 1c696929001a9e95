//! Lowercase char filter.

use super::CharFilter;

/// A char filter that lowercases the whole input.
///
/// Lowercasing happens before tokenization so that stopword matching and
/// punctuation stripping see the same casing.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
