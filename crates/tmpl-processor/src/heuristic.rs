//! Cheap pre-parse check for host documents.

use crate::config::HeuristicConfig;

impl HeuristicConfig {
    /// Whether `text` is worth parsing for marked declarations.
    ///
    /// Checks the filename suffix first and falls back to a substring scan
    /// for every required token. A false positive costs one parse; a false
    /// negative means the file's templates are never linted.
    pub fn is_likely_candidate(&self, text: &str, filename: &str) -> bool {
        if self
            .file_suffixes
            .iter()
            .any(|suffix| filename.ends_with(suffix.as_str()))
        {
            return true;
        }

        !self.required_tokens.is_empty()
            && self
                .required_tokens
                .iter()
                .all(|token| text.contains(token.as_str()))
    }
}
