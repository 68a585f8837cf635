//! Documents handed to the lint engine by the preprocess step.

use serde::{Deserialize, Serialize};

/// A template extracted from a host document, linted as its own file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// The template text (decoded literal content)
    pub text: String,
    /// The synthetic name, e.g. `inline-template-app.component.ts-1.component.html`
    pub filename: String,
}

/// One element of a preprocess result.
///
/// The host document is serialized as a bare string and fragments as
/// `{ "text": .., "filename": .. }` objects, the shape lint engine
/// processors exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LintDocument {
    Host(String),
    Fragment(Fragment),
}

impl LintDocument {
    /// The text the lint engine should check.
    pub fn text(&self) -> &str {
        match self {
            LintDocument::Host(text) => text,
            LintDocument::Fragment(fragment) => &fragment.text,
        }
    }

    /// The synthetic filename, for fragments only.
    pub fn filename(&self) -> Option<&str> {
        match self {
            LintDocument::Host(_) => None,
            LintDocument::Fragment(fragment) => Some(&fragment.filename),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let docs = vec![
            LintDocument::Host("host".to_string()),
            LintDocument::Fragment(Fragment {
                text: "<p></p>".to_string(),
                filename: "inline-template-a.ts-1.component.html".to_string(),
            }),
        ];

        assert_eq!(
            serde_json::to_value(&docs).unwrap(),
            json!([
                "host",
                { "text": "<p></p>", "filename": "inline-template-a.ts-1.component.html" }
            ])
        );
    }

    #[test]
    fn test_accessors() {
        let host = LintDocument::Host("abc".to_string());
        assert_eq!(host.text(), "abc");
        assert_eq!(host.filename(), None);
    }
}
