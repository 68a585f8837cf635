//! Lint diagnostics as exchanged with the lint engine.
//!
//! Lines and columns are 1-based. Fields the processor does not touch
//! (`fatal`, `suggestions`, ...) are carried through unchanged in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single lint result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    #[serde(default)]
    pub rule_id: Option<String>,
    pub severity: u8,
    pub message: String,
    pub line: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A text replacement over a byte range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub range: [usize; 2],
    pub text: String,
}

impl Diagnostic {
    /// Create a diagnostic at a single position.
    pub fn new(
        rule_id: impl Into<String>,
        severity: u8,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            rule_id: Some(rule_id.into()),
            severity,
            message: message.into(),
            line,
            column,
            node_type: None,
            message_id: None,
            end_line: None,
            end_column: None,
            fix: None,
            extra: Map::new(),
        }
    }

    pub fn with_end(mut self, end_line: usize, end_column: usize) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    pub fn with_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn with_fix(mut self, range: [usize; 2], text: impl Into<String>) -> Self {
        self.fix = Some(Fix {
            range,
            text: text.into(),
        });
        self
    }
}
