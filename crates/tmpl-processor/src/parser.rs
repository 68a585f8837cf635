//! Host document parsing
//!
//! Wraps tree-sitter with the TypeScript grammars and pairs the resulting
//! tree with a [`LineIndex`] for the same text.

use crate::error::{ProcessorError, Result};
use tmpl_source_map::{LineIndex, Range};
use tree_sitter::{Node, Parser, Tree};

/// Grammar used for a host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostLanguage {
    TypeScript,
    Tsx,
}

impl HostLanguage {
    /// Pick the grammar from a file path; anything that is not `.tsx` is
    /// parsed as TypeScript.
    pub fn from_path(path: &str) -> Self {
        let is_tsx = path
            .rsplit('.')
            .next()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsx"));
        if is_tsx {
            HostLanguage::Tsx
        } else {
            HostLanguage::TypeScript
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HostLanguage::TypeScript => "TypeScript",
            HostLanguage::Tsx => "TSX",
        }
    }

    fn grammar(&self) -> tree_sitter::Language {
        match self {
            HostLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            HostLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A parsed host document.
pub struct HostTree<'a> {
    tree: Tree,
    index: LineIndex<'a>,
}

impl<'a> HostTree<'a> {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The host text
    pub fn text(&self) -> &'a str {
        self.index.text()
    }

    /// Source text covered by `node`
    pub fn node_text(&self, node: &Node) -> &'a str {
        &self.text()[node.byte_range()]
    }

    /// Row/column span of `node`, measured the same way as diagnostics
    pub fn span(&self, node: &Node) -> Result<Range> {
        let (start, end) = (node.start_byte(), node.end_byte());
        self.index
            .range(start, end)
            .ok_or(ProcessorError::Locate { offset: end })
    }

    pub fn line_index(&self) -> &LineIndex<'a> {
        &self.index
    }
}

/// Parse `text` as the host language implied by `filename`.
///
/// Fails if tree-sitter produces no tree or if the tree contains syntax
/// errors; a partially recovered tree is not trusted for extraction.
pub fn parse_host<'a>(text: &'a str, filename: &str) -> Result<HostTree<'a>> {
    let language = HostLanguage::from_path(filename);

    let mut parser = Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|e| ProcessorError::LanguageInit {
            language: language.display_name(),
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(text, None)
        .ok_or_else(|| ProcessorError::ParseFailed {
            path: filename.to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        let at = first_error(root).unwrap_or(root).start_position();
        return Err(ProcessorError::Syntax {
            path: filename.to_string(),
            row: at.row,
            column: at.column,
        });
    }

    Ok(HostTree {
        tree,
        index: LineIndex::new(text),
    })
}

/// Find the first ERROR or MISSING node in document order.
fn first_error(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.is_error() || child.is_missing() {
            return Some(child);
        }
        if child.has_error() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_path() {
        assert_eq!(
            HostLanguage::from_path("app.component.ts"),
            HostLanguage::TypeScript
        );
        assert_eq!(HostLanguage::from_path("widget.TSX"), HostLanguage::Tsx);
        assert_eq!(HostLanguage::from_path("noext"), HostLanguage::TypeScript);
    }

    #[test]
    fn test_parse_valid_typescript() {
        let text = "export class A {\n  name: string = 'a';\n}\n";
        let tree = parse_host(text, "a.ts").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
        assert_eq!(tree.text(), text);
    }

    #[test]
    fn test_parse_error_reports_position() {
        let text = "class A {\n  foo(: {\n}\n";
        let err = parse_host(text, "broken.ts").err().unwrap();
        match err {
            ProcessorError::Syntax { path, .. } => assert_eq!(path, "broken.ts"),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_span_of_node() {
        let text = "const x = 1;\nconst y = 'two';\n";
        let tree = parse_host(text, "a.ts").unwrap();
        let second = tree.root_node().named_child(1).unwrap();

        let span = tree.span(&second).unwrap();
        assert_eq!(span.start.row, 1);
        assert_eq!(span.start.column, 0);
        assert_eq!(span.start.offset, 13);
        assert_eq!(tree.node_text(&second), "const y = 'two';");
    }
}
