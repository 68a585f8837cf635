//! Template extraction from a marked declaration.
//!
//! [`classify`] inspects the marker call's argument and either returns the
//! template with its location in the host document or says why nothing was
//! extracted.

use crate::error::Result;
use crate::literal::{cook_template, decode_string};
use crate::parser::HostTree;
use crate::scanner::MarkedDeclaration;
use tmpl_source_map::Range;
use tree_sitter::Node;

const TEMPLATE_PROPERTY: &str = "template";
const TEMPLATE_URL_PROPERTY: &str = "templateUrl";

/// The result of inspecting one marked declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Extracted(ExtractedTemplate),
    /// The metadata object has no `template` property
    SkippedNoTemplateProperty,
    /// The metadata object has a `templateUrl` property; that template is
    /// linted from its own file
    SkippedHasUrl,
    SkippedMalformedInitializer(MalformedReason),
}

/// Why a declaration's metadata could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// The marker call does not have exactly one argument
    ArgumentCount(usize),
    /// The single argument is not an object literal; carries its node kind
    ArgumentNotObject(String),
    /// The `template` value is not a string or template literal; carries its
    /// node kind
    UnsupportedInitializer(String),
}

/// How the template text was written in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// `'...'` or `"..."`
    StringLiteral,
    /// `` `...` `` without `${}`
    TemplateLiteral,
    /// `` `...${x}...` ``, kept verbatim including delimiters
    SubstitutionTemplate,
}

impl TemplateKind {
    /// Bytes at the start of the literal that are not part of the fragment
    pub fn content_offset(&self) -> usize {
        match self {
            TemplateKind::StringLiteral | TemplateKind::TemplateLiteral => 1,
            TemplateKind::SubstitutionTemplate => 0,
        }
    }
}

/// A template pulled out of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTemplate {
    pub text: String,
    pub kind: TemplateKind,
    /// Location of the whole literal, delimiters included
    pub span: Range,
}

/// Inspect a marked declaration and extract its inline template.
///
/// Errors only when the host tree and its line index disagree, which the
/// preprocess boundary treats like a parse failure.
pub fn classify(tree: &HostTree, declaration: &MarkedDeclaration) -> Result<ExtractionOutcome> {
    let Some(arguments) = declaration.call.child_by_field_name("arguments") else {
        return Ok(malformed(MalformedReason::ArgumentCount(0)));
    };
    let args = significant_children(arguments);

    let metadata = match args.as_slice() {
        [only] if only.kind() == "object" => *only,
        [only] => {
            return Ok(malformed(MalformedReason::ArgumentNotObject(
                only.kind().to_string(),
            )));
        }
        _ => return Ok(malformed(MalformedReason::ArgumentCount(args.len()))),
    };

    let properties: Vec<(String, Node)> = significant_children(metadata)
        .into_iter()
        .filter_map(|prop| property_name(tree, prop).map(|name| (name, prop)))
        .collect();

    if properties
        .iter()
        .any(|(name, _)| name == TEMPLATE_URL_PROPERTY)
    {
        return Ok(ExtractionOutcome::SkippedHasUrl);
    }

    let Some((_, template)) = properties
        .iter()
        .find(|(name, _)| name == TEMPLATE_PROPERTY)
    else {
        return Ok(ExtractionOutcome::SkippedNoTemplateProperty);
    };

    let value = match template.kind() {
        "pair" => template.child_by_field_name("value"),
        _ => None,
    };
    let Some(value) = value else {
        return Ok(malformed(MalformedReason::UnsupportedInitializer(
            template.kind().to_string(),
        )));
    };

    let Some((text, kind)) = template_text(tree, &value) else {
        return Ok(malformed(MalformedReason::UnsupportedInitializer(
            value.kind().to_string(),
        )));
    };

    Ok(ExtractionOutcome::Extracted(ExtractedTemplate {
        text,
        kind,
        span: tree.span(&value)?,
    }))
}

fn malformed(reason: MalformedReason) -> ExtractionOutcome {
    ExtractionOutcome::SkippedMalformedInitializer(reason)
}

/// Named children other than comments.
fn significant_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// The static name of an object member, if it has one.
///
/// `template: x`, `'template': x`, `template` (shorthand) and
/// `template() {}` are all named `template`; computed keys have no name.
fn property_name(tree: &HostTree, prop: Node) -> Option<String> {
    let key = match prop.kind() {
        "pair" => prop.child_by_field_name("key")?,
        "method_definition" => prop.child_by_field_name("name")?,
        "shorthand_property_identifier" => prop,
        _ => return None,
    };

    match key.kind() {
        "property_identifier" | "shorthand_property_identifier" => {
            Some(tree.node_text(&key).to_string())
        }
        "string" => Some(decode_string(strip_delimiters(tree.node_text(&key)))),
        _ => None,
    }
}

fn template_text(tree: &HostTree, value: &Node) -> Option<(String, TemplateKind)> {
    let source = tree.node_text(value);
    match value.kind() {
        "string" => Some((
            decode_string(strip_delimiters(source)),
            TemplateKind::StringLiteral,
        )),
        "template_string" => {
            let mut cursor = value.walk();
            let has_substitution = value
                .named_children(&mut cursor)
                .any(|child| child.kind() == "template_substitution");
            if has_substitution {
                Some((source.to_string(), TemplateKind::SubstitutionTemplate))
            } else {
                Some((
                    cook_template(strip_delimiters(source)),
                    TemplateKind::TemplateLiteral,
                ))
            }
        }
        _ => None,
    }
}

/// Drop the single-byte quote or backtick at each end of a literal.
fn strip_delimiters(source: &str) -> &str {
    source
        .get(1..source.len().saturating_sub(1))
        .unwrap_or_default()
}
