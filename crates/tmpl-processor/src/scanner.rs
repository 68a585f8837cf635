//! Finds top-level class declarations carrying the marker decorator.
//!
//! Matching is purely syntactic: `@Component(...)` matches the marker
//! `Component`, while `@ng.Component(...)`, a bare `@Component` or an import
//! alias do not.

use crate::parser::HostTree;
use tree_sitter::Node;

const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration", "class"];

/// A decorator call on a top-level class that names the marker.
#[derive(Debug, Clone, Copy)]
pub struct MarkedDeclaration<'tree> {
    /// The class declaration (or class expression of an `export default`)
    pub class: Node<'tree>,
    /// The `call_expression` inside the decorator
    pub call: Node<'tree>,
}

/// Collect marked declarations in source order.
///
/// A class with two matching decorators yields two entries.
pub fn find_marked_declarations<'tree>(
    tree: &'tree HostTree,
    marker: &str,
) -> Vec<MarkedDeclaration<'tree>> {
    let root = tree.root_node();
    let mut found = Vec::new();

    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        let Some(class) = class_of_statement(statement) else {
            continue;
        };

        // Decorators written before `export` belong to the export statement,
        // the ones after it to the class itself; both precede the class body.
        let mut decorators = Vec::new();
        if statement.id() != class.id() {
            decorators.extend(decorators_of(statement));
        }
        decorators.extend(decorators_of(class));

        for decorator in decorators {
            if let Some(call) = marker_call(tree, decorator, marker) {
                found.push(MarkedDeclaration { class, call });
            }
        }
    }

    found
}

/// The class-like declaration a top-level statement introduces, if any.
fn class_of_statement(statement: Node) -> Option<Node> {
    if CLASS_KINDS.contains(&statement.kind()) {
        return Some(statement);
    }
    if statement.kind() != "export_statement" {
        return None;
    }
    statement
        .child_by_field_name("declaration")
        .or_else(|| statement.child_by_field_name("value"))
        .filter(|node| CLASS_KINDS.contains(&node.kind()))
}

fn decorators_of(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .collect()
}

/// The decorator's call expression when its callee is the plain identifier
/// `marker`.
fn marker_call<'tree>(tree: &HostTree, decorator: Node<'tree>, marker: &str) -> Option<Node<'tree>> {
    let mut cursor = decorator.walk();
    let call = decorator
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")?;
    if call.kind() != "call_expression" {
        return None;
    }

    let callee = call.child_by_field_name("function")?;
    (callee.kind() == "identifier" && tree.node_text(&callee) == marker).then_some(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_host;

    fn class_names(text: &str, marker: &str) -> Vec<String> {
        let tree = parse_host(text, "test.component.ts").unwrap();
        find_marked_declarations(&tree, marker)
            .into_iter()
            .map(|m| {
                m.class
                    .child_by_field_name("name")
                    .map(|n| tree.node_text(&n).to_string())
                    .unwrap_or_else(|| "<anonymous>".to_string())
            })
            .collect()
    }

    #[test]
    fn test_exported_and_plain_classes() {
        let text = r#"
import { Component } from '@angular/core';

@Component({ template: '<a></a>' })
export class First {}

@Component({ template: '<b></b>' })
class Second {}

export class Unmarked {}
"#;
        assert_eq!(class_names(text, "Component"), vec!["First", "Second"]);
    }

    #[test]
    fn test_export_default_class() {
        let text = "@Component({ template: '' })\nexport default class Main {}\n";
        assert_eq!(class_names(text, "Component"), vec!["Main"]);
    }

    #[test]
    fn test_other_decorators_ignored() {
        let text = r#"
@Injectable()
export class Service {}

@Directive({ selector: '[x]' })
export class Dir {}
"#;
        assert!(class_names(text, "Component").is_empty());
    }

    #[test]
    fn test_member_and_bare_decorators_ignored() {
        let text = r#"
@ng.Component({ template: '' })
export class Qualified {}

@Component
export class Bare {}
"#;
        assert!(class_names(text, "Component").is_empty());
    }

    #[test]
    fn test_nested_classes_ignored() {
        let text = r#"
function factory() {
  @Component({ template: '' })
  class Inner {}
  return Inner;
}
"#;
        assert!(class_names(text, "Component").is_empty());
    }

    #[test]
    fn test_custom_marker() {
        let text = "@View({ template: '' })\nexport class Page {}\n";
        assert_eq!(class_names(text, "View"), vec!["Page"]);
        assert!(class_names(text, "Component").is_empty());
    }
}
