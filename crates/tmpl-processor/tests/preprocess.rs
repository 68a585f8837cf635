//! End-to-end tests for the preprocess half.

use serde_json::json;
use tmpl_processor::{LintDocument, Processor, ProcessorConfig};

const HELLO: &str = include_str!("fixtures/hello.component.ts");
const TWO: &str = include_str!("fixtures/two.component.ts");

fn fragment_names(documents: &[LintDocument]) -> Vec<&str> {
    documents.iter().filter_map(LintDocument::filename).collect()
}

#[test]
fn single_string_template() {
    let input = r#"import { Component } from '@angular/core';

@Component({
  selector: 'app-test',
  template: '<h1>Hello, A!</h1>',
})
export class TestComponent {}
"#;

    let result = Processor::default().preprocess(input, "test.component.ts");

    assert_eq!(
        serde_json::to_value(&result.documents).unwrap(),
        json!([
            input,
            {
                "text": "<h1>Hello, A!</h1>",
                "filename": "inline-template-test.component.ts-1.component.html"
            }
        ])
    );

    let record = result
        .session
        .recorder()
        .lookup("inline-template-test.component.ts-1.component.html")
        .unwrap();
    let start = input.find("'<h1>").unwrap();
    assert_eq!(record.byte_range, [start, start + "'<h1>Hello, A!</h1>'".len()]);
    assert_eq!(record.start.line, 4);
    assert_eq!(record.start.character, 12);
}

#[test]
fn two_declarations_in_source_order() {
    let input = r#"import { Component } from '@angular/core';

@Component({
  selector: 'app-test',
  template: '<h1>Hello, A!</h1>',
})
export class TestComponent {}

@Component({
  selector: 'app-test',
  template: '<h1>Hello, B!</h1>',
})
export class TestComponent2 {}
"#;

    let result = Processor::default().preprocess(input, "test.component.ts");

    assert_eq!(result.documents.len(), 3);
    assert_eq!(
        fragment_names(&result.documents),
        vec![
            "inline-template-test.component.ts-1.component.html",
            "inline-template-test.component.ts-2.component.html",
        ]
    );
    assert_eq!(result.documents[1].text(), "<h1>Hello, A!</h1>");
    assert_eq!(result.documents[2].text(), "<h1>Hello, B!</h1>");
}

#[test]
fn template_url_declarations_do_not_consume_a_number() {
    let result = Processor::default().preprocess(TWO, "fixtures/two.component.ts");

    assert_eq!(
        fragment_names(&result.documents),
        vec![
            "inline-template-two.component.ts-1.component.html",
            "inline-template-two.component.ts-2.component.html",
        ]
    );
    assert_eq!(result.documents[1].text(), "<h1>First</h1>");
    assert_eq!(result.documents[2].text(), "<p>{{ label }}</p>");
    assert_eq!(result.session.recorder().len(), 2);
}

#[test]
fn template_literal_content_is_cooked() {
    let result = Processor::default().preprocess(HELLO, "hello.component.ts");

    assert_eq!(result.documents.len(), 2);
    assert_eq!(
        result.documents[1].text(),
        "\n    <div>\n      <button (click)=\"go()\">Go</button>\n    </div>\n  "
    );

    let record = result
        .session
        .recorder()
        .lookup("inline-template-hello.component.ts-1.component.html")
        .unwrap();
    assert_eq!(record.start.line, 4);
    assert_eq!(record.end.line, 8);
    assert_eq!(&HELLO[record.byte_range[0]..record.byte_range[0] + 1], "`");
    assert_eq!(&HELLO[record.byte_range[1] - 1..record.byte_range[1]], "`");
}

#[test]
fn substitution_template_kept_verbatim() {
    let input = "import { Component } from '@angular/core';\nconst cls = 'x';\n@Component({ template: `<p class=\"${cls}\"></p>` })\nexport class A {}\n";
    let result = Processor::default().preprocess(input, "a.component.ts");

    assert_eq!(result.documents[1].text(), "`<p class=\"${cls}\"></p>`");
}

#[test]
fn nothing_to_extract() {
    let inputs = [
        ("export const x = 1;\n", "util.ts"),
        ("export const x = 1;\n", "util.component.ts"),
        (
            "import { Component } from '@angular/core';\n@Component({ templateUrl: './a.html' })\nexport class A {}\n",
            "a.component.ts",
        ),
        (
            "import { Component } from '@angular/core';\n@Component({ template: '<a></a>', templateUrl: './a.html' })\nexport class A {}\n",
            "a.component.ts",
        ),
    ];

    for (text, filename) in inputs {
        let result = Processor::default().preprocess(text, filename);
        assert_eq!(
            result.documents,
            vec![LintDocument::Host(text.to_string())],
            "{filename}: {text}"
        );
    }
}

#[test]
fn malformed_host_is_linted_as_plain_text() {
    let input = "import { Component } from '@angular/core';\n@Component({ template: '<a></a>' })\nexport class A {\n";
    let result = Processor::default().preprocess(input, "a.component.ts");

    assert_eq!(result.documents, vec![LintDocument::Host(input.to_string())]);
}

#[test]
fn token_heuristic_admits_unconventional_filenames() {
    let result = Processor::default().preprocess(HELLO, "hello.ts");
    assert_eq!(
        fragment_names(&result.documents),
        vec!["inline-template-hello.ts-1.component.html"]
    );
}

#[test]
fn configured_heuristic_can_reject() {
    let mut config = ProcessorConfig::default();
    config.heuristic.file_suffixes = vec![".view.ts".to_string()];
    config.heuristic.required_tokens = vec!["@View".to_string()];

    let result = Processor::new(config).preprocess(HELLO, "hello.component.ts");
    assert_eq!(result.documents.len(), 1);
}

#[test]
fn tsx_hosts_use_tsx_grammar() {
    let input = r#"import { Component } from '@angular/core';

const view = <div />;

@Component({ template: '<i></i>' })
export class A {}
"#;
    let result = Processor::default().preprocess(input, "a.component.tsx");
    assert_eq!(result.documents.len(), 2);
    assert_eq!(result.documents[1].text(), "<i></i>");
}
