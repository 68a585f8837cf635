//! Inline template processing for lint engines.
//!
//! Component declarations often carry their markup inline:
//!
//! ```typescript
//! @Component({
//!   selector: 'app-hello',
//!   template: '<h1>Hello, {{ name }}!</h1>',
//! })
//! export class HelloComponent {}
//! ```
//!
//! Markup lint rules need that template as a document of its own. This crate
//! provides the two halves of a lint engine processor:
//!
//! - **preprocess** splits a host file into the host text plus one synthetic
//!   fragment document per inline template, named
//!   `inline-template-<basename>-<n>.component.html`;
//! - **postprocess** takes the diagnostics of every document and maps the
//!   fragment ones back to lines and byte offsets in the host file.
//!
//! # Pipeline
//!
//! ```text
//! heuristic ─▶ parser ─▶ scanner ─▶ extract ─▶ session (records)
//!                                                   │
//!       lint engine lints every emitted document    │
//!                                                   ▼
//!                                               relocate
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use tmpl_processor::{Processor, ProcessorConfig};
//!
//! let processor = Processor::new(ProcessorConfig::default());
//! let preprocessed = processor.preprocess(&text, "app.component.ts");
//!
//! let diagnostics = preprocessed
//!     .documents
//!     .iter()
//!     .map(|doc| lint(doc.text(), doc.filename()))
//!     .collect();
//!
//! let merged = processor.postprocess(diagnostics, preprocessed.session);
//! ```
//!
//! Engines that only pass the filename back to postprocess can park sessions
//! in a [`SessionStore`].

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod extract;
pub mod heuristic;
pub mod literal;
pub mod parser;
pub mod processor;
pub mod relocate;
pub mod scanner;
pub mod session;

// Re-export main types for convenience
pub use config::{HeuristicConfig, OffsetUnit, ProcessorConfig, RelocationConfig};
pub use diagnostic::{Diagnostic, Fix};
pub use document::{Fragment, LintDocument};
pub use error::{ConfigError, ProcessorError, Result};
pub use extract::{ExtractedTemplate, ExtractionOutcome, MalformedReason, TemplateKind, classify};
pub use parser::{HostLanguage, HostTree, parse_host};
pub use processor::{Preprocessed, Processor};
pub use relocate::relocate;
pub use scanner::{MarkedDeclaration, find_marked_declarations};
pub use session::{ExtractionRecord, ExtractionSession, RangeRecorder, SessionId, SessionStore};
