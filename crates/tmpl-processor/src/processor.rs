//! The preprocess/postprocess pair exposed to lint engines.

use crate::config::ProcessorConfig;
use crate::diagnostic::Diagnostic;
use crate::document::{Fragment, LintDocument};
use crate::error::{ProcessorError, Result};
use crate::extract::{ExtractionOutcome, classify};
use crate::parser::{HostTree, parse_host};
use crate::relocate::relocate;
use crate::scanner::find_marked_declarations;
use crate::session::ExtractionSession;
use tmpl_source_map::Range;

/// Output of [`Processor::preprocess`].
#[derive(Debug)]
pub struct Preprocessed {
    /// `[host, fragment 1, ..., fragment n]`
    pub documents: Vec<LintDocument>,
    /// Pass to [`Processor::postprocess`] with the diagnostics of `documents`
    pub session: ExtractionSession,
}

/// A template ready to be emitted as a fragment.
#[derive(Debug)]
struct PendingFragment {
    text: String,
    span: Range,
    utf16_range: [usize; 2],
    content_offset: usize,
}

/// Splits host documents into lintable fragments and merges the results.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Produce the documents to lint for one host file.
    ///
    /// The host text always comes first. Each extracted template follows in
    /// declaration order under its synthetic name. Files that fail the
    /// heuristic, fail to parse or contain no usable template yield just the
    /// host text.
    pub fn preprocess(&self, text: &str, filename: &str) -> Preprocessed {
        let mut session = ExtractionSession::new(filename, &self.config.fragment_suffix);
        let mut documents = vec![LintDocument::Host(text.to_string())];

        if !self.config.heuristic.is_likely_candidate(text, filename) {
            return Preprocessed { documents, session };
        }

        match self.extract(text, filename) {
            Ok(extracted) => {
                for (position, fragment) in extracted.into_iter().enumerate() {
                    let name = session.synthetic_name(position + 1);
                    session.recorder_mut().record(
                        name.clone(),
                        fragment.span,
                        fragment.utf16_range,
                        fragment.content_offset,
                    );
                    documents.push(LintDocument::Fragment(Fragment {
                        text: fragment.text,
                        filename: name,
                    }));
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = filename,
                    error = %e,
                    "Could not extract inline templates; linting host text only"
                );
            }
        }

        Preprocessed { documents, session }
    }

    /// Merge the diagnostics of every document from [`Self::preprocess`]
    /// into host-file diagnostics. Consumes the session.
    pub fn postprocess(
        &self,
        diagnostics: Vec<Vec<Diagnostic>>,
        session: ExtractionSession,
    ) -> Vec<Diagnostic> {
        relocate(diagnostics, &session, &self.config.relocation)
    }

    /// Every extractable template, or an error if the host cannot be parsed.
    /// Nothing is recorded on error.
    fn extract(&self, text: &str, filename: &str) -> Result<Vec<PendingFragment>> {
        let tree = parse_host(text, filename)?;
        let mut extracted = Vec::new();

        for declaration in find_marked_declarations(&tree, &self.config.marker) {
            match classify(&tree, &declaration)? {
                ExtractionOutcome::Extracted(template) => {
                    extracted.push(PendingFragment {
                        utf16_range: utf16_range(&tree, &template.span)?,
                        content_offset: template.kind.content_offset(),
                        text: template.text,
                        span: template.span,
                    });
                }
                skipped => {
                    let at = declaration.call.start_position();
                    tracing::debug!(
                        path = filename,
                        row = at.row,
                        outcome = ?skipped,
                        "Skipping marked declaration"
                    );
                }
            }
        }

        Ok(extracted)
    }
}

fn utf16_range(tree: &HostTree, span: &Range) -> Result<[usize; 2]> {
    let index = tree.line_index();
    let convert = |offset| {
        index
            .utf16_offset(offset)
            .ok_or(ProcessorError::Locate { offset })
    };
    Ok([convert(span.start.offset)?, convert(span.end.offset)?])
}
