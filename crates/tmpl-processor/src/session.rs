//! Extraction records and the sessions that own them.
//!
//! Every preprocess call opens an [`ExtractionSession`] holding one
//! [`ExtractionRecord`] per emitted fragment. The session travels to the
//! matching postprocess call, either directly or through a [`SessionStore`]
//! keyed by the host path, and is dropped once its diagnostics are relocated.

use crate::diagnostic::Diagnostic;
use crate::document::LintDocument;
use crate::processor::{Preprocessed, Processor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tmpl_source_map::{LineCol, Range};

/// Where a fragment came from in the host document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    pub synthetic_name: String,
    /// Byte offsets of the whole literal, delimiters included
    pub byte_range: [usize; 2],
    /// The same range in UTF-16 code units
    #[serde(rename = "utf16Range")]
    pub utf16_range: [usize; 2],
    #[serde(rename = "startLineCol")]
    pub start: LineCol,
    #[serde(rename = "endLineCol")]
    pub end: LineCol,
    /// Bytes between `byte_range[0]` and the first byte of fragment text
    pub content_offset: usize,
}

/// Storage for extraction records, keyed by synthetic name.
#[derive(Debug, Clone, Default)]
pub struct RangeRecorder {
    records: HashMap<String, ExtractionRecord>,
}

impl RangeRecorder {
    /// Store the origin of a fragment. A later record with the same name
    /// replaces the earlier one.
    pub fn record(
        &mut self,
        synthetic_name: impl Into<String>,
        span: Range,
        utf16_range: [usize; 2],
        content_offset: usize,
    ) {
        let synthetic_name = synthetic_name.into();
        self.records.insert(
            synthetic_name.clone(),
            ExtractionRecord {
                synthetic_name,
                byte_range: span.byte_range(),
                utf16_range,
                start: span.start.into(),
                end: span.end.into(),
                content_offset,
            },
        );
    }

    pub fn lookup(&self, synthetic_name: &str) -> Option<&ExtractionRecord> {
        self.records.get(synthetic_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Identifier of a preprocess call; strictly increasing within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

impl SessionId {
    fn next() -> Self {
        SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// State carried from one preprocess call to its postprocess call.
#[derive(Debug, Clone)]
pub struct ExtractionSession {
    id: SessionId,
    host_path: PathBuf,
    basename: String,
    fragment_suffix: String,
    recorder: RangeRecorder,
}

impl ExtractionSession {
    pub fn new(host_path: &str, fragment_suffix: &str) -> Self {
        Self {
            id: SessionId::next(),
            host_path: PathBuf::from(host_path),
            basename: host_basename(host_path),
            fragment_suffix: fragment_suffix.to_string(),
            recorder: RangeRecorder::default(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn host_path(&self) -> &Path {
        &self.host_path
    }

    /// Synthetic name of the `position`-th fragment (1-based).
    pub fn synthetic_name(&self, position: usize) -> String {
        synthetic_name(&self.basename, position, &self.fragment_suffix)
    }

    pub fn recorder(&self) -> &RangeRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut RangeRecorder {
        &mut self.recorder
    }
}

/// `inline-template-<basename>-<position>.<suffix>`
pub fn synthetic_name(basename: &str, position: usize, suffix: &str) -> String {
    format!("inline-template-{basename}-{position}.{suffix}")
}

/// Final path component of `path`, or the whole string if it has none.
pub fn host_basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |name| name.to_string_lossy().into_owned())
}

/// Pending sessions for lint engines that only hand the filename back to
/// postprocess.
///
/// Sessions are keyed by the full host path and their [`SessionId`], so two
/// files sharing a basename never see each other's records. Repeated
/// preprocess calls for the same path are matched first-in, first-out.
#[derive(Debug, Default)]
pub struct SessionStore {
    pending: BTreeMap<(PathBuf, SessionId), ExtractionSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preprocess `text` and keep its session until [`Self::postprocess`].
    pub fn preprocess(
        &mut self,
        processor: &Processor,
        text: &str,
        filename: &str,
    ) -> Vec<LintDocument> {
        let Preprocessed { documents, session } = processor.preprocess(text, filename);
        if !session.recorder().is_empty() {
            self.pending
                .insert((session.host_path.clone(), session.id), session);
        }
        documents
    }

    /// Relocate diagnostics for `filename` and evict its oldest pending
    /// session.
    pub fn postprocess(
        &mut self,
        processor: &Processor,
        diagnostics: Vec<Vec<Diagnostic>>,
        filename: &str,
    ) -> Vec<Diagnostic> {
        match self.take(Path::new(filename)) {
            Some(session) => processor.postprocess(diagnostics, session),
            None => {
                if diagnostics.len() > 1 {
                    tracing::debug!(
                        path = filename,
                        "No pending extraction session; dropping fragment diagnostics"
                    );
                }
                diagnostics.into_iter().next().unwrap_or_default()
            }
        }
    }

    /// Number of sessions waiting for postprocess
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn take(&mut self, path: &Path) -> Option<ExtractionSession> {
        let key = self
            .pending
            .range((path.to_path_buf(), SessionId(0))..=(path.to_path_buf(), SessionId(u64::MAX)))
            .next()
            .map(|(key, _)| key.clone())?;
        self.pending.remove(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmpl_source_map::Location;

    fn span(start: (usize, usize, usize), end: (usize, usize, usize)) -> Range {
        Range {
            start: Location {
                offset: start.0,
                row: start.1,
                column: start.2,
            },
            end: Location {
                offset: end.0,
                row: end.1,
                column: end.2,
            },
        }
    }

    #[test]
    fn test_synthetic_name() {
        assert_eq!(
            synthetic_name("test.component.ts", 1, "component.html"),
            "inline-template-test.component.ts-1.component.html"
        );
    }

    #[test]
    fn test_host_basename() {
        assert_eq!(host_basename("src/app/app.component.ts"), "app.component.ts");
        assert_eq!(host_basename("app.component.ts"), "app.component.ts");
        assert_eq!(host_basename(""), "");
    }

    #[test]
    fn test_record_and_lookup() {
        let mut recorder = RangeRecorder::default();
        recorder.record("a-1", span((10, 1, 4), (30, 3, 2)), [10, 30], 1);

        let record = recorder.lookup("a-1").unwrap();
        assert_eq!(record.byte_range, [10, 30]);
        assert_eq!(record.start, LineCol { line: 1, character: 4 });
        assert_eq!(record.end, LineCol { line: 3, character: 2 });
        assert!(recorder.lookup("a-2").is_none());
    }

    #[test]
    fn test_record_overwrites_same_name() {
        let mut recorder = RangeRecorder::default();
        recorder.record("a-1", span((10, 1, 4), (30, 3, 2)), [10, 30], 1);
        recorder.record("a-1", span((50, 5, 0), (60, 5, 10)), [50, 60], 1);

        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.lookup("a-1").unwrap().byte_range, [50, 60]);
    }

    #[test]
    fn test_session_ids_increase() {
        let first = ExtractionSession::new("a.ts", "component.html");
        let second = ExtractionSession::new("a.ts", "component.html");
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_session_names_use_basename() {
        let session = ExtractionSession::new("src/deep/x.component.ts", "component.html");
        assert_eq!(
            session.synthetic_name(3),
            "inline-template-x.component.ts-3.component.html"
        );
        assert_eq!(session.host_path(), Path::new("src/deep/x.component.ts"));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut recorder = RangeRecorder::default();
        recorder.record("n", span((1, 0, 1), (4, 0, 4)), [1, 4], 1);

        let json = serde_json::to_value(recorder.lookup("n").unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "syntheticName": "n",
                "byteRange": [1, 4],
                "utf16Range": [1, 4],
                "startLineCol": { "line": 0, "character": 1 },
                "endLineCol": { "line": 0, "character": 4 },
                "contentOffset": 1
            })
        );
    }
}
