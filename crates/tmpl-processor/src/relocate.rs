//! Mapping fragment diagnostics back into host document coordinates.

use crate::config::{OffsetUnit, RelocationConfig};
use crate::diagnostic::Diagnostic;
use crate::session::{ExtractionRecord, ExtractionSession};

/// Merge per-document diagnostics into one list for the host file.
///
/// `diagnostics[0]` belongs to the host text and is kept as is; element `i`
/// belongs to the fragment named `session.synthetic_name(i)`. Fragment
/// diagnostics are shifted by the record's starting line, and fix ranges by
/// its starting offset in the configured unit. A fragment without a record loses its
/// diagnostics rather than reporting them at a wrong location.
pub fn relocate(
    diagnostics: Vec<Vec<Diagnostic>>,
    session: &ExtractionSession,
    config: &RelocationConfig,
) -> Vec<Diagnostic> {
    let mut arrays = diagnostics.into_iter();
    let Some(mut merged) = arrays.next() else {
        return Vec::new();
    };

    for (index, fragment_diagnostics) in arrays.enumerate() {
        let name = session.synthetic_name(index + 1);
        let Some(record) = session.recorder().lookup(&name) else {
            tracing::debug!(
                fragment = %name,
                dropped = fragment_diagnostics.len(),
                "No extraction record for fragment"
            );
            continue;
        };

        merged.extend(
            fragment_diagnostics
                .into_iter()
                .map(|diagnostic| rebase(diagnostic, record, config)),
        );
    }

    merged
}

/// Shift one fragment diagnostic into host coordinates.
pub fn rebase(
    mut diagnostic: Diagnostic,
    record: &ExtractionRecord,
    config: &RelocationConfig,
) -> Diagnostic {
    let first_line_shift = record.start.character + record.content_offset;

    if config.rebase_first_line_columns && diagnostic.line == 1 {
        diagnostic.column += first_line_shift;
    }
    diagnostic.line += record.start.line;

    if let Some(end_line) = diagnostic.end_line.as_mut() {
        if config.rebase_first_line_columns && *end_line == 1 {
            if let Some(end_column) = diagnostic.end_column.as_mut() {
                *end_column += first_line_shift;
            }
        }
        *end_line += record.start.line;
    }

    if let Some(fix) = diagnostic.fix.as_mut() {
        let start = match config.fix_range_unit {
            OffsetUnit::Bytes => record.byte_range[0],
            OffsetUnit::Utf16 => record.utf16_range[0],
        };
        fix.range = [fix.range[0] + start, fix.range[1] + start];
    }

    diagnostic
}
