//! Offset to line/column lookups over a borrowed document

use crate::types::{Location, Range};

/// Line start index for a document.
///
/// Scans the content once to record where every line begins, so that
/// converting a byte offset into a [`Location`] is a binary search plus a
/// scan of a single line. Columns are counted in UTF-16 code units, matching
/// the `character` convention used by editors and lint engines.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of the first character of each line
    line_starts: Vec<usize>,
    /// UTF-16 offset of the first character of each line
    line_starts_utf16: Vec<usize>,
}

/// Line terminators recognized by ECMAScript: `\n`, `\r`, `\u{2028}` and
/// `\u{2029}`. `\r\n` counts as one.
fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl<'a> LineIndex<'a> {
    /// Build the index for `text`.
    ///
    /// # Example
    ///
    /// ```
    /// use tmpl_source_map::LineIndex;
    ///
    /// let index = LineIndex::new("hello\nworld");
    /// assert_eq!(index.line_count(), 2);
    /// ```
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        let mut line_starts_utf16 = vec![0];
        let mut utf16 = 0;

        let mut chars = text.char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            utf16 += ch.len_utf16();
            if !is_line_terminator(ch) {
                continue;
            }
            // The line of a `\r\n` pair starts after the `\n`
            if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                continue;
            }
            line_starts.push(idx + ch.len_utf8());
            line_starts_utf16.push(utf16);
        }

        LineIndex {
            text,
            line_starts,
            line_starts_utf16,
        }
    }

    /// Convert a byte offset to a [`Location`].
    ///
    /// Returns None if the offset is past the end of the text or does not
    /// fall on a character boundary.
    pub fn locate(&self, offset: usize) -> Option<Location> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return None;
        }

        // line_starts[0] == 0, so the partition point is always >= 1
        let row = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[row];

        let column = self.text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();

        Some(Location {
            offset,
            row,
            column,
        })
    }

    /// Convert a byte offset to an offset in UTF-16 code units, the unit
    /// JavaScript string indices use.
    pub fn utf16_offset(&self, offset: usize) -> Option<usize> {
        let loc = self.locate(offset)?;
        Some(self.line_starts_utf16[loc.row] + loc.column)
    }

    /// Convert a pair of byte offsets to a [`Range`].
    pub fn range(&self, start: usize, end: usize) -> Option<Range> {
        Some(Range {
            start: self.locate(start)?,
            end: self.locate(end)?,
        })
    }

    /// Number of lines in the document (a trailing newline opens an empty line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The indexed text
    pub fn text(&self) -> &'a str {
        self.text
    }
}
