//! Core location types

use serde::{Deserialize, Serialize};

/// A location in source text (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Byte offset from start of source
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in UTF-16 code units)
    pub column: usize,
}

/// A range in source text from start to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Start location (inclusive)
    pub start: Location,
    /// End location (exclusive)
    pub end: Location,
}

impl Range {
    /// Byte offsets covered by this range as `[start, end]`.
    pub fn byte_range(&self) -> [usize; 2] {
        [self.start.offset, self.end.offset]
    }
}

/// A line/character pair without the byte offset.
///
/// Serialized as `{ "line": .., "character": .. }`, the shape lint engines
/// expect for positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct LineCol {
    /// Zero-based line
    pub line: usize,
    /// Zero-based character (UTF-16 code units)
    pub character: usize,
}

impl From<Location> for LineCol {
    fn from(loc: Location) -> Self {
        LineCol {
            line: loc.row,
            character: loc.column,
        }
    }
}
