//! Source locations for host documents
//!
//! This crate provides the location types shared by the inline template
//! processor and a [`LineIndex`] that converts byte offsets in a host
//! document into row/column positions.
//!
//! # Example
//!
//! ```rust
//! use tmpl_source_map::*;
//!
//! let index = LineIndex::new("@Component({\n  template: 'x',\n})");
//! let loc = index.locate(25).unwrap();
//! assert_eq!(loc.row, 1);
//! assert_eq!(loc.column, 12);
//! ```

pub mod line_index;
pub mod types;

pub use line_index::LineIndex;
pub use types::{LineCol, Location, Range};
