/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc JSON node model for texfilters.
 *
 * This crate provides pure data type definitions: the tagged tree node
 * used at the filter boundary, Pandoc attributes, the document envelope,
 * and the canonical table representation that both Table schema
 * revisions are normalized into. It does no I/O.
 */

pub mod attr;
pub mod document;
pub mod node;
pub mod table;

// Re-export commonly used types at the crate root
pub use attr::{Attr, attr_to_value, read_attr};
pub use document::{Document, Envelope};
pub use node::{Inlines, LATEX, Node, kind};
pub use table::{Alignment, Cell, ColSpec, ColWidth, Row, Table};
