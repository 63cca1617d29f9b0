/*
 * errors.rs
 * Copyright (c) 2025 Posit, PBC
 */

use thiserror::Error;

/// A node payload whose shape matches none of the supported schemas.
///
/// Raised by the table decoders and propagated unchanged; the walker attaches
/// the node position (see [`FilterError`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralMismatch {
    #[error("{what} must be {expected}")]
    InvalidType {
        what: &'static str,
        expected: &'static str,
    },

    #[error("{what} must have {expected} elements, found {found}")]
    Arity {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(
        "Table payload has {found} elements, expected 5 (pandoc-types < 1.21) or 6 (pandoc-types >= 1.21)"
    )]
    UnknownSchema { found: usize },

    #[error("unknown {what} `{tag}`")]
    UnknownTag { what: &'static str, tag: String },

    #[error("table has no columns")]
    NoColumns,

    #[error("{section} row {row} has {found} cells, expected {expected}")]
    ColumnCount {
        section: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell spans {row_span} rows and {col_span} columns; spanning cells are not supported")]
    SpanningCell { row_span: u64, col_span: u64 },

    #[error("{what} contains a `{kind}` block, which cannot be set inside a tabu cell")]
    UnsupportedBlock { what: &'static str, kind: String },
}

/// A filter failed on one node of the document.
#[derive(Debug, Error)]
pub enum FilterError {
    /// `ordinal` counts nodes of the same kind in document order, from 1.
    #[error("{kind} #{ordinal} at {path}")]
    Node {
        kind: String,
        ordinal: usize,
        path: String,
        #[source]
        error: StructuralMismatch,
    },
}

impl FilterError {
    pub fn mismatch(&self) -> &StructuralMismatch {
        match self {
            FilterError::Node { error, .. } => error,
        }
    }
}

/// Reading or writing the document stream.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not a Pandoc JSON document: {0}")]
    NotADocument(&'static str),
}
