/*
 * filter_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Context for filter execution: invocation parameters and diagnostics.

use crate::readers::json::meta_scalar;
use crate::utils::diagnostic_collector::{Diagnostic, DiagnosticCollector};
use serde_json::{Map, Value};
use texfilters_types::Document;

/// Context for filter execution.
///
/// Carries the target format and document metadata that pandoc hands every
/// JSON filter, and collects warnings raised along the way. It is threaded
/// through the walk next to the filter itself.
pub struct FilterContext {
    /// Output format pandoc is writing, e.g. `latex`
    pub format: String,
    /// Document metadata, read-only for filters
    pub meta: Value,
    /// Accumulated warnings
    pub diagnostics: DiagnosticCollector,
}

impl FilterContext {
    pub fn new(format: impl Into<String>, meta: Value) -> Self {
        Self {
            format: format.into(),
            meta,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    pub fn for_document(format: impl Into<String>, doc: &Document) -> Self {
        Self::new(format, doc.meta.clone())
    }

    /// Metadata entry `key` as a string, if it is a scalar.
    pub fn meta_string(&self, key: &str) -> Option<String> {
        meta_scalar(&self.meta, key)
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.warn(message);
    }

    /// Add a warning tied to a JSON pointer into the document
    pub fn warn_at(&mut self, message: impl Into<String>, path: impl Into<String>) {
        self.diagnostics.warn_at(message, path);
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_diagnostics()
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new("latex", Value::Object(Map::new()))
    }
}
