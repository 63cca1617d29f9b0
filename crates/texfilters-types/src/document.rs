/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde_json::{Map, Value};

/// Top-level JSON shape a document was read from, so it is written back the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Envelope {
    /// `{"pandoc-api-version": [...], "meta": {...}, "blocks": [...]}`
    #[default]
    Object,
    /// `[{"unMeta": {...}}, [...]]`, written by pandoc before 1.18.
    Legacy,
}

/// A Pandoc document with its blocks kept as raw JSON.
///
/// Filters only rewrite the node shapes they know; everything else passes
/// through untouched, so blocks are not decoded into a typed tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub api_version: Option<Value>,
    pub meta: Value,
    pub blocks: Vec<Value>,
    pub envelope: Envelope,
}

impl Document {
    pub fn new(blocks: Vec<Value>) -> Self {
        Document {
            api_version: None,
            meta: Value::Object(Map::new()),
            blocks,
            envelope: Envelope::Object,
        }
    }

    /// Major/minor pandoc-types API version, if the document declares one.
    pub fn api_version(&self) -> Option<(u64, u64)> {
        let parts = self.api_version.as_ref()?.as_array()?;
        let major = parts.first()?.as_u64()?;
        let minor = parts.get(1).and_then(Value::as_u64).unwrap_or(0);
        Some((major, minor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_version() {
        let mut doc = Document::new(vec![]);
        assert_eq!(doc.api_version(), None);
        doc.api_version = Some(json!([1, 23, 1]));
        assert_eq!(doc.api_version(), Some((1, 23)));
        doc.api_version = Some(json!([1]));
        assert_eq!(doc.api_version(), Some((1, 0)));
    }
}
