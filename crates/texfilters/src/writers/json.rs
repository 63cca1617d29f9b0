/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::errors::DocumentError;
use serde::Serialize;
use serde_json::Value;
use texfilters_types::{Document, Envelope};

// Serde serializes struct fields in declaration order; this matches the key
// order pandoc itself writes.

#[derive(Serialize)]
struct PandocDocumentJson<'a> {
    #[serde(rename = "pandoc-api-version", skip_serializing_if = "Option::is_none")]
    pandoc_api_version: Option<&'a Value>,
    meta: &'a Value,
    blocks: &'a [Value],
}

#[derive(Serialize)]
struct LegacyMetaJson<'a> {
    #[serde(rename = "unMeta")]
    un_meta: &'a Value,
}

/// Serialize a document in the same envelope it was read from.
pub fn to_value(doc: &Document) -> Result<Value, DocumentError> {
    let value = match doc.envelope {
        Envelope::Object => serde_json::to_value(PandocDocumentJson {
            pandoc_api_version: doc.api_version.as_ref(),
            meta: &doc.meta,
            blocks: &doc.blocks,
        })?,
        Envelope::Legacy => serde_json::to_value((
            LegacyMetaJson { un_meta: &doc.meta },
            &doc.blocks,
        ))?,
    };
    Ok(value)
}

/// Write a document as one line of JSON.
pub fn write<W: std::io::Write>(doc: &Document, writer: &mut W) -> Result<(), DocumentError> {
    let value = to_value(doc)?;
    serde_json::to_writer(&mut *writer, &value)?;
    writeln!(writer)?;
    Ok(())
}
