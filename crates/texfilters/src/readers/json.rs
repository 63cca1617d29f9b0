/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::errors::DocumentError;
use crate::utils::inlines::stringify;
use serde_json::{Map, Value};
use texfilters_types::{Document, Envelope};

type Result<T> = std::result::Result<T, DocumentError>;

pub fn read<R: std::io::Read>(reader: &mut R) -> Result<Document> {
    let json: Value = serde_json::from_reader(reader)?;
    read_document(json)
}

/// Split a parsed JSON value into a [`Document`].
///
/// Accepts the current object form and the pre-1.18 `[{"unMeta": ..}, blocks]`
/// pair.
pub fn read_document(value: Value) -> Result<Document> {
    match value {
        Value::Object(mut obj) => {
            let blocks = match obj.remove("blocks") {
                Some(Value::Array(blocks)) => blocks,
                Some(_) => return Err(DocumentError::NotADocument("`blocks` must be an array")),
                None => return Err(DocumentError::NotADocument("missing `blocks`")),
            };
            let meta = obj
                .remove("meta")
                .unwrap_or_else(|| Value::Object(Map::new()));
            Ok(Document {
                api_version: obj.remove("pandoc-api-version"),
                meta,
                blocks,
                envelope: Envelope::Object,
            })
        }
        Value::Array(mut items) if items.len() == 2 => {
            let blocks = match items.pop() {
                Some(Value::Array(blocks)) => blocks,
                _ => return Err(DocumentError::NotADocument("blocks must be an array")),
            };
            let meta = items
                .pop()
                .and_then(|mut head| head.get_mut("unMeta").map(Value::take))
                .unwrap_or_else(|| Value::Object(Map::new()));
            Ok(Document {
                api_version: None,
                meta,
                blocks,
                envelope: Envelope::Legacy,
            })
        }
        _ => Err(DocumentError::NotADocument(
            "expected an object or a [meta, blocks] pair",
        )),
    }
}

/// Read a metadata entry as a string.
///
/// Understands `MetaString`, `MetaBool`, `MetaInlines`/`MetaBlocks` (their
/// plain text) and bare JSON scalars.
pub fn meta_scalar(meta: &Value, key: &str) -> Option<String> {
    let entry = meta.get(key)?;
    let tag = entry.get("t").and_then(Value::as_str);
    let content = entry.get("c");
    match (tag, content) {
        (Some("MetaString"), Some(Value::String(s))) => Some(s.clone()),
        (Some("MetaBool"), Some(Value::Bool(b))) => Some(b.to_string()),
        (Some("MetaInlines"), Some(inlines)) => Some(stringify(inlines).trim().to_string()),
        (Some("MetaBlocks"), Some(Value::Array(blocks))) => {
            let text = blocks
                .iter()
                .filter_map(|block| block.get("c"))
                .map(stringify)
                .collect::<Vec<_>>()
                .join(" ");
            Some(text.trim().to_string())
        }
        (Some(_), _) => None,
        (None, _) => match entry {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        },
    }
}
