/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Kind tags of the nodes the filters read or build.
pub mod kind {
    pub const TABLE: &str = "Table";
    pub const HEADER: &str = "Header";
    pub const PARA: &str = "Para";
    pub const PLAIN: &str = "Plain";
    pub const RAW_BLOCK: &str = "RawBlock";
    pub const RAW_INLINE: &str = "RawInline";
    pub const STR: &str = "Str";
    pub const SPACE: &str = "Space";
    pub const NULL: &str = "Null";
}

/// Raw format of every verbatim fragment the filters emit.
pub const LATEX: &str = "latex";

/// One element of the Pandoc JSON tree, `{"t": kind, "c": payload}`.
///
/// Nullary nodes such as `Space` have no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "t")]
    pub kind: String,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

pub type Inlines = Vec<Node>;

impl Node {
    pub fn new(kind: impl Into<String>, content: Value) -> Self {
        Node {
            kind: kind.into(),
            content: Some(content),
        }
    }

    pub fn nullary(kind: impl Into<String>) -> Self {
        Node {
            kind: kind.into(),
            content: None,
        }
    }

    /// Read a node out of a JSON value.
    ///
    /// Returns `None` unless the value is an object with a string `t` field.
    pub fn from_value(value: &Value) -> Option<Node> {
        let obj = value.as_object()?;
        let kind = obj.get("t")?.as_str()?;
        Some(Node {
            kind: kind.to_string(),
            content: obj.get("c").cloned(),
        })
    }

    pub fn into_value(self) -> Value {
        let mut obj = Map::new();
        obj.insert("t".to_string(), Value::String(self.kind));
        if let Some(content) = self.content {
            obj.insert("c".to_string(), content);
        }
        Value::Object(obj)
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn raw_block(format: &str, text: impl Into<String>) -> Self {
        Node::new(kind::RAW_BLOCK, json!([format, text.into()]))
    }

    pub fn raw_inline(format: &str, text: impl Into<String>) -> Self {
        Node::new(kind::RAW_INLINE, json!([format, text.into()]))
    }

    pub fn latex_block(text: impl Into<String>) -> Self {
        Node::raw_block(LATEX, text)
    }

    pub fn latex_inline(text: impl Into<String>) -> Self {
        Node::raw_inline(LATEX, text)
    }

    pub fn str(text: impl Into<String>) -> Self {
        Node::new(kind::STR, Value::String(text.into()))
    }

    pub fn space() -> Self {
        Node::nullary(kind::SPACE)
    }

    pub fn para(content: Inlines) -> Self {
        Node::new(kind::PARA, inlines_to_value(content))
    }

    pub fn plain(content: Inlines) -> Self {
        Node::new(kind::PLAIN, inlines_to_value(content))
    }

    /// `(format, text)` of a `RawBlock` or `RawInline`.
    pub fn raw_parts(&self) -> Option<(&str, &str)> {
        if !self.is(kind::RAW_BLOCK) && !self.is(kind::RAW_INLINE) {
            return None;
        }
        let parts = self.content.as_ref()?.as_array()?;
        match parts.as_slice() {
            [format, text] => Some((format.as_str()?, text.as_str()?)),
            _ => None,
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Value {
        node.into_value()
    }
}

fn inlines_to_value(content: Inlines) -> Value {
    Value::Array(content.into_iter().map(Node::into_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_reads_kind_and_payload() {
        let value = json!({"t": "Str", "c": "hello"});
        let node = Node::from_value(&value).unwrap();
        assert_eq!(node.kind, "Str");
        assert_eq!(node.content, Some(json!("hello")));
    }

    #[test]
    fn test_from_value_nullary() {
        let node = Node::from_value(&json!({"t": "Space"})).unwrap();
        assert_eq!(node, Node::space());
        assert!(node.content.is_none());
    }

    #[test]
    fn test_from_value_rejects_non_nodes() {
        assert!(Node::from_value(&json!("Str")).is_none());
        assert!(Node::from_value(&json!({"c": 1})).is_none());
        assert!(Node::from_value(&json!({"t": 3})).is_none());
        assert!(Node::from_value(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_into_value_omits_missing_payload() {
        assert_eq!(Node::space().into_value(), json!({"t": "Space"}));
    }

    #[test]
    fn test_raw_builders() {
        assert_eq!(
            Node::latex_block("\\toprule").into_value(),
            json!({"t": "RawBlock", "c": ["latex", "\\toprule"]})
        );
        assert_eq!(
            Node::raw_inline("tex", "&").into_value(),
            json!({"t": "RawInline", "c": ["tex", "&"]})
        );
    }

    #[test]
    fn test_raw_parts() {
        let node = Node::latex_inline("&");
        assert_eq!(node.raw_parts(), Some(("latex", "&")));
        assert_eq!(Node::str("x").raw_parts(), None);
    }

    #[test]
    fn test_para_wraps_inlines() {
        let para = Node::para(vec![Node::str("a"), Node::space(), Node::str("b")]);
        assert_eq!(
            para.into_value(),
            json!({"t": "Para", "c": [
                {"t": "Str", "c": "a"},
                {"t": "Space"},
                {"t": "Str", "c": "b"}
            ]})
        );
    }

    #[test]
    fn test_serde_matches_manual_conversion() {
        let node = Node::plain(vec![Node::str("x")]);
        let via_serde = serde_json::to_value(&node).unwrap();
        assert_eq!(via_serde, node.clone().into_value());
        let back: Node = serde_json::from_value(via_serde).unwrap();
        assert_eq!(back, node);
    }
}
