/*
 * attr.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde_json::Value;

/// Pandoc attributes: `(identifier, classes, key-value pairs)`.
///
/// Pandoc JSON encodes the pairs as a list of two-element arrays, so they are
/// kept as a `Vec` to round-trip in document order.
pub type Attr = (String, Vec<String>, Vec<(String, String)>);

/// Decode an `Attr` from its JSON triple, or `None` if the shape is wrong.
pub fn read_attr(value: &Value) -> Option<Attr> {
    let parts = value.as_array()?;
    let [id, classes, pairs] = parts.as_slice() else {
        return None;
    };
    let id = id.as_str()?.to_string();
    let classes = classes
        .as_array()?
        .iter()
        .map(|c| c.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;
    let pairs = pairs
        .as_array()?
        .iter()
        .map(|pair| match pair.as_array()?.as_slice() {
            [k, v] => Some((k.as_str()?.to_string(), v.as_str()?.to_string())),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some((id, classes, pairs))
}

pub fn attr_to_value(attr: &Attr) -> Value {
    let (id, classes, pairs) = attr;
    Value::Array(vec![
        Value::String(id.clone()),
        Value::Array(classes.iter().cloned().map(Value::String).collect()),
        Value::Array(
            pairs
                .iter()
                .map(|(k, v)| Value::Array(vec![Value::String(k.clone()), Value::String(v.clone())]))
                .collect(),
        ),
    ])
}
