/*
 * inlines.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde_json::Value;

/// Plain text of a JSON inline list, in the spirit of pandoc's `stringify`.
///
/// Markup is dropped; breaks become single spaces. Non-inline values yield
/// an empty string.
pub fn stringify(inlines: &Value) -> String {
    let mut out = String::new();
    push_inlines(inlines, &mut out);
    out
}

fn push_inlines(value: &Value, out: &mut String) {
    let Some(items) = value.as_array() else {
        return;
    };
    for item in items {
        push_inline(item, out);
    }
}

fn push_inline(value: &Value, out: &mut String) {
    let kind = value.get("t").and_then(Value::as_str).unwrap_or("");
    let content = value.get("c");
    match (kind, content) {
        ("Str", Some(Value::String(text))) => out.push_str(text),
        ("Space" | "SoftBreak" | "LineBreak", _) => out.push(' '),
        // [attr, text] and [mathtype, text]
        ("Code" | "Math", Some(Value::Array(parts))) => {
            if let Some(text) = parts.get(1).and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        ("Emph" | "Underline" | "Strong" | "Strikeout" | "Superscript" | "Subscript"
        | "SmallCaps", Some(inner)) => push_inlines(inner, out),
        // content is the last element of [.., inlines] / [.., inlines, target]
        ("Quoted" | "Span" | "Cite", Some(Value::Array(parts))) => {
            if let Some(inner) = parts.last() {
                push_inlines(inner, out);
            }
        }
        ("Link" | "Image", Some(Value::Array(parts))) => {
            if let Some(inner) = parts.get(1) {
                push_inlines(inner, out);
            }
        }
        _ => {}
    }
}
