/*
 * heading_labels.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Section labels for LaTeX output.
//!
//! Headings deeper than the configured depth are made unnumbered and lose
//! their identifier, so LaTeX sets them as starred sections without a
//! `\label`. Headings within the depth get identifiers derived from their
//! section number (`sec-2.1`).

use crate::errors::StructuralMismatch;
use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn};
use serde_json::{Value, json};
use texfilters_types::{Attr, Node, attr_to_value, kind, read_attr};

pub const DEFAULT_DEPTH: usize = 2;
/// Pandoc has six heading levels; deeper numbering is never produced.
pub const MAX_DEPTH: usize = 6;
pub const UNNUMBERED_CLASS: &str = "unnumbered";

/// Hierarchical section numbers, advanced heading by heading.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SectionCounter {
    counters: Vec<usize>,
}

impl SectionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a heading at `level` (1-based); deeper counters restart.
    pub fn advance(&mut self, level: usize) {
        if self.counters.len() < level {
            self.counters.resize(level, 0);
        }
        self.counters[level - 1] += 1;
        self.counters.truncate(level);
    }

    /// Identifier for the current section at `level`, e.g. `sec-1.2`.
    pub fn label(&self, level: usize) -> String {
        let numbers: Vec<String> = (0..level)
            .map(|i| self.counters.get(i).copied().unwrap_or(0).to_string())
            .collect();
        format!("sec-{}", numbers.join("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingOptions {
    /// Deepest heading level that stays numbered
    pub depth: usize,
    /// Replace identifiers of numbered headings with `sec-` labels
    pub renumber: bool,
}

impl Default for HeadingOptions {
    fn default() -> Self {
        HeadingOptions {
            depth: DEFAULT_DEPTH,
            renumber: true,
        }
    }
}

pub struct HeadingLabelFilter {
    options: HeadingOptions,
    counter: SectionCounter,
}

impl HeadingLabelFilter {
    /// Depths above [`MAX_DEPTH`] are clamped to it.
    pub fn new(options: HeadingOptions) -> Self {
        HeadingLabelFilter {
            options: HeadingOptions {
                depth: options.depth.min(MAX_DEPTH),
                ..options
            },
            counter: SectionCounter::new(),
        }
    }

    fn relabel(&mut self, payload: &Value) -> Result<Option<Node>, StructuralMismatch> {
        let (level, mut attr, inlines) = read_header(payload)?;
        let (id, classes, _) = &attr;

        if level > self.options.depth {
            if id.is_empty() && classes.iter().any(|c| c == UNNUMBERED_CLASS) {
                return Ok(None);
            }
            tracing::debug!(level, id = %id, "unnumbering heading");
            attr.0.clear();
            if !attr.1.iter().any(|c| c == UNNUMBERED_CLASS) {
                attr.1.push(UNNUMBERED_CLASS.to_string());
            }
            return Ok(Some(header_node(level, &attr, inlines)));
        }

        if is_unnumbered(&attr) || !self.options.renumber {
            return Ok(None);
        }
        self.counter.advance(level);
        let label = self.counter.label(level);
        if attr.0 == label {
            return Ok(None);
        }
        tracing::debug!(level, from = %attr.0, to = %label, "relabelling heading");
        attr.0 = label;
        Ok(Some(header_node(level, &attr, inlines)))
    }
}

impl Filter for HeadingLabelFilter {
    fn name(&self) -> &'static str {
        "headings"
    }

    fn filter_node(
        &mut self,
        node_kind: &str,
        payload: &Value,
        _ctx: &mut FilterContext,
    ) -> Result<FilterReturn, StructuralMismatch> {
        if node_kind != kind::HEADER {
            return Ok(FilterReturn::Unchanged);
        }
        Ok(match self.relabel(payload)? {
            Some(node) => FilterReturn::FilterResult(vec![node], false),
            None => FilterReturn::Unchanged,
        })
    }
}

// Header: [level, attr, [Inline]]
fn read_header(payload: &Value) -> Result<(usize, Attr, &Value), StructuralMismatch> {
    let parts = payload.as_array().ok_or(StructuralMismatch::InvalidType {
        what: "Header payload",
        expected: "an array",
    })?;
    let [level, attr, inlines] = parts.as_slice() else {
        return Err(StructuralMismatch::Arity {
            what: "Header payload",
            expected: 3,
            found: parts.len(),
        });
    };
    let level = level
        .as_u64()
        .filter(|l| *l > 0)
        .and_then(|l| usize::try_from(l).ok())
        .ok_or(StructuralMismatch::InvalidType {
            what: "Header level",
            expected: "a positive integer",
        })?;
    let attr = read_attr(attr).ok_or(StructuralMismatch::InvalidType {
        what: "Header attributes",
        expected: "an [id, classes, key-value pairs] triple",
    })?;
    Ok((level, attr, inlines))
}

fn header_node(level: usize, attr: &Attr, inlines: &Value) -> Node {
    Node::new(kind::HEADER, json!([level, attr_to_value(attr), inlines]))
}

fn is_unnumbered(attr: &Attr) -> bool {
    attr.1.iter().any(|c| c == UNNUMBERED_CLASS || c == "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(level: u64, id: &str, classes: &[&str]) -> Value {
        json!([level, [id, classes, []], [{"t": "Str", "c": "Title"}]])
    }

    fn run(filter: &mut HeadingLabelFilter, payload: &Value) -> Option<Value> {
        let mut ctx = FilterContext::default();
        match filter.filter_node("Header", payload, &mut ctx).unwrap() {
            FilterReturn::FilterResult(mut nodes, recurse) => {
                assert!(!recurse);
                assert_eq!(nodes.len(), 1);
                nodes.pop().and_then(|n| n.content)
            }
            FilterReturn::Unchanged => None,
        }
    }

    #[test]
    fn test_section_counter() {
        let mut counter = SectionCounter::new();
        counter.advance(1);
        assert_eq!(counter.label(1), "sec-1");
        counter.advance(2);
        counter.advance(2);
        assert_eq!(counter.label(2), "sec-1.2");
        counter.advance(1);
        assert_eq!(counter.label(1), "sec-2");
        counter.advance(2);
        assert_eq!(counter.label(2), "sec-2.1");
    }

    #[test]
    fn test_section_counter_skipped_level() {
        let mut counter = SectionCounter::new();
        counter.advance(2);
        assert_eq!(counter.label(2), "sec-0.1");
    }

    #[test]
    fn test_deep_heading_is_unnumbered() {
        let mut filter = HeadingLabelFilter::new(HeadingOptions::default());
        let out = run(&mut filter, &header(3, "details", &["note"])).unwrap();
        assert_eq!(out, header(3, "", &["note", "unnumbered"]));
    }

    #[test]
    fn test_unnumbered_class_added_once() {
        let mut filter = HeadingLabelFilter::new(HeadingOptions::default());
        let out = run(&mut filter, &header(4, "x", &["unnumbered"])).unwrap();
        assert_eq!(out, header(4, "", &["unnumbered"]));
        assert_eq!(run(&mut filter, &header(4, "", &["unnumbered"])), None);
    }

    #[test]
    fn test_shallow_headings_are_renumbered() {
        let mut filter = HeadingLabelFilter::new(HeadingOptions::default());
        assert_eq!(run(&mut filter, &header(1, "intro", &[])), Some(header(1, "sec-1", &[])));
        assert_eq!(run(&mut filter, &header(2, "a", &[])), Some(header(2, "sec-1.1", &[])));
        assert_eq!(run(&mut filter, &header(2, "b", &[])), Some(header(2, "sec-1.2", &[])));
        assert_eq!(run(&mut filter, &header(1, "next", &[])), Some(header(1, "sec-2", &[])));
        assert_eq!(run(&mut filter, &header(2, "sec-2.1", &[])), None);
        assert_eq!(run(&mut filter, &header(2, "c", &[])), Some(header(2, "sec-2.2", &[])));
    }

    #[test]
    fn test_depth_is_clamped_to_six_levels() {
        let mut filter = HeadingLabelFilter::new(HeadingOptions {
            depth: usize::MAX,
            renumber: true,
        });
        assert_eq!(run(&mut filter, &header(6, "h6", &[])), Some(header(6, "sec-0.0.0.0.0.1", &[])));
        assert_eq!(
            run(&mut filter, &header(1_000_000, "huge", &[])),
            Some(header(1_000_000, "", &["unnumbered"]))
        );
        assert_eq!(
            run(&mut filter, &header(u64::MAX, "", &[])),
            Some(header(u64::MAX, "", &["unnumbered"]))
        );
    }

    #[test]
    fn test_unnumbered_heading_does_not_advance() {
        let mut filter = HeadingLabelFilter::new(HeadingOptions::default());
        assert_eq!(run(&mut filter, &header(1, "pre", &["unnumbered"])), None);
        assert_eq!(run(&mut filter, &header(1, "ack", &["-"])), None);
        assert_eq!(run(&mut filter, &header(1, "one", &[])), Some(header(1, "sec-1", &[])));
    }

    #[test]
    fn test_renumber_disabled() {
        let mut filter = HeadingLabelFilter::new(HeadingOptions {
            depth: 1,
            renumber: false,
        });
        assert_eq!(run(&mut filter, &header(1, "keep", &[])), None);
        assert_eq!(
            run(&mut filter, &header(2, "drop", &[])),
            Some(header(2, "", &["unnumbered"]))
        );
    }

    #[test]
    fn test_other_nodes_unchanged() {
        let mut filter = HeadingLabelFilter::new(HeadingOptions::default());
        let mut ctx = FilterContext::default();
        let result = filter
            .filter_node("Para", &json!([]), &mut ctx)
            .unwrap();
        assert!(matches!(result, FilterReturn::Unchanged));
    }

    #[test]
    fn test_malformed_headers() {
        let mut filter = HeadingLabelFilter::new(HeadingOptions::default());
        let mut ctx = FilterContext::default();
        assert_eq!(
            filter
                .filter_node("Header", &json!([1, ["", [], []]]), &mut ctx)
                .err(),
            Some(StructuralMismatch::Arity {
                what: "Header payload",
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            filter.filter_node("Header", &header(0, "", &[]), &mut ctx),
            Err(StructuralMismatch::InvalidType { what: "Header level", .. })
        ));
        assert!(matches!(
            filter.filter_node("Header", &json!([1, "id", []]), &mut ctx),
            Err(StructuralMismatch::InvalidType { what: "Header attributes", .. })
        ));
    }
}
