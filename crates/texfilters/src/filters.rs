/*
 * filters.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Top-down traversal of the raw JSON tree with node replacement.
//!
//! Every object with a string `t` field found inside an array is offered to
//! the filter, in document order. A filter either leaves the node alone, in
//! which case the walk descends into its `c` payload, or returns the nodes
//! that take its place in the enclosing array. Everything else in the tree
//! (attributes, alignments, metadata) is carried through untouched.

use crate::errors::{FilterError, StructuralMismatch};
use crate::filter_context::FilterContext;
use serde_json::{Map, Value};
use std::collections::HashMap;
use texfilters_types::{Document, Node};

pub enum FilterReturn {
    Unchanged,
    FilterResult(Vec<Node>, bool), // (replacement nodes, should recurse)
}

/// A per-node rewrite, driven by [`apply_filter`].
pub trait Filter {
    fn name(&self) -> &'static str;

    /// Decide what happens to one node. `payload` is `Value::Null` for
    /// nodes without a `c` field.
    fn filter_node(
        &mut self,
        kind: &str,
        payload: &Value,
        ctx: &mut FilterContext,
    ) -> std::result::Result<FilterReturn, StructuralMismatch>;
}

/// Counts reported after a walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    pub visited: usize,
    pub replaced: usize,
}

static NULL: Value = Value::Null;

type Result<T> = std::result::Result<T, FilterError>;

/// Run `filter` over the blocks of `doc`.
///
/// Metadata is not walked. On error the document's blocks are left empty;
/// the caller is expected to abandon the document.
pub fn apply_filter(
    doc: &mut Document,
    filter: &mut dyn Filter,
    ctx: &mut FilterContext,
) -> Result<WalkStats> {
    let span = tracing::info_span!("filter", name = filter.name(), format = %ctx.format);
    let _enter = span.enter();

    let mut walker = Walker::new(filter, ctx);
    walker.path.push("blocks".to_string());
    let blocks = std::mem::take(&mut doc.blocks);
    doc.blocks = walker.walk_array(blocks)?;

    let stats = walker.stats;
    tracing::debug!(
        visited = stats.visited,
        replaced = stats.replaced,
        "filter finished"
    );
    Ok(stats)
}

struct Walker<'a> {
    filter: &'a mut dyn Filter,
    ctx: &'a mut FilterContext,
    path: Vec<String>,
    ordinals: HashMap<String, usize>,
    stats: WalkStats,
}

impl<'a> Walker<'a> {
    fn new(filter: &'a mut dyn Filter, ctx: &'a mut FilterContext) -> Self {
        Walker {
            filter,
            ctx,
            path: Vec::new(),
            ordinals: HashMap::new(),
            stats: WalkStats::default(),
        }
    }

    /// Current position as a JSON pointer (RFC 6901).
    fn pointer(&self) -> String {
        self.path
            .iter()
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect()
    }

    fn walk_value(&mut self, value: Value) -> Result<Value> {
        match value {
            Value::Array(items) => Ok(Value::Array(self.walk_array(items)?)),
            Value::Object(map) => Ok(Value::Object(self.walk_object(map)?)),
            other => Ok(other),
        }
    }

    fn walk_object(&mut self, map: Map<String, Value>) -> Result<Map<String, Value>> {
        let mut out = Map::new();
        for (key, value) in map {
            self.path.push(key.clone());
            let walked = self.walk_value(value);
            self.path.pop();
            out.insert(key, walked?);
        }
        Ok(out)
    }

    fn walk_array(&mut self, items: Vec<Value>) -> Result<Vec<Value>> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            self.path.push(index.to_string());
            let result = self.walk_element(item, &mut out);
            self.path.pop();
            result?;
        }
        Ok(out)
    }

    fn walk_element(&mut self, item: Value, out: &mut Vec<Value>) -> Result<()> {
        let Some(kind) = node_kind(&item) else {
            out.push(self.walk_value(item)?);
            return Ok(());
        };
        let kind = kind.to_string();
        let ordinal = {
            let seen = self.ordinals.entry(kind.clone()).or_default();
            *seen += 1;
            *seen
        };
        self.stats.visited += 1;

        let payload = item.get("c").unwrap_or(&NULL);
        let outcome = self
            .filter
            .filter_node(&kind, payload, self.ctx)
            .map_err(|error| FilterError::Node {
                kind: kind.clone(),
                ordinal,
                path: self.pointer(),
                error,
            })?;

        match outcome {
            FilterReturn::Unchanged => out.push(self.walk_node(item)?),
            FilterReturn::FilterResult(nodes, recurse) => {
                self.stats.replaced += 1;
                for node in nodes {
                    let value = node.into_value();
                    out.push(if recurse { self.walk_node(value)? } else { value });
                }
            }
        }
        Ok(())
    }

    fn walk_node(&mut self, mut node: Value) -> Result<Value> {
        if let Some(content) = node.get_mut("c") {
            let payload = content.take();
            self.path.push("c".to_string());
            let walked = self.walk_value(payload);
            self.path.pop();
            *content = walked?;
        }
        Ok(node)
    }
}

fn node_kind(value: &Value) -> Option<&str> {
    value.as_object()?.get("t")?.as_str()
}
