/*
 * tabu_table.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Replace every `Table` node with raw LaTeX typesetting it in a `tabu`
//! environment inside a `table` (or `table*`) float.

use crate::errors::StructuralMismatch;
use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn};
use crate::readers::table::read_table;
use crate::writers::tabu::{Layout, write_table};
use serde_json::Value;
use texfilters_types::{Node, kind};

/// Rewrite one node.
///
/// Returns `Ok(None)` for anything that is not a `Table`. The format and
/// metadata are part of the filter invocation but do not affect the output.
pub fn transform(
    node_kind: &str,
    payload: &Value,
    _format: &str,
    _meta: &Value,
) -> Result<Option<Vec<Node>>, StructuralMismatch> {
    if node_kind != kind::TABLE {
        return Ok(None);
    }
    let (schema, table) = read_table(payload)?;
    tracing::debug!(
        ?schema,
        layout = ?Layout::for_table(&table),
        columns = table.column_count(),
        header_rows = table.head.len(),
        body_rows = table.body.len(),
        "rewriting table"
    );
    Ok(Some(write_table(&table)))
}

/// [`transform`] as a walker filter.
#[derive(Debug, Default)]
pub struct TabuTableFilter;

impl TabuTableFilter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for TabuTableFilter {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn filter_node(
        &mut self,
        kind: &str,
        payload: &Value,
        ctx: &mut FilterContext,
    ) -> Result<FilterReturn, StructuralMismatch> {
        match transform(kind, payload, &ctx.format, &ctx.meta)? {
            Some(nodes) => Ok(FilterReturn::FilterResult(nodes, false)),
            None => Ok(FilterReturn::Unchanged),
        }
    }
}
