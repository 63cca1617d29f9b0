/*
 * unified_filter.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Runs the built-in filters selected on the command line over a document.
 *
 * Filters are applied in the order given, one walk each, sharing a single
 * filter context so their diagnostics end up in one list.
 */

use crate::errors::FilterError;
use crate::filter_context::FilterContext;
use crate::filters::apply_filter;
use crate::options::{FilterOptions, is_latex_format};
use crate::transforms::{HeadingLabelFilter, TabuTableFilter};
use crate::utils::diagnostic_collector::Diagnostic;
use texfilters_types::Document;
use thiserror::Error;

/// A built-in filter selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSpec {
    /// Rewrite tables as `tabu` LaTeX.
    Tables,
    /// Unnumber deep headings and relabel numbered ones.
    Headings,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter `{0}`, expected `tables` or `headings`")]
pub struct UnknownFilter(pub String);

impl FilterSpec {
    pub fn parse(s: &str) -> Result<Self, UnknownFilter> {
        match s.trim() {
            "tables" | "tabu" => Ok(FilterSpec::Tables),
            "headings" => Ok(FilterSpec::Headings),
            other => Err(UnknownFilter(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterSpec::Tables => "tables",
            FilterSpec::Headings => "headings",
        }
    }
}

impl std::str::FromStr for FilterSpec {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterSpec::parse(s)
    }
}

impl std::fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Apply the configured filters to `doc` in place.
///
/// Returns the collected diagnostics. On error the document must be
/// discarded.
pub fn apply_filters(
    doc: &mut Document,
    options: &FilterOptions,
) -> Result<Vec<Diagnostic>, FilterError> {
    if !options.applies_to_format() {
        tracing::info!(format = %options.format, "not a LaTeX format, passing document through");
        return Ok(Vec::new());
    }

    let mut ctx = FilterContext::for_document(options.format.clone(), doc);
    for spec in &options.filters {
        match spec {
            FilterSpec::Tables => {
                if !is_latex_format(&options.format) {
                    ctx.warn(format!(
                        "rewriting tables as raw LaTeX for format `{}`; they will not appear in the output",
                        options.format
                    ));
                }
                let mut filter = TabuTableFilter::new();
                let stats = apply_filter(doc, &mut filter, &mut ctx)?;
                tracing::info!(tables = stats.replaced, "tables rewritten");
            }
            FilterSpec::Headings => {
                let heading = options.heading_options(&mut ctx);
                let mut filter = HeadingLabelFilter::new(heading);
                let stats = apply_filter(doc, &mut filter, &mut ctx)?;
                tracing::info!(
                    depth = heading.depth,
                    renumber = heading.renumber,
                    replaced = stats.replaced,
                    "headings relabelled"
                );
            }
        }
    }
    Ok(ctx.into_diagnostics())
}
