/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Resolved invocation options for a filter run.
 *
 * Values given on the command line (or through their environment
 * variables) win; document metadata fills in what was left unset; built-in
 * defaults cover the rest.
 */

use crate::filter_context::FilterContext;
use crate::transforms::heading_labels::{DEFAULT_DEPTH, HeadingOptions, MAX_DEPTH};
use crate::unified_filter::FilterSpec;

pub const META_HEADING_DEPTH: &str = "heading-depth";
pub const META_HEADING_RENUMBER: &str = "heading-renumber";

/// Output formats written by pandoc's LaTeX-family writers.
const LATEX_FORMATS: &[&str] = &["latex", "beamer"];

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// Output format pandoc passed to the filter
    pub format: String,
    /// Filters to run, in order
    pub filters: Vec<FilterSpec>,
    pub heading_depth: Option<usize>,
    pub renumber: Option<bool>,
    /// Skip every filter unless the format is LaTeX-family
    pub only_latex: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            format: "latex".to_string(),
            filters: vec![FilterSpec::Tables],
            heading_depth: None,
            renumber: None,
            only_latex: false,
        }
    }
}

impl FilterOptions {
    /// Heading filter settings, falling back to document metadata.
    ///
    /// Metadata values that cannot be read are reported, against their
    /// metadata key, and ignored. Depths are limited to 1..=[`MAX_DEPTH`].
    pub fn heading_options(&self, ctx: &mut FilterContext) -> HeadingOptions {
        let depth = self.heading_depth.unwrap_or_else(|| {
            match ctx.meta_string(META_HEADING_DEPTH) {
                None => DEFAULT_DEPTH,
                Some(raw) => match raw.trim().parse::<usize>() {
                    Ok(depth) if (1..=MAX_DEPTH).contains(&depth) => depth,
                    _ => {
                        ctx.warn_at(
                            format!(
                                "ignoring `{}`, expected a heading level between 1 and {}; using {}",
                                raw, MAX_DEPTH, DEFAULT_DEPTH
                            ),
                            meta_pointer(META_HEADING_DEPTH),
                        );
                        DEFAULT_DEPTH
                    }
                },
            }
        });
        let renumber = self.renumber.unwrap_or_else(|| {
            match ctx.meta_string(META_HEADING_RENUMBER) {
                None => true,
                Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                    ctx.warn_at(
                        format!("ignoring `{}`, expected true or false", raw),
                        meta_pointer(META_HEADING_RENUMBER),
                    );
                    true
                }),
            }
        });
        HeadingOptions { depth, renumber }
    }

    pub fn applies_to_format(&self) -> bool {
        !self.only_latex || is_latex_format(&self.format)
    }
}

/// Whether `format` (possibly with `+ext`/`-ext` modifiers) is written by a
/// LaTeX-family writer.
pub fn is_latex_format(format: &str) -> bool {
    LATEX_FORMATS.contains(&base_format(format))
}

/// Format name with extension modifiers stripped: `latex+raw_tex` -> `latex`.
pub fn base_format(spec: &str) -> &str {
    let base_end = spec.find(['+', '-']).unwrap_or(spec.len());
    &spec[..base_end]
}

/// JSON pointer to a top-level metadata entry.
fn meta_pointer(key: &str) -> String {
    format!("/meta/{}", key.replace('~', "~0").replace('/', "~1"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
