/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc JSON filters for LaTeX output: tables as `tabu` environments and
 * section labels for headings.
 */

pub mod errors;
pub mod filter_context;
pub mod filters;
pub mod options;
pub mod readers;
pub mod transforms;
pub mod unified_filter;
pub mod utils;
pub mod writers;

pub use errors::{DocumentError, FilterError, StructuralMismatch};
pub use options::FilterOptions;
pub use unified_filter::{FilterSpec, apply_filters};
