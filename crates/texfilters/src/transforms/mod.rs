/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub mod heading_labels;
pub mod tabu_table;

pub use heading_labels::{HeadingLabelFilter, HeadingOptions, SectionCounter};
pub use tabu_table::TabuTableFilter;
