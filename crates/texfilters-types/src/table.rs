/*
 * table.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::node::Inlines;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Default,
}

impl Alignment {
    /// Decode a Pandoc alignment tag such as `AlignCenter`.
    pub fn from_tag(tag: &str) -> Option<Alignment> {
        match tag {
            "AlignLeft" => Some(Alignment::Left),
            "AlignCenter" => Some(Alignment::Center),
            "AlignRight" => Some(Alignment::Right),
            "AlignDefault" => Some(Alignment::Default),
            _ => None,
        }
    }

    /// Tabular column letter.
    pub fn column_char(self) -> char {
        match self {
            Alignment::Left | Alignment::Default => 'l',
            Alignment::Center => 'c',
            Alignment::Right => 'r',
        }
    }
}

/// Relative column width. `Default` covers both `0` in the flat schema and
/// `ColWidthDefault` in the attributed one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum ColWidth {
    Default,
    Relative(f64),
}

impl ColWidth {
    pub fn from_number(width: f64) -> ColWidth {
        if width == 0.0 {
            ColWidth::Default
        } else {
            ColWidth::Relative(width)
        }
    }

    pub fn value(self) -> f64 {
        match self {
            ColWidth::Default => 0.0,
            ColWidth::Relative(width) => width,
        }
    }
}

pub type ColSpec = (Alignment, ColWidth);

/// Inline content of one cell.
pub type Cell = Inlines;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row { cells }
    }

    pub fn empty(columns: usize) -> Self {
        Row {
            cells: vec![Vec::new(); columns],
        }
    }
}

/// Schema-independent table: what both Table payload revisions decode into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub caption: Inlines,
    pub colspec: Vec<ColSpec>,
    pub head: Vec<Row>,
    pub body: Vec<Row>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.colspec.len()
    }

    pub fn alignments(&self) -> impl Iterator<Item = Alignment> + '_ {
        self.colspec.iter().map(|(alignment, _)| *alignment)
    }

    pub fn total_width(&self) -> f64 {
        self.colspec.iter().map(|(_, width)| width.value()).sum()
    }

    /// True when at least one column carries an explicit width.
    pub fn has_explicit_widths(&self) -> bool {
        self.total_width() != 0.0
    }
}
