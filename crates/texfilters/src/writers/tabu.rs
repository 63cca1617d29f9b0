/*
 * tabu.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Writer from the canonical table to the node sequence that typesets it
 * with the LaTeX `tabu` package and booktabs rules.
 */

use texfilters_types::{Alignment, Inlines, Node, Row, Table};

pub const COLUMN_SEPARATOR: &str = "&";
pub const ROW_TERMINATOR: &str = "\\\\\n";

/// Float environment and justification, decided by the column widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// No explicit widths: `table`, `\centering`, every column weighted 1.
    Centered,
    /// At least one explicit width: `table*`, `\raggedright`.
    FullWidth,
}

impl Layout {
    pub fn for_table(table: &Table) -> Layout {
        if table.has_explicit_widths() {
            Layout::FullWidth
        } else {
            Layout::Centered
        }
    }

    pub fn environment(self) -> &'static str {
        match self {
            Layout::Centered => "table",
            Layout::FullWidth => "table*",
        }
    }

    pub fn justification(self) -> &'static str {
        match self {
            Layout::Centered => "\\centering",
            Layout::FullWidth => "\\raggedright",
        }
    }
}

/// Column specification: one letter per column, the last column as
/// `X[1,<letter>]`.
pub fn column_spec(alignments: &[Alignment]) -> String {
    let mut spec = String::new();
    if let Some((last, rest)) = alignments.split_last() {
        spec.extend(rest.iter().map(|a| a.column_char()));
        spec.push_str(&format!("X[1,{}]", last.column_char()));
    }
    spec
}

/// The ten nodes that replace a table.
pub fn write_table(table: &Table) -> Vec<Node> {
    let layout = Layout::for_table(table);
    let alignments: Vec<Alignment> = table.alignments().collect();
    vec![
        Node::latex_block(format!("\\begin{{{}}}", layout.environment())),
        write_caption(&table.caption),
        Node::latex_block(layout.justification()),
        Node::latex_block(format!("\\begin{{tabu}}{{{}}}", column_spec(&alignments))),
        Node::latex_block("\\toprule"),
        write_rows(&table.head),
        Node::latex_block("\\midrule"),
        write_rows(&table.body),
        Node::latex_block("\\bottomrule\n\\end{tabu}"),
        Node::latex_block(format!("\\end{{{}}}", layout.environment())),
    ]
}

fn write_caption(caption: &Inlines) -> Node {
    let mut content = Vec::with_capacity(caption.len() + 2);
    content.push(Node::latex_inline("\\caption{"));
    content.extend(caption.iter().cloned());
    content.push(Node::latex_inline("}"));
    Node::para(content)
}

/// All rows in one `Plain`: cells separated by `&`, rows ended by `\\`.
fn write_rows(rows: &[Row]) -> Node {
    let mut content = Vec::new();
    for row in rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if i > 0 {
                content.push(Node::latex_inline(COLUMN_SEPARATOR));
            }
            content.extend(cell.iter().cloned());
        }
        content.push(Node::latex_inline(ROW_TERMINATOR));
    }
    Node::plain(content)
}
