/*
 * table.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Decoders for the two Table payload revisions of the Pandoc JSON AST.
 * Both produce the same canonical `Table`; the tabu writer only ever sees
 * that.
 */

use crate::errors::StructuralMismatch;
use serde_json::Value;
use texfilters_types::{Alignment, Cell, ColSpec, ColWidth, Inlines, Node, Row, Table, kind};

type Result<T> = std::result::Result<T, StructuralMismatch>;

/// Table payload revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSchema {
    /// `[caption, aligns, widths, head, rows]`, pandoc-types before 1.21.
    Flat,
    /// `[attr, caption, colspecs, head, bodies, foot]`, pandoc-types 1.21 on.
    Attributed,
}

pub fn detect_schema(payload: &Value) -> Result<TableSchema> {
    match as_array(payload, "Table payload")?.len() {
        5 => Ok(TableSchema::Flat),
        6 => Ok(TableSchema::Attributed),
        found => Err(StructuralMismatch::UnknownSchema { found }),
    }
}

/// Decode a Table payload of either revision and check its column counts.
pub fn read_table(payload: &Value) -> Result<(TableSchema, Table)> {
    let schema = detect_schema(payload)?;
    let table = match schema {
        TableSchema::Flat => read_flat_table(payload)?,
        TableSchema::Attributed => read_attributed_table(payload)?,
    };
    check_columns(&table)?;
    Ok((schema, table))
}

// Flat: [caption: [Inline], aligns: [Alignment], widths: [Double], head: [Cell], rows: [[Cell]]]
// where a cell is [Block].
pub fn read_flat_table(payload: &Value) -> Result<Table> {
    let [caption, aligns, widths, head, rows] = as_tuple::<5>(payload, "Table payload")?;

    let caption = read_inlines(caption, "Table caption")?;
    let aligns = as_array(aligns, "Table alignments")?
        .iter()
        .map(read_alignment)
        .collect::<Result<Vec<_>>>()?;
    let widths = as_array(widths, "Table widths")?
        .iter()
        .map(|w| {
            w.as_f64()
                .map(ColWidth::from_number)
                .ok_or(StructuralMismatch::InvalidType {
                    what: "column width",
                    expected: "a number",
                })
        })
        .collect::<Result<Vec<_>>>()?;
    if widths.len() != aligns.len() {
        return Err(StructuralMismatch::Arity {
            what: "Table widths",
            expected: aligns.len(),
            found: widths.len(),
        });
    }
    let colspec: Vec<ColSpec> = aligns.into_iter().zip(widths).collect();

    let mut head = read_flat_row(head)?;
    if head.cells.is_empty() {
        head = Row::empty(colspec.len());
    }
    let body = as_array(rows, "Table rows")?
        .iter()
        .map(read_flat_row)
        .collect::<Result<Vec<_>>>()?;

    Ok(Table {
        caption,
        colspec,
        head: vec![head],
        body,
    })
}

fn read_flat_row(value: &Value) -> Result<Row> {
    let cells = as_array(value, "table row")?
        .iter()
        .map(|cell| block_inlines(cell, "table cell"))
        .collect::<Result<Vec<_>>>()?;
    Ok(Row::new(cells))
}

// Attributed: [attr, caption, colspecs, head, bodies, foot]
//   caption  = [short | null, [Block]]
//   colspec  = [Alignment, ColWidth]
//   head     = [attr, [Row]]
//   body     = [attr, rowHeadColumns, [Row], [Row]]
//   foot     = [attr, [Row]]
//   Row      = [attr, [Cell]]
//   Cell     = [attr, Alignment, rowSpan, colSpan, [Block]]
pub fn read_attributed_table(payload: &Value) -> Result<Table> {
    let [_attr, caption, colspecs, head, bodies, foot] = as_tuple::<6>(payload, "Table payload")?;

    let caption = read_caption(caption)?;
    let colspec = as_array(colspecs, "Table colspecs")?
        .iter()
        .map(read_colspec)
        .collect::<Result<Vec<_>>>()?;

    let mut head = read_head_or_foot(head, "TableHead")?;
    if head.is_empty() {
        head.push(Row::empty(colspec.len()));
    }

    let mut body = Vec::new();
    for table_body in as_array(bodies, "Table bodies")? {
        let [_attr, _row_head_columns, intermediate_head, rows] =
            as_tuple::<4>(table_body, "TableBody")?;
        for row in as_array(intermediate_head, "TableBody head")? {
            body.push(read_attributed_row(row)?);
        }
        for row in as_array(rows, "TableBody rows")? {
            body.push(read_attributed_row(row)?);
        }
    }
    body.extend(read_head_or_foot(foot, "TableFoot")?);

    Ok(Table {
        caption,
        colspec,
        head,
        body,
    })
}

fn read_caption(value: &Value) -> Result<Inlines> {
    // The short caption is not rendered.
    let [_short, long] = as_tuple::<2>(value, "Table caption")?;
    if long.is_null() {
        return Ok(Vec::new());
    }
    block_inlines(long, "Table caption")
}

fn read_colspec(value: &Value) -> Result<ColSpec> {
    let [alignment, width] = as_tuple::<2>(value, "ColSpec")?;
    Ok((read_alignment(alignment)?, read_col_width(width)?))
}

fn read_col_width(value: &Value) -> Result<ColWidth> {
    match tag(value, "ColWidth")? {
        "ColWidthDefault" => Ok(ColWidth::Default),
        "ColWidth" => value
            .get("c")
            .and_then(Value::as_f64)
            .map(ColWidth::from_number)
            .ok_or(StructuralMismatch::InvalidType {
                what: "ColWidth",
                expected: "a number",
            }),
        other => Err(StructuralMismatch::UnknownTag {
            what: "column width",
            tag: other.to_string(),
        }),
    }
}

fn read_head_or_foot(value: &Value, what: &'static str) -> Result<Vec<Row>> {
    let [_attr, rows] = as_tuple::<2>(value, what)?;
    as_array(rows, what)?
        .iter()
        .map(read_attributed_row)
        .collect()
}

fn read_attributed_row(value: &Value) -> Result<Row> {
    let [_attr, cells] = as_tuple::<2>(value, "Row")?;
    let cells = as_array(cells, "Row cells")?
        .iter()
        .map(read_attributed_cell)
        .collect::<Result<Vec<_>>>()?;
    Ok(Row::new(cells))
}

fn read_attributed_cell(value: &Value) -> Result<Cell> {
    let [_attr, _alignment, row_span, col_span, blocks] = as_tuple::<5>(value, "Cell")?;
    let row_span = row_span.as_u64().ok_or(StructuralMismatch::InvalidType {
        what: "Cell rowSpan",
        expected: "a number",
    })?;
    let col_span = col_span.as_u64().ok_or(StructuralMismatch::InvalidType {
        what: "Cell colSpan",
        expected: "a number",
    })?;
    if row_span != 1 || col_span != 1 {
        return Err(StructuralMismatch::SpanningCell { row_span, col_span });
    }
    block_inlines(blocks, "table cell")
}

fn read_alignment(value: &Value) -> Result<Alignment> {
    let t = tag(value, "Alignment")?;
    Alignment::from_tag(t).ok_or_else(|| StructuralMismatch::UnknownTag {
        what: "alignment",
        tag: t.to_string(),
    })
}

fn read_inlines(value: &Value, what: &'static str) -> Result<Inlines> {
    as_array(value, what)?
        .iter()
        .map(|v| {
            Node::from_value(v).ok_or(StructuralMismatch::InvalidType {
                what,
                expected: "a list of inline nodes",
            })
        })
        .collect()
}

/// Flatten a block list into inlines that can sit in a tabu cell or caption.
///
/// `Plain`/`Para` contribute their inlines, consecutive blocks are joined by
/// a space, LaTeX raw blocks become raw inlines, and raw blocks for other
/// formats and `Null` are dropped.
pub fn block_inlines(value: &Value, what: &'static str) -> Result<Inlines> {
    let mut out: Inlines = Vec::new();
    for block in as_array(value, what)? {
        let node = Node::from_value(block).ok_or(StructuralMismatch::InvalidType {
            what,
            expected: "a list of block nodes",
        })?;
        let inlines = match node.kind.as_str() {
            kind::PLAIN | kind::PARA => {
                read_inlines(node.content.as_ref().unwrap_or(&Value::Null), what)?
            }
            kind::RAW_BLOCK => {
                let (format, text) = node.raw_parts().ok_or(StructuralMismatch::InvalidType {
                    what: "RawBlock",
                    expected: "a [format, text] pair",
                })?;
                if !is_tex_format(format) {
                    continue;
                }
                vec![Node::raw_inline(format, text)]
            }
            kind::NULL => continue,
            other => {
                return Err(StructuralMismatch::UnsupportedBlock {
                    what,
                    kind: other.to_string(),
                });
            }
        };
        if inlines.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(Node::space());
        }
        out.extend(inlines);
    }
    Ok(out)
}

fn is_tex_format(format: &str) -> bool {
    matches!(format, "latex" | "tex")
}

fn check_columns(table: &Table) -> Result<()> {
    let expected = table.column_count();
    if expected == 0 {
        return Err(StructuralMismatch::NoColumns);
    }
    for (section, rows) in [("header", &table.head), ("body", &table.body)] {
        for (i, row) in rows.iter().enumerate() {
            if row.cells.len() != expected {
                return Err(StructuralMismatch::ColumnCount {
                    section,
                    row: i + 1,
                    expected,
                    found: row.cells.len(),
                });
            }
        }
    }
    Ok(())
}

fn tag<'a>(value: &'a Value, what: &'static str) -> Result<&'a str> {
    value
        .get("t")
        .and_then(Value::as_str)
        .ok_or(StructuralMismatch::InvalidType {
            what,
            expected: "an object with a `t` tag",
        })
}

fn as_array<'a>(value: &'a Value, what: &'static str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or(StructuralMismatch::InvalidType {
        what,
        expected: "an array",
    })
}

fn as_tuple<'a, const N: usize>(value: &'a Value, what: &'static str) -> Result<&'a [Value; N]> {
    let arr = as_array(value, what)?;
    <&[Value; N]>::try_from(arr.as_slice()).map_err(|_| StructuralMismatch::Arity {
        what,
        expected: N,
        found: arr.len(),
    })
}
