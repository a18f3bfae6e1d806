//! Conversion of a layout description into Typst source.
//!
//! Pure and deterministic: the same `Document` always yields byte-identical
//! source, which is what the structural-determinism tests rely on. All
//! user-supplied text is emitted as escaped string literals so form input can
//! never inject markup.

use super::common::escape_typst_string as esc;
use super::layout::{
    Block, Document, CONTENT_MARGIN_PT, FRAME_MARGIN_PT, PAGE_HEIGHT_PT, PAGE_WIDTH_PT,
};

const LOGO_WIDTH_PT: f64 = 160.0;
const LOGO_HEIGHT_PT: f64 = 80.0;
/// Vertical drop from the content top to the title baseline area.
const TITLE_OFFSET_PT: f64 = 90.0;
const FIELD_LABEL_WIDTH_PT: f64 = 190.0;
const FIELD_ROW_GUTTER_PT: f64 = 8.0;

/// Name the logo asset is copied to inside the compilation directory.
pub const LOGO_FILENAME: &str = "logo.png";

pub fn source(document: &Document) -> String {
    let mut out = String::new();

    push_page_setup(&mut out, document);

    if document.logo.is_some() {
        out.push_str(&format!(
            "#place(top + left, image(\"{}\", width: {:.2}pt, height: {:.2}pt))\n",
            LOGO_FILENAME, LOGO_WIDTH_PT, LOGO_HEIGHT_PT
        ));
    }

    out.push_str(&format!("#v({TITLE_OFFSET_PT:.2}pt)\n"));
    out.push_str(&format!(
        "#align(center, text(size: 22pt, fill: rgb(\"{}\"), underline(strong(\"{}\"))))\n",
        document.title_color,
        esc(&document.title)
    ));
    out.push_str("#v(24pt)\n");

    let mut field_rows: Vec<(String, String)> = Vec::new();
    for block in &document.blocks {
        match block {
            Block::FieldRow { label, value } => {
                field_rows.push((label.clone(), value.clone()));
            }
            other => {
                flush_field_grid(&mut out, &mut field_rows);
                push_block(&mut out, document, other);
            }
        }
    }
    flush_field_grid(&mut out, &mut field_rows);

    out.push_str("#v(1fr)\n");
    for line in &document.footer_lines {
        out.push_str(&format!("#block(text(size: 8pt, \"{}\"))\n", esc(line)));
    }

    out
}

fn push_page_setup(out: &mut String, document: &Document) {
    let frame_width = PAGE_WIDTH_PT - 2.0 * FRAME_MARGIN_PT;
    let frame_height = PAGE_HEIGHT_PT - 2.0 * FRAME_MARGIN_PT;

    out.push_str("#set page(\n");
    out.push_str(&format!("  width: {PAGE_WIDTH_PT:.2}pt,\n"));
    out.push_str(&format!("  height: {PAGE_HEIGHT_PT:.2}pt,\n"));
    out.push_str(&format!(
        "  margin: (x: {CONTENT_MARGIN_PT:.2}pt, y: {CONTENT_MARGIN_PT:.2}pt),\n"
    ));
    if let Some(fill) = &document.background_fill {
        out.push_str(&format!("  fill: rgb(\"{fill}\"),\n"));
    }
    out.push_str(&format!(
        "  background: place(top + left, dx: {FRAME_MARGIN_PT:.2}pt, dy: {FRAME_MARGIN_PT:.2}pt, \
rect(width: {frame_width:.2}pt, height: {frame_height:.2}pt, stroke: 2pt + rgb(\"{}\"))),\n",
        document.frame_color
    ));
    out.push_str(")\n");
    out.push_str("#set text(size: 12pt)\n");
}

fn flush_field_grid(out: &mut String, field_rows: &mut Vec<(String, String)>) {
    if field_rows.is_empty() {
        return;
    }

    out.push_str("#grid(\n");
    out.push_str(&format!(
        "  columns: ({FIELD_LABEL_WIDTH_PT:.2}pt, 1fr),\n"
    ));
    out.push_str(&format!("  row-gutter: {FIELD_ROW_GUTTER_PT:.2}pt,\n"));
    for (label, value) in field_rows.drain(..) {
        out.push_str(&format!(
            "  strong(\"{}\"), \": \" + \"{}\",\n",
            esc(&label),
            esc(&value)
        ));
    }
    out.push_str(")\n");
}

fn push_block(out: &mut String, document: &Document, block: &Block) {
    match block {
        Block::FieldRow { .. } => unreachable!("field rows are grouped by the caller"),
        Block::Spacer(points) => {
            out.push_str(&format!("#v({points:.2}pt)\n"));
        }
        Block::Heading(text) => {
            out.push_str(&format!(
                "#text(size: 10pt, fill: rgb(\"{}\"), underline(strong(\"{}\")))\n",
                document.title_color,
                esc(text)
            ));
            out.push_str("#v(12pt)\n");
        }
        Block::Table { columns, rows } => {
            out.push_str("#table(\n");
            let widths: Vec<String> = columns
                .iter()
                .map(|column| format!("{:.2}pt", column.width_pt))
                .collect();
            out.push_str(&format!("  columns: ({}),\n", widths.join(", ")));
            out.push_str("  inset: 5pt,\n");
            out.push_str("  stroke: 1pt + black,\n");
            let headers: Vec<String> = columns
                .iter()
                .map(|column| format!("strong(\"{}\")", esc(&column.header)))
                .collect();
            out.push_str(&format!("  {},\n", headers.join(", ")));
            for row in rows {
                let cells: Vec<String> =
                    row.iter().map(|cell| format!("\"{}\"", esc(cell))).collect();
                out.push_str(&format!("  {},\n", cells.join(", ")));
            }
            out.push_str(")\n");
        }
        Block::Paragraph(text) => {
            out.push_str(&format!(
                "#align(center, block(width: 420pt, text(size: 10pt, \"{}\")))\n",
                esc(text)
            ));
        }
        Block::Signature { role, name } => {
            out.push_str(&format!(
                "#align(right, text(size: 12pt, strong(\"{}\")))\n",
                esc(role)
            ));
            out.push_str(&format!(
                "#align(right, text(size: 12pt, \"{}\"))\n",
                esc(name)
            ));
        }
    }
}
