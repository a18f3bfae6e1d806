//! Declarative page layout description.
//!
//! A [`Document`] is an ordered list of block elements interpreted by a
//! rendering engine that is free to choose page boundaries; nothing here is
//! tied to absolute Y coordinates.

use std::path::PathBuf;

/// A4 portrait, in points.
pub const PAGE_WIDTH_PT: f64 = 595.28;
pub const PAGE_HEIGHT_PT: f64 = 841.89;
/// Inset of the bordered frame from the page edge.
pub const FRAME_MARGIN_PT: f64 = 50.0;
/// Content margin; keeps text clear of the frame stroke.
pub const CONTENT_MARGIN_PT: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width_pt: f64,
}

impl Column {
    pub fn new(header: &str, width_pt: f64) -> Self {
        Self {
            header: header.to_string(),
            width_pt,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// One `label : value` row of the two-column field grid.
    FieldRow { label: String, value: String },
    /// Extra vertical padding between logical groups.
    Spacer(f64),
    /// Underlined section heading.
    Heading(String),
    /// Bordered table with fixed column widths.
    Table {
        columns: Vec<Column>,
        rows: Vec<Vec<String>>,
    },
    /// Centered closing statement.
    Paragraph(String),
    /// Signature block, right-aligned.
    Signature { role: String, name: String },
}

impl Block {
    pub fn field_row(label: &str, value: impl Into<String>) -> Self {
        Block::FieldRow {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    /// Logo asset drawn at the top-left anchor; `None` when the file is
    /// absent, which is silently tolerated.
    pub logo: Option<PathBuf>,
    /// Page background fill as a hex color; `None` leaves the page white.
    pub background_fill: Option<String>,
    pub frame_color: String,
    pub title_color: String,
    pub blocks: Vec<Block>,
    /// Small-print lines pinned to the bottom of the last page.
    pub footer_lines: Vec<String>,
}

/// Prefix each row with its 1-based index, the `Sr. No.` column.
pub fn numbered_rows(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, mut row)| {
            row.insert(0, (index + 1).to_string());
            row
        })
        .collect()
}
