//! Shared helpers for document generation.

use chrono::{Local, NaiveDate};

/// Display form of a calendar date as printed on documents.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Timestamp printed in the document footer. Passed into the layout builders
/// so rendering stays deterministic for a fixed input.
pub fn generation_timestamp() -> String {
    Local::now().format("%d/%m/%Y %H:%M:%S").to_string()
}

/// Escape special characters for Typst string literals.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}
