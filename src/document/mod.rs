//! Document rendering - turns a persisted record into a fixed-layout PDF.
//!
//! A record is first described as a small declarative layout
//! ([`layout::Document`], one builder per record kind), which the
//! [`TypstRenderEngine`] interprets into Typst source and compiles to PDF.
//! Flowing content means long tables page-break instead of overlapping the
//! signature block.

pub mod certificate;
pub mod common;
pub mod engine;
pub mod layout;
pub mod service;
pub mod typst;

pub use engine::TypstRenderEngine;
pub use layout::{Block, Column, Document};

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while rendering a document to disk.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("failed to copy logo asset: {0}")]
    CopyLogo(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    CompilerIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    CompilerExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("failed to create output directory: {0}")]
    CreateOutputDir(#[source] std::io::Error),
    #[error("failed to write output PDF: {0}")]
    WritePdf(#[source] std::io::Error),
}

/// Stateless transform from a layout description to a PDF file on disk.
///
/// Held as a trait object in `AppState` so tests can substitute a mock.
pub trait DocumentRenderer {
    fn render(&self, document: &Document, output: &Path) -> Result<(), RenderError>;
}
