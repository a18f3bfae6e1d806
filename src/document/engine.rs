//! Typst rendering engine.
//!
//! Writes the generated Typst source into a temporary compilation directory,
//! invokes the compiler, and copies the resulting PDF to the output path.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

use super::typst::{self, LOGO_FILENAME};
use super::{Document, DocumentRenderer, RenderError};

const SOURCE_FILENAME: &str = "document.typ";
const PDF_FILENAME: &str = "document.pdf";

/// Stateless engine compiling layout descriptions to PDF via the `typst` CLI.
pub struct TypstRenderEngine;

/// Drop a logo whose asset file no longer exists. One decision covers both
/// the `image(..)` reference in the source and the copy into the compilation
/// directory, so the compiler never sees a reference without the file.
fn resolve_assets(document: &Document) -> Document {
    let mut document = document.clone();
    if !document
        .logo
        .as_deref()
        .is_some_and(|path| path.exists())
    {
        document.logo = None;
    }
    document
}

impl DocumentRenderer for TypstRenderEngine {
    fn render(&self, document: &Document, output: &Path) -> Result<(), RenderError> {
        let document = resolve_assets(document);
        let source = typst::source(&document);

        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let source_path = temp_dir.path().join(SOURCE_FILENAME);
        fs::write(&source_path, &source).map_err(RenderError::WriteSource)?;

        if let Some(logo) = &document.logo {
            fs::copy(logo, temp_dir.path().join(LOGO_FILENAME))
                .map_err(RenderError::CopyLogo)?;
        }

        let pdf_path = temp_dir.path().join(PDF_FILENAME);
        let status = Command::new("typst")
            .arg("compile")
            .arg(&source_path)
            .arg(&pdf_path)
            .current_dir(temp_dir.path())
            .status()
            .map_err(RenderError::CompilerIo)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(RenderError::CompilerExit(code));
        }

        let pdf = fs::read(&pdf_path).map_err(RenderError::ReadPdf)?;

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(RenderError::CreateOutputDir)?;
        }
        fs::write(output, &pdf).map_err(RenderError::WritePdf)?;

        Ok(())
    }
}
