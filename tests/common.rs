use std::fs;
use std::path::Path;

use sprier_cert_server::config::AppConfig;
use sprier_cert_server::document::{Document, DocumentRenderer, RenderError};

/// Renderer stand-in that writes stub PDF bytes instead of invoking the
/// Typst CLI.
pub struct MockRenderer;

pub const STUB_PDF: &[u8] = b"%PDF-1.4\n%mock document\n%%EOF\n";

impl DocumentRenderer for MockRenderer {
    fn render(&self, _document: &Document, output: &Path) -> Result<(), RenderError> {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(RenderError::CreateOutputDir)?;
        }
        fs::write(output, STUB_PDF).map_err(RenderError::WritePdf)?;
        Ok(())
    }
}

/// Renderer stand-in that always fails, for the compensation path.
pub struct FailingRenderer;

impl DocumentRenderer for FailingRenderer {
    fn render(&self, _document: &Document, _output: &Path) -> Result<(), RenderError> {
        Err(RenderError::CompilerExit(1))
    }
}

pub fn test_config(data_dir: &Path) -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1".to_string(),
        port: 0,
        data_dir: data_dir.to_path_buf(),
        logo_path: data_dir.join("logo.png"),
        cors_allowed_origin: None,
    }
}

pub fn valid_certificate_body() -> serde_json::Value {
    serde_json::json!({
        "customerName": "Acme",
        "siteLocation": "Plant A",
        "makeModel": "GT",
        "range": "0-100",
        "serialNo": "SN1",
        "calibrationGas": "CO",
        "gasCanisterDetails": "Cyl-1",
        "dateOfCalibration": "2024-01-01",
        "calibrationDueDate": "2025-01-01",
        "observations": [{"gas": "CO", "before": "10", "after": "0"}],
        "engineerName": "MR. Vivek"
    })
}

pub fn valid_service_body() -> serde_json::Value {
    serde_json::json!({
        "nameAndLocation": "Acme, Plant A",
        "contactPerson": "John Doe",
        "contactNumber": "9876543210",
        "serviceEngineer": "MR. Vivek",
        "date": "2024-01-01",
        "place": "Plant A",
        "placeOptions": "On-site",
        "natureOfJob": "Calibration",
        "reportNo": "SR-42",
        "makeModelNumberoftheInstrumentQuantity": "GT x2",
        "serialNumberoftheInstrumentCalibratedOK": "SN1",
        "serialNumberoftheFaultyNonWorkingInstruments": "SN2",
        "engineerRemarks": [{
            "serviceSpares": "Sensor replacement",
            "partNo": "PN-204",
            "rate": "1500",
            "quantity": "5.0",
            "poNo": "PO-88"
        }],
        "engineerName": "MR. Vivek"
    })
}
