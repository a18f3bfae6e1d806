//! Layout builder for calibration certificates.

use std::path::PathBuf;

use crate::certificate::models::CalibrationCertificate;

use super::common::format_date;
use super::layout::{numbered_rows, Block, Column, Document};

const INDIGO: &str = "#1a237e";
const GREY_FILL: &str = "#f5f5f5";

const CLOSING_STATEMENT: &str = "The above-mentioned Gas Detector was calibrated successfully, \
and the result confirms that the performance of the instrument is within acceptable limits.";

pub fn layout(
    record: &CalibrationCertificate,
    logo: Option<PathBuf>,
    generated_on: &str,
) -> Document {
    let observation_rows = numbered_rows(
        record
            .observations
            .iter()
            .map(|obs| vec![obs.gas.clone(), obs.before.clone(), obs.after.clone()])
            .collect(),
    );

    let blocks = vec![
        Block::field_row("Certificate No.", record.certificate_no.clone()),
        Block::field_row("Customer Name", record.customer_name.clone()),
        Block::field_row("Site Location", record.site_location.clone()),
        Block::field_row("Make & Model", record.make_model.clone()),
        Block::field_row("Range", record.range.clone()),
        Block::field_row("Serial No.", record.serial_no.clone()),
        Block::field_row("Calibration Gas", record.calibration_gas.clone()),
        Block::field_row("Gas Canister Details", record.gas_canister_details.clone()),
        Block::field_row(
            "Date of Calibration",
            format_date(record.date_of_calibration),
        ),
        Block::field_row(
            "Calibration Due Date",
            format_date(record.calibration_due_date),
        ),
        Block::Spacer(28.0),
        Block::Heading("OBSERVATIONS".to_string()),
        Block::Table {
            columns: vec![
                Column::new("Sr. No.", 40.0),
                Column::new("Concentration of Gas", 150.0),
                Column::new("Monitor Before Calibration", 150.0),
                Column::new("Monitor After Calibration", 140.0),
            ],
            rows: observation_rows,
        },
        Block::Spacer(36.0),
        Block::Paragraph(CLOSING_STATEMENT.to_string()),
        Block::Signature {
            role: "Authorized Signatory".to_string(),
            name: record.engineer_name.clone(),
        },
    ];

    Document {
        title: "CALIBRATION CERTIFICATE".to_string(),
        logo,
        background_fill: Some(GREY_FILL.to_string()),
        frame_color: INDIGO.to_string(),
        title_color: INDIGO.to_string(),
        blocks,
        footer_lines: vec![
            format!("Certificate ID: {}", record.certificate_id),
            format!("Generated on: {generated_on}"),
        ],
    }
}
