//! Layout builder for service reports.

use std::path::PathBuf;

use crate::service::models::ServiceReport;

use super::common::format_date;
use super::layout::{numbered_rows, Block, Column, Document};

const INDIGO: &str = "#1a237e";
const BLACK: &str = "#000000";

const CLOSING_STATEMENT: &str = "The above-mentioned service was performed successfully \
according to the specified requirements.";

pub fn layout(record: &ServiceReport, logo: Option<PathBuf>, generated_on: &str) -> Document {
    let remark_rows = numbered_rows(
        record
            .engineer_remarks
            .iter()
            .map(|remark| {
                vec![
                    remark.service_spares.clone(),
                    remark.part_no.clone(),
                    remark.rate.clone(),
                    remark.quantity.clone(),
                    remark.po_no.clone(),
                ]
            })
            .collect(),
    );

    let blocks = vec![
        Block::field_row("Customer Name", record.name_and_location.clone()),
        Block::field_row("Contact Person", record.contact_person.clone()),
        Block::field_row("Contact Number", record.contact_number.clone()),
        Block::field_row("Service Engineer", record.service_engineer.clone()),
        Block::field_row("Date", format_date(record.date)),
        Block::field_row("Place", record.place.clone()),
        Block::field_row("Place Options", record.place_options.clone()),
        Block::field_row("Nature of Job", record.nature_of_job.clone()),
        Block::field_row("Report No.", record.report_no.clone()),
        Block::field_row(
            "Make & Model Number",
            record.make_model_number_of_the_instrument_quantity.clone(),
        ),
        Block::field_row(
            "Calibrated & Tested OK",
            record.serial_number_of_the_instrument_calibrated_ok.clone(),
        ),
        Block::field_row(
            "Sr.No Faulty/Non-Working",
            record
                .serial_number_of_the_faulty_non_working_instruments
                .clone(),
        ),
        Block::Spacer(28.0),
        Block::Heading("ENGINEER REMARKS".to_string()),
        Block::Table {
            columns: vec![
                Column::new("Sr. No.", 40.0),
                Column::new("Service/Spares", 150.0),
                Column::new("Part No.", 80.0),
                Column::new("Rate", 80.0),
                Column::new("Quantity", 80.0),
                Column::new("PO No.", 100.0),
            ],
            rows: remark_rows,
        },
        Block::Spacer(36.0),
        Block::Paragraph(CLOSING_STATEMENT.to_string()),
        Block::Signature {
            role: "Service Engineer".to_string(),
            name: record.engineer_name.clone(),
        },
    ];

    Document {
        title: "SERVICE REPORT".to_string(),
        logo,
        background_fill: None,
        frame_color: BLACK.to_string(),
        title_color: INDIGO.to_string(),
        blocks,
        footer_lines: vec![
            format!("Report No: {}", record.report_no),
            format!("Generated on: {generated_on}"),
        ],
    }
}
