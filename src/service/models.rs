use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{validate_numeric, validate_required, ValidationError, ValidationErrors};

/// One spares/parts line from the engineer's remarks table. `quantity` is
/// stored in canonical decimal form.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineerRemark {
    pub service_spares: String,
    pub part_no: String,
    pub rate: String,
    pub quantity: String,
    pub po_no: String,
}

/// A persisted service report. Created once on submission and never mutated
/// afterwards.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReport {
    pub service_id: String,
    pub name_and_location: String,
    pub contact_person: String,
    pub contact_number: String,
    pub service_engineer: String,
    pub date: NaiveDate,
    pub place: String,
    pub place_options: String,
    pub nature_of_job: String,
    pub report_no: String,
    pub make_model_number_of_the_instrument_quantity: String,
    pub serial_number_of_the_instrument_calibrated_ok: String,
    pub serial_number_of_the_faulty_non_working_instruments: String,
    pub engineer_remarks: Vec<EngineerRemark>,
    pub engineer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated report fields ready for the store, which assigns the id.
#[derive(Debug)]
pub struct NewService {
    pub name_and_location: String,
    pub contact_person: String,
    pub contact_number: String,
    pub service_engineer: String,
    pub date: NaiveDate,
    pub place: String,
    pub place_options: String,
    pub nature_of_job: String,
    pub report_no: String,
    pub make_model_number_of_the_instrument_quantity: String,
    pub serial_number_of_the_instrument_calibrated_ok: String,
    pub serial_number_of_the_faulty_non_working_instruments: String,
    pub engineer_remarks: Vec<EngineerRemark>,
    pub engineer_name: String,
}

#[derive(Debug, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineerRemarkInput {
    #[schema(example = "Sensor replacement")]
    pub service_spares: String,
    #[schema(example = "PN-204")]
    pub part_no: String,
    #[schema(example = "1500")]
    pub rate: String,
    #[schema(example = "2")]
    pub quantity: String,
    #[schema(example = "PO-88")]
    pub po_no: String,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateServiceRequest {
    #[schema(example = "Acme, Plant A")]
    pub name_and_location: String,
    #[schema(example = "John Doe")]
    pub contact_person: String,
    #[schema(example = "9876543210")]
    pub contact_number: String,
    #[schema(example = "MR. Vivek")]
    pub service_engineer: String,
    #[schema(example = "2024-01-01")]
    pub date: Option<NaiveDate>,
    #[schema(example = "Plant A")]
    pub place: String,
    #[schema(example = "On-site")]
    pub place_options: String,
    #[schema(example = "Calibration")]
    pub nature_of_job: String,
    #[schema(example = "SR-42")]
    pub report_no: String,
    #[schema(example = "GT x2")]
    pub make_model_numberofthe_instrument_quantity: String,
    #[schema(example = "SN1")]
    #[serde(rename = "serialNumberoftheInstrumentCalibratedOK")]
    pub serial_numberofthe_instrument_calibrated_ok: String,
    #[schema(example = "SN2")]
    pub serial_numberofthe_faulty_non_working_instruments: String,
    pub engineer_remarks: Vec<EngineerRemarkInput>,
    #[schema(example = "MR. Vivek")]
    pub engineer_name: String,
}

/// Canonical decimal form of a numeric string (`"05.0"` -> `"5"`). The input
/// must already have passed numeric validation; anything else is passed
/// through trimmed.
fn normalize_quantity(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => format!("{number}"),
        _ => trimmed.to_string(),
    }
}

impl CreateServiceRequest {
    /// Validate presence and shape of all submitted fields, including every
    /// remark entry.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_required(
            &self.name_and_location,
            "nameAndLocation",
            "Name and Location",
            &mut errors,
        );
        validate_required(
            &self.contact_person,
            "contactPerson",
            "Contact Person",
            &mut errors,
        );
        validate_required(
            &self.contact_number,
            "contactNumber",
            "Contact Number",
            &mut errors,
        );
        validate_required(
            &self.service_engineer,
            "serviceEngineer",
            "Service Engineer",
            &mut errors,
        );
        if self.date.is_none() {
            errors.add(ValidationError::empty_field("date", "Date"));
        }
        validate_required(&self.place, "place", "Place", &mut errors);
        validate_required(
            &self.place_options,
            "placeOptions",
            "Place Options",
            &mut errors,
        );
        validate_required(
            &self.nature_of_job,
            "natureOfJob",
            "Nature of Job",
            &mut errors,
        );
        validate_required(&self.report_no, "reportNo", "Report No.", &mut errors);
        validate_required(
            &self.make_model_numberofthe_instrument_quantity,
            "makeModelNumberoftheInstrumentQuantity",
            "Make & Model Number",
            &mut errors,
        );
        validate_required(
            &self.serial_numberofthe_instrument_calibrated_ok,
            "serialNumberoftheInstrumentCalibratedOK",
            "Calibrated & Tested OK",
            &mut errors,
        );
        validate_required(
            &self.serial_numberofthe_faulty_non_working_instruments,
            "serialNumberoftheFaultyNonWorkingInstruments",
            "Sr.No Faulty/Non-Working",
            &mut errors,
        );
        validate_required(
            &self.engineer_name,
            "engineerName",
            "Engineer Name",
            &mut errors,
        );

        if self.engineer_remarks.is_empty() {
            errors.add(ValidationError::new(
                "engineerRemarks",
                "at least one engineer remark is required",
            ));
        }
        for (index, remark) in self.engineer_remarks.iter().enumerate() {
            let field = |name: &str| format!("engineerRemarks[{index}].{name}");
            validate_required(
                &remark.service_spares,
                &field("serviceSpares"),
                "Service/Spares",
                &mut errors,
            );
            validate_required(&remark.part_no, &field("partNo"), "Part No.", &mut errors);
            validate_required(&remark.rate, &field("rate"), "Rate", &mut errors);
            validate_numeric(
                &remark.quantity,
                &field("quantity"),
                "Quantity",
                &mut errors,
            );
            validate_required(&remark.po_no, &field("poNo"), "PO No.", &mut errors);
        }

        errors.into_result()
    }

    /// Validate and convert into store-ready fields, trimming every string
    /// and normalizing remark quantities.
    pub fn into_new(self) -> Result<NewService, String> {
        self.validate()?;

        Ok(NewService {
            name_and_location: self.name_and_location.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            contact_number: self.contact_number.trim().to_string(),
            service_engineer: self.service_engineer.trim().to_string(),
            date: self.date.unwrap_or_default(),
            place: self.place.trim().to_string(),
            place_options: self.place_options.trim().to_string(),
            nature_of_job: self.nature_of_job.trim().to_string(),
            report_no: self.report_no.trim().to_string(),
            make_model_number_of_the_instrument_quantity: self
                .make_model_numberofthe_instrument_quantity
                .trim()
                .to_string(),
            serial_number_of_the_instrument_calibrated_ok: self
                .serial_numberofthe_instrument_calibrated_ok
                .trim()
                .to_string(),
            serial_number_of_the_faulty_non_working_instruments: self
                .serial_numberofthe_faulty_non_working_instruments
                .trim()
                .to_string(),
            engineer_remarks: self
                .engineer_remarks
                .into_iter()
                .map(|remark| EngineerRemark {
                    service_spares: remark.service_spares.trim().to_string(),
                    part_no: remark.part_no.trim().to_string(),
                    rate: remark.rate.trim().to_string(),
                    quantity: normalize_quantity(&remark.quantity),
                    po_no: remark.po_no.trim().to_string(),
                })
                .collect(),
            engineer_name: self.engineer_name.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateServiceRequest {
        serde_json::from_value(serde_json::json!({
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
                "quantity": "05.0",
                "poNo": "PO-88"
            }],
            "engineerName": "MR. Vivek"
        }))
        .unwrap()
    }

    #[test]
    fn test_request_deserialization() {
        let request = valid_request();
        assert_eq!(request.name_and_location, "Acme, Plant A");
        assert_eq!(request.engineer_remarks.len(), 1);
        assert_eq!(
            request.make_model_numberofthe_instrument_quantity,
            "GT x2"
        );
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_non_numeric_quantity_rejected() {
        let mut request = valid_request();
        request.engineer_remarks[0].quantity = "five".to_string();
        let message = request.validate().unwrap_err();
        assert!(message.contains("engineerRemarks[0].quantity"));
    }

    #[test]
    fn test_empty_remarks_rejected() {
        let mut request = valid_request();
        request.engineer_remarks.clear();
        assert!(request.validate().unwrap_err().contains("engineerRemarks"));
    }

    #[test]
    fn test_blank_remark_field_rejected() {
        let mut request = valid_request();
        request.engineer_remarks[0].po_no = " ".to_string();
        assert!(request
            .validate()
            .unwrap_err()
            .contains("engineerRemarks[0].poNo"));
    }

    #[test]
    fn test_quantity_normalized() {
        let new = valid_request().into_new().unwrap();
        assert_eq!(new.engineer_remarks[0].quantity, "5");
    }

    #[test]
    fn test_normalize_quantity_forms() {
        assert_eq!(normalize_quantity("5"), "5");
        assert_eq!(normalize_quantity("5.0"), "5");
        assert_eq!(normalize_quantity(" 2.50 "), "2.5");
        assert_eq!(normalize_quantity("0.5"), "0.5");
    }
}
