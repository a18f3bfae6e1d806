use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{validate_required, ValidationError, ValidationErrors};

/// One gas reading taken before and after calibration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, ToSchema)]
pub struct Observation {
    #[schema(example = "CO")]
    pub gas: String,
    #[schema(example = "10")]
    pub before: String,
    #[schema(example = "0")]
    pub after: String,
}

/// A persisted calibration certificate. Created once on submission and never
/// mutated afterwards.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationCertificate {
    pub certificate_id: String,
    pub certificate_no: String,
    pub customer_name: String,
    pub site_location: String,
    pub make_model: String,
    pub range: String,
    pub serial_no: String,
    pub calibration_gas: String,
    pub gas_canister_details: String,
    pub date_of_calibration: NaiveDate,
    pub calibration_due_date: NaiveDate,
    pub observations: Vec<Observation>,
    pub engineer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated certificate fields ready for the store; the store assigns the
/// generated id and, when `certificate_no` is `None`, the sequential number.
#[derive(Debug)]
pub struct NewCertificate {
    pub certificate_no: Option<String>,
    pub customer_name: String,
    pub site_location: String,
    pub make_model: String,
    pub range: String,
    pub serial_no: String,
    pub calibration_gas: String,
    pub gas_canister_details: String,
    pub date_of_calibration: NaiveDate,
    pub calibration_due_date: NaiveDate,
    pub observations: Vec<Observation>,
    pub engineer_name: String,
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCertificateRequest {
    /// Human-facing number printed on the document; assigned by the store
    /// when omitted.
    pub certificate_no: Option<String>,
    #[schema(example = "Acme")]
    pub customer_name: String,
    #[schema(example = "Plant A")]
    pub site_location: String,
    #[schema(example = "GT")]
    pub make_model: String,
    #[schema(example = "0-100")]
    pub range: String,
    #[schema(example = "SN1")]
    pub serial_no: String,
    #[schema(example = "CO")]
    pub calibration_gas: String,
    #[schema(example = "Cyl-1")]
    pub gas_canister_details: String,
    #[schema(example = "2024-01-01")]
    pub date_of_calibration: Option<NaiveDate>,
    #[schema(example = "2025-01-01")]
    pub calibration_due_date: Option<NaiveDate>,
    pub observations: Vec<Observation>,
    #[schema(example = "MR. Vivek")]
    pub engineer_name: String,
}

impl CreateCertificateRequest {
    /// Validate presence and shape of all submitted fields.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_required(
            &self.customer_name,
            "customerName",
            "Customer Name",
            &mut errors,
        );
        validate_required(
            &self.site_location,
            "siteLocation",
            "Site Location",
            &mut errors,
        );
        validate_required(&self.make_model, "makeModel", "Make & Model", &mut errors);
        validate_required(&self.range, "range", "Range", &mut errors);
        validate_required(&self.serial_no, "serialNo", "Serial No.", &mut errors);
        validate_required(
            &self.calibration_gas,
            "calibrationGas",
            "Calibration Gas",
            &mut errors,
        );
        validate_required(
            &self.gas_canister_details,
            "gasCanisterDetails",
            "Gas Canister Details",
            &mut errors,
        );
        if self.date_of_calibration.is_none() {
            errors.add(ValidationError::empty_field(
                "dateOfCalibration",
                "Date of Calibration",
            ));
        }
        if self.calibration_due_date.is_none() {
            errors.add(ValidationError::empty_field(
                "calibrationDueDate",
                "Calibration Due Date",
            ));
        }
        if self.observations.is_empty() {
            errors.add(ValidationError::new(
                "observations",
                "at least one observation is required",
            ));
        }
        validate_required(
            &self.engineer_name,
            "engineerName",
            "Engineer Name",
            &mut errors,
        );

        errors.into_result()
    }

    /// Validate and convert into store-ready fields, trimming every string.
    pub fn into_new(self) -> Result<NewCertificate, String> {
        self.validate()?;

        Ok(NewCertificate {
            certificate_no: self.certificate_no.and_then(|no| {
                let trimmed = no.trim().to_string();
                (!trimmed.is_empty()).then_some(trimmed)
            }),
            customer_name: self.customer_name.trim().to_string(),
            site_location: self.site_location.trim().to_string(),
            make_model: self.make_model.trim().to_string(),
            range: self.range.trim().to_string(),
            serial_no: self.serial_no.trim().to_string(),
            calibration_gas: self.calibration_gas.trim().to_string(),
            gas_canister_details: self.gas_canister_details.trim().to_string(),
            date_of_calibration: self.date_of_calibration.unwrap_or_default(),
            calibration_due_date: self.calibration_due_date.unwrap_or_default(),
            observations: self.observations,
            engineer_name: self.engineer_name.trim().to_string(),
        })
    }
}
