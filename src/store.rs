//! In-memory record store for certificates and service reports.
//!
//! Generated ids are UUID-backed and uniqueness is enforced on insert rather
//! than trusted to generation-time randomness. The human-facing certificate
//! number comes from a separate monotonic sequence.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, Utc};
use parking_lot::RwLock;
use thiserror::Error;
use uuid::Uuid;

use crate::certificate::models::{CalibrationCertificate, NewCertificate};
use crate::service::models::{NewService, ServiceReport};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a record with id {0} already exists")]
    DuplicateId(String),
}

#[derive(Default)]
pub struct RecordStore {
    certificates: RwLock<HashMap<String, CalibrationCertificate>>,
    services: RwLock<HashMap<String, ServiceReport>>,
    certificate_seq: AtomicU64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a certificate, assigning the generated id and, when the
    /// submission did not supply one, the next sequential certificate number.
    pub fn save_certificate(
        &self,
        new: NewCertificate,
    ) -> Result<CalibrationCertificate, StoreError> {
        let certificate_id = format!("CERT-{}", Uuid::new_v4());
        let certificate_no = new
            .certificate_no
            .unwrap_or_else(|| self.next_certificate_no());

        self.insert_certificate(CalibrationCertificate {
            certificate_id,
            certificate_no,
            customer_name: new.customer_name,
            site_location: new.site_location,
            make_model: new.make_model,
            range: new.range,
            serial_no: new.serial_no,
            calibration_gas: new.calibration_gas,
            gas_canister_details: new.gas_canister_details,
            date_of_calibration: new.date_of_calibration,
            calibration_due_date: new.calibration_due_date,
            observations: new.observations,
            engineer_name: new.engineer_name,
            created_at: Utc::now(),
        })
    }

    pub fn insert_certificate(
        &self,
        record: CalibrationCertificate,
    ) -> Result<CalibrationCertificate, StoreError> {
        let mut certificates = self.certificates.write();
        if certificates.contains_key(&record.certificate_id) {
            return Err(StoreError::DuplicateId(record.certificate_id.clone()));
        }
        certificates.insert(record.certificate_id.clone(), record.clone());
        Ok(record)
    }

    pub fn find_certificate(&self, certificate_id: &str) -> Option<CalibrationCertificate> {
        self.certificates.read().get(certificate_id).cloned()
    }

    /// Compensation hook for the create flow: drops a record whose document
    /// could not be rendered.
    pub fn remove_certificate(&self, certificate_id: &str) -> Option<CalibrationCertificate> {
        self.certificates.write().remove(certificate_id)
    }

    /// Persist a service report, assigning the generated id.
    pub fn save_service(&self, new: NewService) -> Result<ServiceReport, StoreError> {
        let service_id = format!("SERV-{}", Uuid::new_v4());

        self.insert_service(ServiceReport {
            service_id,
            name_and_location: new.name_and_location,
            contact_person: new.contact_person,
            contact_number: new.contact_number,
            service_engineer: new.service_engineer,
            date: new.date,
            place: new.place,
            place_options: new.place_options,
            nature_of_job: new.nature_of_job,
            report_no: new.report_no,
            make_model_number_of_the_instrument_quantity: new
                .make_model_number_of_the_instrument_quantity,
            serial_number_of_the_instrument_calibrated_ok: new
                .serial_number_of_the_instrument_calibrated_ok,
            serial_number_of_the_faulty_non_working_instruments: new
                .serial_number_of_the_faulty_non_working_instruments,
            engineer_remarks: new.engineer_remarks,
            engineer_name: new.engineer_name,
            created_at: Utc::now(),
        })
    }

    pub fn insert_service(&self, record: ServiceReport) -> Result<ServiceReport, StoreError> {
        let mut services = self.services.write();
        if services.contains_key(&record.service_id) {
            return Err(StoreError::DuplicateId(record.service_id.clone()));
        }
        services.insert(record.service_id.clone(), record.clone());
        Ok(record)
    }

    pub fn find_service(&self, service_id: &str) -> Option<ServiceReport> {
        self.services.read().get(service_id).cloned()
    }

    pub fn remove_service(&self, service_id: &str) -> Option<ServiceReport> {
        self.services.write().remove(service_id)
    }

    pub fn certificate_count(&self) -> usize {
        self.certificates.read().len()
    }

    pub fn service_count(&self) -> usize {
        self.services.read().len()
    }

    fn next_certificate_no(&self) -> String {
        let seq = self.certificate_seq.fetch_add(1, Ordering::SeqCst) + 1;
        format!("CAL-{}-{:04}", Utc::now().year(), seq)
    }
}
