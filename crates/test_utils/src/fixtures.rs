//! Pre-built Test Fixtures
//!
//! Consistent, predictable doctor data for unit and integration tests.

use core_kernel::RecordId;
use domain_doctor::record::property;
use domain_doctor::{DoctorRecord, NewDoctor, Properties};

/// Fixture for doctor test data
pub struct DoctorFixtures;

impl DoctorFixtures {
    /// Properties of the canonical test doctor
    pub fn jane_doe_properties() -> [(&'static str, &'static str); 3] {
        [
            (property::DOCTOR_FULL_NAME, "Jane Doe"),
            (property::DOCTOR_ID, "D100"),
            (property::DOCTOR_MEDICAL_SPECIALTY, "Cardiology"),
        ]
    }

    /// A second doctor for list tests
    pub fn john_smith_properties() -> [(&'static str, &'static str); 3] {
        [
            (property::DOCTOR_FULL_NAME, "John Smith"),
            (property::DOCTOR_ID, "D200"),
            (property::DOCTOR_MEDICAL_SPECIALTY, "Neurology"),
        ]
    }

    /// Create request for the canonical test doctor
    pub fn jane_doe() -> NewDoctor {
        Self::jane_doe_properties()
            .into_iter()
            .fold(NewDoctor::new(), |doctor, (name, value)| {
                doctor.with_property(name, Some(value.to_string()))
            })
    }

    /// Form-encoded body of the create form for the canonical test doctor
    pub fn jane_doe_form() -> &'static str {
        "doctor_full_name=Jane+Doe&doctor_id=D100&doctor_medical_specialty=Cardiology"
    }

    /// A record as the store would return it
    pub fn record(id: &str, full_name: &str, doctor_id: &str, specialty: &str) -> DoctorRecord {
        let properties: Properties = [
            (property::DOCTOR_FULL_NAME, full_name),
            (property::DOCTOR_ID, doctor_id),
            (property::DOCTOR_MEDICAL_SPECIALTY, specialty),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect();

        DoctorRecord {
            id: RecordId::new(id),
            properties,
            created_at: None,
            updated_at: None,
            archived: false,
        }
    }

    /// `count` distinct records with ids starting at 1001
    pub fn records(count: usize) -> Vec<DoctorRecord> {
        (0..count)
            .map(|i| {
                Self::record(
                    &(1001 + i).to_string(),
                    &format!("Doctor {}", i),
                    &format!("D{:03}", i),
                    "General Practice",
                )
            })
            .collect()
    }
}
