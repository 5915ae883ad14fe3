//! Doctor custom-object records
//!
//! A record is whatever the CRM returns; nothing here validates, fills in or
//! renames properties. Unrecognized properties are carried along untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::RecordId;

/// Property names recognized on the "doctors" object
pub mod property {
    /// Externally meaningful identifier, distinct from the store's record id
    pub const DOCTOR_ID: &str = "doctor_id";
    pub const DOCTOR_FULL_NAME: &str = "doctor_full_name";
    pub const DOCTOR_MEDICAL_SPECIALTY: &str = "doctor_medical_specialty";

    /// Properties requested by the list page, in request order
    pub const LIST: [&str; 3] = [DOCTOR_ID, DOCTOR_FULL_NAME, DOCTOR_MEDICAL_SPECIALTY];

    /// Properties requested by the detail page, in request order
    pub const DETAIL: [&str; 3] = [DOCTOR_FULL_NAME, DOCTOR_MEDICAL_SPECIALTY, DOCTOR_ID];
}

/// Property values keyed by name
///
/// The store reports a requested-but-unset property as `null`, which is kept
/// as `None` rather than coerced to an empty string.
pub type Properties = BTreeMap<String, Option<String>>;

/// One instance of the "doctors" custom object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    /// Assigned by the store; never generated locally
    pub id: RecordId,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

impl DoctorRecord {
    /// Returns a property value, or `None` if it is absent or null
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(|v| v.as_deref())
    }

    pub fn doctor_id(&self) -> Option<&str> {
        self.property(property::DOCTOR_ID)
    }

    pub fn full_name(&self) -> Option<&str> {
        self.property(property::DOCTOR_FULL_NAME)
    }

    pub fn medical_specialty(&self) -> Option<&str> {
        self.property(property::DOCTOR_MEDICAL_SPECIALTY)
    }

    /// Names of every property the store returned, recognized or not
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }
}

/// Properties for a record the store has not created yet
///
/// Serializes to the store's create body, `{"properties": {...}}`. Fields the
/// caller never set are absent from the body rather than sent as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub properties: BTreeMap<String, String>,
}

impl NewDoctor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property if a value was supplied
    pub fn with_property(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.properties.insert(name.into(), value);
        }
        self
    }
}
