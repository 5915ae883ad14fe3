//! View rendering
//!
//! Templates are compiled into the binary and registered with Tera once at
//! startup. Handlers build one of the view models below and hand it to
//! [`Views`]; `.html` template names keep Tera's HTML autoescaping on.

use serde::Serialize;
use tera::{Context, Tera};

use domain_doctor::record::property;
use domain_doctor::{DoctorRecord, Properties};

pub const LIST_TITLE: &str = "Doctor Records | Integrating With HubSpot I Practicum";
pub const CREATE_FORM_TITLE: &str = "Update Doctor Record Form | Integrating With HubSpot I Practicum";
pub const DETAIL_TITLE: &str = "Doctor Details | Integrating With HubSpot I Practicum";

/// Sentinel shown for every field when a record could not be loaded
pub const UNKNOWN: &str = "Unknown";

const LIST_TEMPLATE: &str = "homepage.html";
const CREATE_FORM_TEMPLATE: &str = "updates.html";
const DETAIL_TEMPLATE: &str = "doctor-details.html";

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    (LIST_TEMPLATE, include_str!("../templates/homepage.html")),
    (CREATE_FORM_TEMPLATE, include_str!("../templates/updates.html")),
    (DETAIL_TEMPLATE, include_str!("../templates/doctor-details.html")),
];

/// One row of the list page
#[derive(Debug, Clone, Serialize)]
pub struct DoctorRow {
    pub id: String,
    pub doctor_id: Option<String>,
    pub full_name: Option<String>,
    pub medical_specialty: Option<String>,
}

impl From<&DoctorRecord> for DoctorRow {
    fn from(record: &DoctorRecord) -> Self {
        Self {
            id: record.id.to_string(),
            doctor_id: record.doctor_id().map(str::to_string),
            full_name: record.full_name().map(str::to_string),
            medical_specialty: record.medical_specialty().map(str::to_string),
        }
    }
}

#[derive(Serialize)]
struct ListPage<'a> {
    title: &'a str,
    rows: Vec<DoctorRow>,
}

#[derive(Serialize)]
struct CreateFormPage<'a> {
    title: &'a str,
}

/// View model of the detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// Id taken from the request path
    pub record_id: String,
    /// Properties exactly as the store returned them
    pub doctor: Properties,
    /// Set when the record could not be loaded
    pub error: bool,
}

impl DetailView {
    /// View of a record the store returned
    pub fn found(record_id: impl Into<String>, record: DoctorRecord) -> Self {
        Self {
            record_id: record_id.into(),
            doctor: record.properties,
            error: false,
        }
    }

    /// Placeholder view used when the record could not be loaded
    pub fn unavailable(record_id: impl Into<String>) -> Self {
        let doctor = [
            property::DOCTOR_FULL_NAME,
            property::DOCTOR_MEDICAL_SPECIALTY,
            property::DOCTOR_ID,
        ]
        .into_iter()
        .map(|name| (name.to_string(), Some(UNKNOWN.to_string())))
        .collect();

        Self {
            record_id: record_id.into(),
            doctor,
            error: true,
        }
    }
}

#[derive(Serialize)]
struct DetailPage<'a> {
    title: &'a str,
    #[serde(flatten)]
    view: &'a DetailView,
}

/// Compiled page templates
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Compiles the embedded templates
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    /// Renders the list page; an empty slice renders the empty state
    pub fn render_list(&self, records: &[DoctorRecord]) -> Result<String, tera::Error> {
        let page = ListPage {
            title: LIST_TITLE,
            rows: records.iter().map(DoctorRow::from).collect(),
        };
        self.render(LIST_TEMPLATE, &page)
    }

    pub fn render_create_form(&self) -> Result<String, tera::Error> {
        self.render(CREATE_FORM_TEMPLATE, &CreateFormPage { title: CREATE_FORM_TITLE })
    }

    pub fn render_detail(&self, view: &DetailView) -> Result<String, tera::Error> {
        let page = DetailPage {
            title: DETAIL_TITLE,
            view,
        };
        self.render(DETAIL_TEMPLATE, &page)
    }

    fn render<T: Serialize>(&self, template: &str, page: &T) -> Result<String, tera::Error> {
        let context = Context::from_serialize(page)?;
        self.tera.render(template, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::RecordId;

    fn record(id: &str, name: Option<&str>) -> DoctorRecord {
        let mut properties = Properties::new();
        properties.insert(property::DOCTOR_FULL_NAME.to_string(), name.map(str::to_string));
        properties.insert(property::DOCTOR_ID.to_string(), Some("D1".to_string()));
        DoctorRecord {
            id: RecordId::new(id),
            properties,
            created_at: None,
            updated_at: None,
            archived: false,
        }
    }

    #[test]
    fn test_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_list_links_to_detail() {
        let views = Views::new().unwrap();
        let html = views.render_list(&[record("512", Some("Jane Doe"))]).unwrap();
        assert!(html.contains(r#"href="/view-doctor/512""#));
        assert!(html.contains("Jane Doe"));
        assert!(html.contains(LIST_TITLE));
    }

    #[test]
    fn test_null_property_renders_blank() {
        let views = Views::new().unwrap();
        let html = views.render_list(&[record("1", None)]).unwrap();
        assert!(!html.contains("null"));
        assert!(!html.contains("None"));
    }

    #[test]
    fn test_unavailable_view() {
        let view = DetailView::unavailable("999");
        assert!(view.error);
        assert_eq!(view.doctor.len(), 3);
        assert!(view.doctor.values().all(|v| v.as_deref() == Some(UNKNOWN)));
    }

    #[test]
    fn test_found_view_keeps_properties() {
        let rec = record("7", Some("Jane Doe"));
        let expected = rec.properties.clone();
        let view = DetailView::found("7", rec);
        assert!(!view.error);
        assert_eq!(view.doctor, expected);
    }
}
