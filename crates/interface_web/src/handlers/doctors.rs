//! Doctor record handlers
//!
//! List and create fail loudly with a 500. The detail page never does: any
//! CRM failure is logged and the page is rendered with placeholder values and
//! the error flag set.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use core_kernel::RecordId;
use domain_doctor::record::property;
use domain_doctor::{DoctorQuery, NewDoctor};

use crate::error::WebError;
use crate::views::DetailView;
use crate::AppState;

/// Fields of the create form; a field missing from the body stays absent
#[derive(Debug, Default, Deserialize)]
pub struct CreateDoctorForm {
    pub doctor_full_name: Option<String>,
    pub doctor_id: Option<String>,
    pub doctor_medical_specialty: Option<String>,
}

impl CreateDoctorForm {
    /// Properties sent to the store, taken verbatim from the form
    pub fn into_new_doctor(self) -> NewDoctor {
        NewDoctor::new()
            .with_property(property::DOCTOR_FULL_NAME, self.doctor_full_name)
            .with_property(property::DOCTOR_ID, self.doctor_id)
            .with_property(property::DOCTOR_MEDICAL_SPECIALTY, self.doctor_medical_specialty)
    }
}

/// Lists doctor records
pub async fn list_doctors(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    info!("Fetching doctor records");

    let query = DoctorQuery::listing(state.config.list_limit);
    let records = state
        .doctors
        .list_doctors(&query)
        .await
        .map_err(WebError::ListRecords)?;

    info!(count = records.len(), "Found doctor records");
    if let Some(first) = records.first() {
        debug!(properties = ?first.property_names(), "First record properties");
    }

    Ok(Html(state.views.render_list(&records)?))
}

/// Shows the create form
pub async fn show_create_form(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    Ok(Html(state.views.render_create_form()?))
}

/// Submits a new doctor record and redirects to the list
pub async fn create_doctor(
    State(state): State<AppState>,
    form: Option<Form<CreateDoctorForm>>,
) -> Result<Response, WebError> {
    // A body that is missing or not urlencoded submits no fields
    let doctor = form
        .map(|Form(form)| form)
        .unwrap_or_default()
        .into_new_doctor();
    info!(properties = ?doctor.properties, "Creating new doctor record");

    let record_id = state
        .doctors
        .create_doctor(&doctor)
        .await
        .map_err(WebError::CreateRecord)?;

    info!(record_id = %record_id, "Created new doctor record");

    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]).into_response())
}

/// Shows one doctor record, degrading to a placeholder on any failure
pub async fn view_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let record_id = RecordId::new(id.clone());

    let view = match state
        .doctors
        .get_doctor(&record_id, &DoctorQuery::detail())
        .await
    {
        Ok(record) => DetailView::found(id, record),
        Err(e) => {
            warn!(
                record_id = %record_id,
                status_code = ?e.status_code(),
                error = %e,
                "Error fetching doctor details, rendering placeholder"
            );
            DetailView::unavailable(id)
        }
    };

    Ok(Html(state.views.render_detail(&view)?))
}
