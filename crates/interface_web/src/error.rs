//! Web error handling
//!
//! Failures reach the browser as plain-text 500s with a generic message. The
//! full error, including any upstream body, only goes to the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;

pub const LIST_FAILED_MESSAGE: &str = "Error fetching doctor records. Check console for details.";
pub const CREATE_FAILED_MESSAGE: &str = "Error creating doctor record. Check console for details.";
pub const RENDER_FAILED_MESSAGE: &str = "Error rendering page. Check console for details.";

/// Web error types
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Error fetching doctor records: {0}")]
    ListRecords(#[source] PortError),

    #[error("Error creating doctor record: {0}")]
    CreateRecord(#[source] PortError),

    #[error("Error rendering view: {0}")]
    Render(#[from] tera::Error),
}

impl WebError {
    /// Message safe to show to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            WebError::ListRecords(_) => LIST_FAILED_MESSAGE,
            WebError::CreateRecord(_) => CREATE_FAILED_MESSAGE,
            WebError::Render(_) => RENDER_FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            WebError::ListRecords(port) | WebError::CreateRecord(port) => {
                error!(
                    status_code = ?port.status_code(),
                    error = %self,
                    "CRM request failed"
                );
            }
            WebError::Render(render) => {
                error!(error = ?render, "View rendering failed");
            }
        }

        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}
