//! Doctor Domain Ports
//!
//! `DoctorPort` is the only way the web layer reaches doctor records. The CRM
//! adapter is the one production implementation; another backing store or
//! object type can be added without touching the route handlers.
//!
//! ```rust,ignore
//! use domain_doctor::{DoctorPort, DoctorQuery};
//! use std::sync::Arc;
//!
//! async fn first_page(port: Arc<dyn DoctorPort>) -> Result<usize, PortError> {
//!     let records = port.list_doctors(&DoctorQuery::listing(20)).await?;
//!     Ok(records.len())
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, RecordId};

use crate::record::{property, DoctorRecord, NewDoctor};

/// Default page size used by the store when none is given
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Query parameters for reading doctor records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorQuery {
    /// Property names to return, passed through exactly as given
    pub properties: Vec<String>,
    /// Maximum number of records; only meaningful for listing
    pub limit: Option<u32>,
    /// Whether archived records are included
    pub archived: bool,
}

impl DoctorQuery {
    /// Query used by the list page: recognized properties, one page, no archived records
    pub fn listing(limit: u32) -> Self {
        Self {
            properties: property::LIST.iter().map(|p| p.to_string()).collect(),
            limit: Some(limit),
            archived: false,
        }
    }

    /// Query used by the detail page: recognized properties, no archived records
    pub fn detail() -> Self {
        Self {
            properties: property::DETAIL.iter().map(|p| p.to_string()).collect(),
            limit: None,
            archived: false,
        }
    }

    /// Property names joined the way the store expects them in a query string
    pub fn joined_properties(&self) -> String {
        self.properties.join(",")
    }
}

/// Port for reading and creating doctor records in the backing store
///
/// Implementations must not cache, retry, or validate: each call is exactly
/// one request to the store, and the store is the sole validator.
#[async_trait]
pub trait DoctorPort: DomainPort {
    /// Lists records matching the query
    ///
    /// An empty result is a success, not an error.
    async fn list_doctors(&self, query: &DoctorQuery) -> Result<Vec<DoctorRecord>, PortError>;

    /// Asks the store to create a record with the given properties
    ///
    /// Returns the id the store assigned to the new record.
    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<RecordId, PortError>;

    /// Fetches one record by its store-assigned id
    ///
    /// An unknown id surfaces as `PortError::Upstream` with status 404.
    async fn get_doctor(
        &self,
        id: &RecordId,
        query: &DoctorQuery,
    ) -> Result<DoctorRecord, PortError>;
}
