//! HubSpot CRM Adapter
//!
//! Implements `DoctorPort` against the CRM's custom-object REST API:
//!
//! - `GET  {base}/crm/v3/objects/{object_type}` lists records
//! - `POST {base}/crm/v3/objects/{object_type}` creates a record
//! - `GET  {base}/crm/v3/objects/{object_type}/{id}` fetches one record
//!
//! Every request carries the configured bearer token. There is no retry, no
//! circuit breaker and no timeout beyond the reqwest default: a failed call is
//! reported once as a `PortError` and the caller decides what to show.
//!
//! # Error Mapping
//!
//! - connect / DNS / TLS / body read failures -> `PortError::Transport`
//! - any non-2xx status -> `PortError::Upstream` with the raw body
//! - a 2xx body that is not a record -> `PortError::Transformation`
//!
//! A create reads nothing but the new record's `id` from the response, so a
//! record the store accepted is never reported as failed over an unrelated
//! field.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};

use core_kernel::{DomainPort, PortError, RecordId};

use crate::ports::{DoctorPort, DoctorQuery};
use crate::record::{DoctorRecord, NewDoctor};

/// Public API host of the CRM
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Custom object type holding doctor records
pub const DEFAULT_OBJECT_TYPE: &str = "doctors";

/// Configuration for the CRM adapter
#[derive(Clone)]
pub struct HubSpotConfig {
    /// Base URL of the CRM API (e.g., "https://api.hubapi.com")
    pub base_url: String,

    /// Private app access token, sent as a bearer credential
    pub access_token: String,

    /// Custom object type name in the object endpoints
    pub object_type: String,
}

impl HubSpotConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            object_type: DEFAULT_OBJECT_TYPE.to_string(),
        }
    }
}

impl fmt::Debug for HubSpotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubSpotConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("object_type", &self.object_type)
            .finish()
    }
}

/// Page of records returned by the list endpoint
#[derive(Debug, Deserialize)]
struct CollectionResponse {
    #[serde(default)]
    results: Vec<DoctorRecord>,
}

/// Part of the create response the adapter relies on
#[derive(Debug, Deserialize)]
struct CreatedRecord {
    id: RecordId,
}

/// CRM adapter implementing the `DoctorPort` trait
///
/// Holds only read-only state (a pooled client, the parsed base URL and the
/// credential), so one instance is shared by every request handler.
///
/// ```rust,ignore
/// use domain_doctor::{HubSpotAdapter, HubSpotConfig};
///
/// let adapter = HubSpotAdapter::new(HubSpotConfig::new(token))?;
/// let doctors = adapter.list_doctors(&DoctorQuery::listing(20)).await?;
/// ```
#[derive(Debug)]
pub struct HubSpotAdapter {
    client: Client,
    base_url: Url,
    config: HubSpotConfig,
}

impl HubSpotAdapter {
    /// Creates a new adapter
    ///
    /// # Errors
    ///
    /// Returns `PortError::Configuration` if the base URL does not parse or
    /// cannot carry a path, or if the HTTP client cannot be built.
    pub fn new(config: HubSpotConfig) -> Result<Self, PortError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            PortError::configuration(format!("invalid CRM base URL {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PortError::configuration(format!(
                "CRM base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| PortError::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Returns the base URL of the CRM
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Builds the object endpoint URL, with the record id as its last segment when given
    fn object_url(&self, id: Option<&RecordId>) -> Result<Url, PortError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                PortError::configuration(format!(
                    "CRM base URL {:?} cannot carry a path",
                    self.config.base_url
                ))
            })?;
            segments
                .pop_if_empty()
                .extend(["crm", "v3", "objects", self.config.object_type.as_str()]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    /// Query string pairs for a read
    fn query_params(query: &DoctorQuery) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        params.push(("properties", query.joined_properties()));
        params.push(("archived", query.archived.to_string()));
        params
    }

    /// Sends an authenticated request and decodes a success body
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, PortError> {
        let response = request
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| {
                warn!(operation, error = %e, "CRM request could not be completed");
                PortError::transport(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(PortError::transport)?;
        debug!(operation, status_code = status.as_u16(), body = %body, "CRM response");

        if !status.is_success() {
            return Err(PortError::upstream(status.as_u16(), body));
        }

        serde_json::from_str(&body)
            .map_err(|e| PortError::transformation(format!("{} response: {}", operation, e)))
    }
}

impl DomainPort for HubSpotAdapter {}

#[async_trait]
impl DoctorPort for HubSpotAdapter {
    async fn list_doctors(&self, query: &DoctorQuery) -> Result<Vec<DoctorRecord>, PortError> {
        let url = self.object_url(None)?;
        let request = self.client.get(url).query(&Self::query_params(query));

        let page: CollectionResponse = self.send("list_doctors", request).await?;
        Ok(page.results)
    }

    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<RecordId, PortError> {
        let url = self.object_url(None)?;
        let request = self.client.post(url).json(doctor);

        let created: CreatedRecord = self.send("create_doctor", request).await?;
        Ok(created.id)
    }

    async fn get_doctor(
        &self,
        id: &RecordId,
        query: &DoctorQuery,
    ) -> Result<DoctorRecord, PortError> {
        let url = self.object_url(Some(id))?;
        let request = self.client.get(url).query(&Self::query_params(query));

        self.send("get_doctor", request).await
    }
}
