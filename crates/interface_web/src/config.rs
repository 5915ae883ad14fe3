//! Portal configuration
//!
//! Only the CRM credential comes from the environment. Everything else is a
//! fixed constant of the portal.

use serde::Deserialize;
use std::fmt;

use core_kernel::CoreError;
use domain_doctor::adapters::{DEFAULT_BASE_URL, DEFAULT_OBJECT_TYPE};
use domain_doctor::ports::DEFAULT_LIST_LIMIT;
use domain_doctor::HubSpotConfig;

/// Environment variable prefix of the credential (`HUBSPOT_API_KEY`)
pub const ENV_PREFIX: &str = "HUBSPOT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Values read from the environment
#[derive(Deserialize)]
struct EnvSettings {
    api_key: String,
}

/// Portal configuration
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL of the CRM API
    pub crm_base_url: String,
    /// Bearer credential for the CRM
    pub crm_access_token: String,
    /// Custom object type holding doctor records
    pub crm_object_type: String,
    /// Page size of the list page
    pub list_limit: u32,
    /// Directory served for paths no route matches
    pub static_dir: String,
}

impl AppConfig {
    /// Builds the configuration around a credential
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            crm_base_url: DEFAULT_BASE_URL.to_string(),
            crm_access_token: access_token.into(),
            crm_object_type: DEFAULT_OBJECT_TYPE.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }

    /// Loads configuration from environment
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if `HUBSPOT_API_KEY` is missing or blank.
    pub fn from_env() -> Result<Self, CoreError> {
        let settings: EnvSettings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                CoreError::configuration(format!("{}_API_KEY could not be read: {}", ENV_PREFIX, e))
            })?;

        Self::from_credential(settings.api_key)
    }

    fn from_credential(api_key: String) -> Result<Self, CoreError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(CoreError::configuration(format!(
                "{}_API_KEY is empty",
                ENV_PREFIX
            )));
        }
        Ok(Self::with_access_token(api_key))
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Adapter configuration for the CRM
    pub fn crm(&self) -> HubSpotConfig {
        HubSpotConfig {
            base_url: self.crm_base_url.clone(),
            access_token: self.crm_access_token.clone(),
            object_type: self.crm_object_type.clone(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("crm_base_url", &self.crm_base_url)
            .field("crm_access_token", &"<redacted>")
            .field("crm_object_type", &self.crm_object_type)
            .field("list_limit", &self.list_limit)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}
