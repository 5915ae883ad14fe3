//! Adapters for the doctor port
//!
//! - `hubspot`: the CRM's custom-object REST API

pub mod hubspot;

pub use hubspot::{HubSpotAdapter, HubSpotConfig, DEFAULT_BASE_URL, DEFAULT_OBJECT_TYPE};
