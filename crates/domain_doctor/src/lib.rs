//! Doctor Records Domain
//!
//! The "doctors" custom object lives entirely in a third-party CRM. This crate
//! models one record as the CRM returns it, defines the port the web layer
//! talks to, and provides the REST adapter behind that port.
//!
//! # Modules
//!
//! - `record`: `DoctorRecord` and the recognized property names
//! - `ports`: `DoctorPort` and `DoctorQuery`
//! - `adapters`: `HubSpotAdapter`, the CRM-backed implementation

pub mod record;
pub mod ports;
pub mod adapters;

pub use record::{DoctorRecord, Properties, NewDoctor};
pub use ports::{DoctorPort, DoctorQuery};
pub use adapters::{HubSpotAdapter, HubSpotConfig};
