//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! doctor records portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built doctor records and form bodies
//! - `fake_crm`: An in-process fake of the CRM object endpoints
//! - `assertions`: Assertion helpers for rendered pages

pub mod fixtures;
pub mod fake_crm;
pub mod assertions;

pub use fixtures::*;
pub use fake_crm::*;
pub use assertions::*;
