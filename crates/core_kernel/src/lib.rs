//! Core Kernel - Foundational types shared by the doctor records portal
//!
//! This crate provides the building blocks used by the domain and interface crates:
//! - The `PortError` taxonomy every store adapter reports through
//! - The `DomainPort` marker trait for adapter seams
//! - Store-assigned record identifiers

pub mod error;
pub mod identifiers;
pub mod ports;

pub use error::CoreError;
pub use identifiers::RecordId;
pub use ports::{DomainPort, PortError};
