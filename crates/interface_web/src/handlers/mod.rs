//! Request handlers

pub mod doctors;
pub mod health;
