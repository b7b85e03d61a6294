//! Domain layer: lifecycle rules and storage contract.

pub mod error;
pub mod repo;
pub mod service;
