//! Atlas Types Registry
//!
//! An in-process registry that speaks the same types API as an Atlas-style
//! catalog. The public contract is defined in `atlas-types-sdk` and
//! re-exported here.
//!
//! ## Architecture
//!
//! - **Domain service** enforces the definition lifecycle: server-assigned
//!   guids and versions, skip-on-create, whole-definition updates, atomic
//!   bulk deletes, super-type references
//! - **REST routes** serve every catalog path with catalog-style error bodies
//! - **`RouterTransport`** lets `AtlasTypesClient` talk to the routes without
//!   a socket; **`TypeRegistryLocalClient`** skips HTTP entirely

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === PUBLIC API (from SDK) ===
pub use atlas_types_sdk::{AtlasTypesApi, AtlasTypesError, TypeDef, TypeDefinitions};

// === CONFIGURATION ===
pub mod config;
pub use config::TypeRegistryConfig;

// === CLIENTS ===
pub mod local_client;
pub use api::rest::RouterTransport;
pub use local_client::TypeRegistryLocalClient;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
