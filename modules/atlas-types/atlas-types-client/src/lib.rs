//! Atlas Types Client
//!
//! HTTP client for the types catalog:
//! - [`encode`] turns an operation and its arguments into a transport-neutral request
//! - [`decode`] classifies statuses and parses JSON bodies
//! - [`Transport`] is the seam to the wire; [`HyperTransport`] is the default
//! - [`AtlasTypesClient`] ties them together and implements [`AtlasTypesApi`]
//! - [`BlockingAtlasTypesClient`] serves callers without a runtime
//!
//! ## Usage
//!
//! ```ignore
//! use atlas_types_client::{AtlasTypesClient, AtlasTypesClientConfig};
//! use atlas_types_sdk::{AtlasTypesApi, TypeDefFilter};
//!
//! let config = AtlasTypesClientConfig::load(Some("atlas.yaml".as_ref()))?;
//! let client = AtlasTypesClient::from_config(&config)?;
//!
//! let enums = client
//!     .get_all_type_defs(&TypeDefFilter::new().with_type("enum"))
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod blocking;
pub mod client;
pub mod config;
pub mod decode;
pub mod encode;
pub mod hyper_transport;
pub mod transport;

pub use atlas_types_sdk::{AtlasTypesApi, AtlasTypesError};
pub use blocking::BlockingAtlasTypesClient;
pub use client::AtlasTypesClient;
pub use config::{AtlasTypesClientConfig, TlsRoots};
pub use decode::{RawResponse, TypesResponse};
pub use encode::{RequestOptions, TypesOperation, TypesRequest};
pub use hyper_transport::HyperTransport;
pub use transport::Transport;
