#![allow(dead_code)]

use std::time::Duration;

use atlas_types_client::{AtlasTypesClient, AtlasTypesClientConfig, TlsRoots};
use httpmock::MockServer;

pub const API_VERSION: &str = "2021-05-01-preview";

/// Config that talks plain HTTP to a local mock server.
pub fn mock_config(server: &MockServer) -> AtlasTypesClientConfig {
    AtlasTypesClientConfig {
        tls_roots: TlsRoots::WebPki,
        allow_insecure_http: true,
        request_timeout: Duration::from_secs(5),
        ..AtlasTypesClientConfig::new(server.base_url())
    }
}

/// Routes client logs to the test harness; `RUST_LOG` overrides the level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("atlas_types_client=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn mock_client(server: &MockServer) -> AtlasTypesClient {
    init_tracing();
    AtlasTypesClient::from_config(&mock_config(server)).expect("client should build")
}
