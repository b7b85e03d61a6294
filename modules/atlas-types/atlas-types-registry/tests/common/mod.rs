#![allow(dead_code)]

//! Common test utilities for atlas-types-registry integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use atlas_types_client::AtlasTypesClient;
use atlas_types_registry::api::rest::{RouterTransport, router};
use atlas_types_registry::config::TypeRegistryConfig;
use atlas_types_registry::domain::service::TypeRegistryService;
use atlas_types_registry::infra::InMemoryTypeDefRepository;

pub const API_VERSION: &str = "2021-05-01-preview";

pub fn create_service() -> Arc<TypeRegistryService> {
    let repo = Arc::new(InMemoryTypeDefRepository::new());
    Arc::new(TypeRegistryService::new(repo, TypeRegistryConfig::default()))
}

/// Client wired to the registry routes in-process.
pub fn router_client(service: Arc<TypeRegistryService>) -> AtlasTypesClient<RouterTransport> {
    AtlasTypesClient::with_transport(
        "http://registry.invalid",
        API_VERSION,
        RouterTransport::from_service(service),
    )
    .expect("client should build")
}

/// Serves the registry routes on an ephemeral local port.
pub async fn spawn_server(service: Arc<TypeRegistryService>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(service))
            .await
            .expect("registry server");
    });
    addr
}
