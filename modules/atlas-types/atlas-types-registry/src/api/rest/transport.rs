//! In-process [`Transport`] that feeds requests straight into the router.

use std::sync::Arc;

use async_trait::async_trait;
use atlas_types_client::{RawResponse, Transport, TypesRequest};
use atlas_types_sdk::AtlasTypesError;
use axum::Router;
use axum::body::Body;
use http_body_util::BodyExt;
use tower::ServiceExt;
use url::Url;

use super::routes::router;
use crate::domain::service::TypeRegistryService;

/// Dispatches requests to an axum [`Router`] without opening a socket.
///
/// Only the request path and query are used; the endpoint the client was
/// configured with is ignored, including any base path.
#[derive(Clone)]
pub struct RouterTransport {
    router: Router,
}

impl std::fmt::Debug for RouterTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterTransport").finish_non_exhaustive()
    }
}

impl RouterTransport {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Transport over the registry routes of `service`.
    #[must_use]
    pub fn from_service(service: Arc<TypeRegistryService>) -> Self {
        Self::new(router(service))
    }
}

#[async_trait]
impl Transport for RouterTransport {
    async fn execute(
        &self,
        _url: Url,
        request: TypesRequest,
    ) -> Result<RawResponse, AtlasTypesError> {
        let uri = request.path_and_query();
        let mut http_request = http::Request::builder()
            .method(request.method)
            .uri(uri)
            .body(Body::from(request.body.unwrap_or_default()))
            .map_err(|e| AtlasTypesError::invalid_argument("request", e.to_string()))?;
        *http_request.headers_mut() = request.headers;

        let Ok(response) = self.router.clone().oneshot(http_request).await;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(AtlasTypesError::transport)?
            .to_bytes();

        Ok(RawResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::config::TypeRegistryConfig;
    use crate::infra::InMemoryTypeDefRepository;
    use atlas_types_client::TypesOperation;
    use atlas_types_sdk::{EnumDef, TypeDefinitions};
    use http::StatusCode;

    fn transport() -> RouterTransport {
        let repo = Arc::new(InMemoryTypeDefRepository::new());
        RouterTransport::from_service(Arc::new(TypeRegistryService::new(
            repo,
            TypeRegistryConfig::default(),
        )))
    }

    fn endpoint() -> Url {
        Url::parse("http://registry.invalid").unwrap()
    }

    #[tokio::test]
    async fn test_create_and_fetch_through_router() {
        let transport = transport();
        let defs = TypeDefinitions::new().with(EnumDef::new("color"));

        let create = TypesOperation::CreateTypeDefs { defs: &defs }
            .encode("v1")
            .unwrap();
        let raw = transport.execute(endpoint(), create).await.unwrap();
        assert_eq!(raw.status, StatusCode::OK);

        let get = TypesOperation::GetEnumDefByName { name: "color" }
            .encode("v1")
            .unwrap();
        let raw = transport.execute(endpoint(), get).await.unwrap();
        assert_eq!(raw.status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&raw.body).unwrap();
        assert_eq!(body["category"], "ENUM");
    }

    #[tokio::test]
    async fn test_unknown_name_yields_error_document() {
        let get = TypesOperation::GetTypeDefByName { name: "nothing" }
            .encode("v1")
            .unwrap();
        let raw = transport().execute(endpoint(), get).await.unwrap();

        assert_eq!(raw.status, StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&raw.body).unwrap();
        assert_eq!(body["errorCode"], "ATLAS-404-00-007");
    }
}
