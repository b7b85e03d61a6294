//! Operations facade over an encoder, a transport and a decoder.

use std::sync::Arc;

use async_trait::async_trait;
use atlas_types_sdk::{
    AtlasTypesApi, AtlasTypesError, ClassificationDef, EntityDef, EnumDef, RelationshipDef,
    StructDef, TermTemplateDef, TypeDef, TypeDefFilter, TypeDefHeader, TypeDefinitions,
};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::config::AtlasTypesClientConfig;
use crate::decode::{RawResponse, TypesResponse, decode_empty, decode_json};
use crate::encode::{RequestOptions, TypesOperation};
use crate::hyper_transport::HyperTransport;
use crate::transport::Transport;

/// Client for the types catalog.
///
/// Holds only the endpoint, the default `api-version` and a transport, so
/// clones are cheap and share the transport's connection pool.
///
/// The `*_with_response` methods return status and headers alongside the
/// value and accept per-call [`RequestOptions`]. The [`AtlasTypesApi`] impl
/// returns values only.
///
/// ```ignore
/// let client = AtlasTypesClient::from_config(&AtlasTypesClientConfig::load(None)?)?;
/// let table = client.get_entity_def_by_name("hive_table").await?;
/// ```
pub struct AtlasTypesClient<T = HyperTransport> {
    endpoint: Url,
    api_version: String,
    transport: Arc<T>,
}

impl<T> Clone for AtlasTypesClient<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            api_version: self.api_version.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for AtlasTypesClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasTypesClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl AtlasTypesClient<HyperTransport> {
    /// Builds a client with the default hyper transport.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a malformed endpoint or header values,
    /// `Transport` when TLS roots cannot be loaded.
    pub fn from_config(config: &AtlasTypesClientConfig) -> Result<Self, AtlasTypesError> {
        let transport = HyperTransport::from_config(config)?;
        Self::with_transport(&config.endpoint, config.api_version.clone(), transport)
    }
}

impl<T: Transport> AtlasTypesClient<T> {
    /// Builds a client over any transport.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `endpoint` is not an absolute http(s) URL.
    pub fn with_transport(
        endpoint: &str,
        api_version: impl Into<String>,
        transport: T,
    ) -> Result<Self, AtlasTypesError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| AtlasTypesError::invalid_argument("endpoint", e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.host_str().is_none() {
            return Err(AtlasTypesError::invalid_argument(
                "endpoint",
                format!("expected an absolute http(s) URL, got '{endpoint}'"),
            ));
        }

        Ok(Self {
            endpoint,
            api_version: api_version.into(),
            transport: Arc::new(transport),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    async fn send(
        &self,
        operation: TypesOperation<'_>,
        options: &RequestOptions,
    ) -> Result<RawResponse, AtlasTypesError> {
        let api_version = options.api_version.as_deref().unwrap_or(&self.api_version);
        let mut request = operation.encode(api_version)?;
        options.apply(&mut request);
        let url = request.url(&self.endpoint);

        tracing::debug!(
            operation = request.operation,
            method = %request.method,
            path = %url.path(),
            "sending types request"
        );
        self.transport.execute(url, request).await
    }

    async fn fetch<V: DeserializeOwned>(
        &self,
        operation: TypesOperation<'_>,
        options: &RequestOptions,
    ) -> Result<TypesResponse<V>, AtlasTypesError> {
        let result = self
            .send(operation, options)
            .await
            .and_then(decode_json::<V>);
        log_outcome(operation, result.as_ref().map(|r| r.status));
        result
    }

    async fn execute(
        &self,
        operation: TypesOperation<'_>,
        options: &RequestOptions,
    ) -> Result<TypesResponse<()>, AtlasTypesError> {
        let result = self.send(operation, options).await.and_then(decode_empty);
        log_outcome(operation, result.as_ref().map(|r| r.status));
        result
    }

    #[instrument(skip(self, options), fields(operation = "get_classification_def_by_guid"))]
    pub async fn get_classification_def_by_guid_with_response(
        &self,
        guid: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<ClassificationDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetClassificationDefByGuid { guid }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_classification_def_by_name"))]
    pub async fn get_classification_def_by_name_with_response(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<ClassificationDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetClassificationDefByName { name }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_entity_def_by_guid"))]
    pub async fn get_entity_def_by_guid_with_response(
        &self,
        guid: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<EntityDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetEntityDefByGuid { guid }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_entity_def_by_name"))]
    pub async fn get_entity_def_by_name_with_response(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<EntityDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetEntityDefByName { name }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_enum_def_by_guid"))]
    pub async fn get_enum_def_by_guid_with_response(
        &self,
        guid: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<EnumDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetEnumDefByGuid { guid }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_enum_def_by_name"))]
    pub async fn get_enum_def_by_name_with_response(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<EnumDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetEnumDefByName { name }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_relationship_def_by_guid"))]
    pub async fn get_relationship_def_by_guid_with_response(
        &self,
        guid: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<RelationshipDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetRelationshipDefByGuid { guid }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_relationship_def_by_name"))]
    pub async fn get_relationship_def_by_name_with_response(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<RelationshipDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetRelationshipDefByName { name }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_struct_def_by_guid"))]
    pub async fn get_struct_def_by_guid_with_response(
        &self,
        guid: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<StructDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetStructDefByGuid { guid }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_struct_def_by_name"))]
    pub async fn get_struct_def_by_name_with_response(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<StructDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetStructDefByName { name }, options)
            .await
    }

    /// Any-kind lookup; inspect [`TypeDef::category`] on the result.
    #[instrument(skip(self, options), fields(operation = "get_type_def_by_guid"))]
    pub async fn get_type_def_by_guid_with_response(
        &self,
        guid: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<TypeDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetTypeDefByGuid { guid }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_type_def_by_name"))]
    pub async fn get_type_def_by_name_with_response(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<TypeDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetTypeDefByName { name }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "delete_type_by_name"))]
    pub async fn delete_type_by_name_with_response(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<()>, AtlasTypesError> {
        self.execute(TypesOperation::DeleteTypeByName { name }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_all_type_defs"))]
    pub async fn get_all_type_defs_with_response(
        &self,
        filter: &TypeDefFilter,
        options: &RequestOptions,
    ) -> Result<TypesResponse<TypeDefinitions>, AtlasTypesError> {
        self.fetch(TypesOperation::GetAllTypeDefs { filter }, options)
            .await
    }

    #[instrument(skip_all, fields(operation = "create_type_defs", count = defs.len()))]
    pub async fn create_type_defs_with_response(
        &self,
        defs: &TypeDefinitions,
        options: &RequestOptions,
    ) -> Result<TypesResponse<TypeDefinitions>, AtlasTypesError> {
        self.fetch(TypesOperation::CreateTypeDefs { defs }, options)
            .await
    }

    #[instrument(skip_all, fields(operation = "update_type_defs", count = defs.len()))]
    pub async fn update_type_defs_with_response(
        &self,
        defs: &TypeDefinitions,
        options: &RequestOptions,
    ) -> Result<TypesResponse<TypeDefinitions>, AtlasTypesError> {
        self.fetch(TypesOperation::UpdateTypeDefs { defs }, options)
            .await
    }

    #[instrument(skip_all, fields(operation = "delete_type_defs", count = defs.len()))]
    pub async fn delete_type_defs_with_response(
        &self,
        defs: &TypeDefinitions,
        options: &RequestOptions,
    ) -> Result<TypesResponse<()>, AtlasTypesError> {
        self.execute(TypesOperation::DeleteTypeDefs { defs }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "list_type_def_headers"))]
    pub async fn list_type_def_headers_with_response(
        &self,
        filter: &TypeDefFilter,
        options: &RequestOptions,
    ) -> Result<TypesResponse<Vec<TypeDefHeader>>, AtlasTypesError> {
        self.fetch(TypesOperation::ListTypeDefHeaders { filter }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_term_template_def_by_guid"))]
    pub async fn get_term_template_def_by_guid_with_response(
        &self,
        guid: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<TermTemplateDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetTermTemplateDefByGuid { guid }, options)
            .await
    }

    #[instrument(skip(self, options), fields(operation = "get_term_template_def_by_name"))]
    pub async fn get_term_template_def_by_name_with_response(
        &self,
        name: &str,
        options: &RequestOptions,
    ) -> Result<TypesResponse<TermTemplateDef>, AtlasTypesError> {
        self.fetch(TypesOperation::GetTermTemplateDefByName { name }, options)
            .await
    }
}

fn log_outcome(
    operation: TypesOperation<'_>,
    outcome: Result<http::StatusCode, &AtlasTypesError>,
) {
    match outcome {
        Ok(status) => {
            tracing::debug!(
                operation = operation.name(),
                status = status.as_u16(),
                "types request succeeded"
            );
        }
        Err(err) => {
            tracing::debug!(
                operation = operation.name(),
                status = err.status(),
                error = %err,
                "types request failed"
            );
        }
    }
}

#[async_trait]
impl<T: Transport + 'static> AtlasTypesApi for AtlasTypesClient<T> {
    async fn get_classification_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<ClassificationDef, AtlasTypesError> {
        self.get_classification_def_by_guid_with_response(guid, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_classification_def_by_name(
        &self,
        name: &str,
    ) -> Result<ClassificationDef, AtlasTypesError> {
        self.get_classification_def_by_name_with_response(name, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_entity_def_by_guid(&self, guid: &str) -> Result<EntityDef, AtlasTypesError> {
        self.get_entity_def_by_guid_with_response(guid, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_entity_def_by_name(&self, name: &str) -> Result<EntityDef, AtlasTypesError> {
        self.get_entity_def_by_name_with_response(name, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_enum_def_by_guid(&self, guid: &str) -> Result<EnumDef, AtlasTypesError> {
        self.get_enum_def_by_guid_with_response(guid, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_enum_def_by_name(&self, name: &str) -> Result<EnumDef, AtlasTypesError> {
        self.get_enum_def_by_name_with_response(name, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_relationship_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<RelationshipDef, AtlasTypesError> {
        self.get_relationship_def_by_guid_with_response(guid, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_relationship_def_by_name(
        &self,
        name: &str,
    ) -> Result<RelationshipDef, AtlasTypesError> {
        self.get_relationship_def_by_name_with_response(name, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_struct_def_by_guid(&self, guid: &str) -> Result<StructDef, AtlasTypesError> {
        self.get_struct_def_by_guid_with_response(guid, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_struct_def_by_name(&self, name: &str) -> Result<StructDef, AtlasTypesError> {
        self.get_struct_def_by_name_with_response(name, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_type_def_by_guid(&self, guid: &str) -> Result<TypeDef, AtlasTypesError> {
        self.get_type_def_by_guid_with_response(guid, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_type_def_by_name(&self, name: &str) -> Result<TypeDef, AtlasTypesError> {
        self.get_type_def_by_name_with_response(name, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn delete_type_by_name(&self, name: &str) -> Result<(), AtlasTypesError> {
        self.delete_type_by_name_with_response(name, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_all_type_defs(
        &self,
        filter: &TypeDefFilter,
    ) -> Result<TypeDefinitions, AtlasTypesError> {
        self.get_all_type_defs_with_response(filter, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn create_type_defs(
        &self,
        defs: &TypeDefinitions,
    ) -> Result<TypeDefinitions, AtlasTypesError> {
        self.create_type_defs_with_response(defs, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn update_type_defs(
        &self,
        defs: &TypeDefinitions,
    ) -> Result<TypeDefinitions, AtlasTypesError> {
        self.update_type_defs_with_response(defs, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn delete_type_defs(&self, defs: &TypeDefinitions) -> Result<(), AtlasTypesError> {
        self.delete_type_defs_with_response(defs, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn list_type_def_headers(
        &self,
        filter: &TypeDefFilter,
    ) -> Result<Vec<TypeDefHeader>, AtlasTypesError> {
        self.list_type_def_headers_with_response(filter, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_term_template_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<TermTemplateDef, AtlasTypesError> {
        self.get_term_template_def_by_guid_with_response(guid, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }

    async fn get_term_template_def_by_name(
        &self,
        name: &str,
    ) -> Result<TermTemplateDef, AtlasTypesError> {
        self.get_term_template_def_by_name_with_response(name, &RequestOptions::default())
            .await
            .map(TypesResponse::into_value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::encode::TypesRequest;
    use http::StatusCode;
    use parking_lot::Mutex;

    /// Records requests and replays a fixed response.
    struct RecordingTransport {
        status: StatusCode,
        body: &'static str,
        seen: Mutex<Vec<(Url, TypesRequest)>>,
    }

    impl RecordingTransport {
        fn new(status: StatusCode, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(
            &self,
            url: Url,
            request: TypesRequest,
        ) -> Result<RawResponse, AtlasTypesError> {
            self.seen.lock().push((url, request));
            Ok(RawResponse::new(self.status, self.body))
        }
    }

    fn client(transport: RecordingTransport) -> AtlasTypesClient<RecordingTransport> {
        AtlasTypesClient::with_transport(
            "https://atlas.example.com/base",
            "2021-05-01-preview",
            transport,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_argument_never_reaches_transport() {
        let client = client(RecordingTransport::new(StatusCode::OK, "{}"));

        let err = client.get_struct_def_by_guid("").await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(client.transport.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_url_includes_endpoint_base_path() {
        let client = client(RecordingTransport::new(
            StatusCode::OK,
            r#"{"category":"STRUCT","name":"address"}"#,
        ));

        let def = client.get_struct_def_by_name("address").await.unwrap();
        assert_eq!(def.base.name, "address");

        let seen = client.transport.seen.lock();
        assert_eq!(
            seen[0].0.as_str(),
            "https://atlas.example.com/base/atlas/v2/types/structdef/name/address"
        );
    }

    #[tokio::test]
    async fn test_api_version_override_per_call() {
        let client = client(RecordingTransport::new(
            StatusCode::OK,
            r#"{"category":"TERM_TEMPLATE","name":"glossary"}"#,
        ));

        let options = RequestOptions::new().with_api_version("2022-03-01-preview");
        client
            .get_term_template_def_by_name_with_response("glossary", &options)
            .await
            .unwrap();
        client.get_term_template_def_by_name("glossary").await.unwrap();

        let seen = client.transport.seen.lock();
        assert_eq!(seen[0].1.query_param("api-version"), Some("2022-03-01-preview"));
        assert_eq!(seen[1].1.query_param("api-version"), Some("2021-05-01-preview"));
    }

    #[tokio::test]
    async fn test_empty_default_api_version_rejects_term_templates() {
        let client = AtlasTypesClient::with_transport(
            "https://atlas.example.com",
            "",
            RecordingTransport::new(StatusCode::OK, "{}"),
        )
        .unwrap();

        let err = client.get_term_template_def_by_guid("g1").await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(client.transport.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_response_exposes_status_and_headers() {
        let client = client(RecordingTransport::new(StatusCode::NO_CONTENT, ""));
        let resp = client
            .delete_type_by_name_with_response("color", &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_endpoint_must_be_absolute_http_url() {
        let transport = RecordingTransport::new(StatusCode::OK, "{}");
        let err = AtlasTypesClient::with_transport("not a url", "v", transport).unwrap_err();
        assert!(err.is_invalid_argument());

        let transport = RecordingTransport::new(StatusCode::OK, "{}");
        let err = AtlasTypesClient::with_transport("ftp://host/", "v", transport).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_clone_shares_transport() {
        let a = client(RecordingTransport::new(StatusCode::OK, "{}"));
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.transport, &b.transport));
    }
}
