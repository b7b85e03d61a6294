//! The seam between encoded requests and the wire.

use std::sync::Arc;

use async_trait::async_trait;
use atlas_types_sdk::AtlasTypesError;
use url::Url;

use crate::decode::RawResponse;
use crate::encode::TypesRequest;

/// Sends one encoded request and returns the raw response.
///
/// Implementations must report network, TLS and timeout failures as
/// `Transport`/`Timeout` errors and hand every HTTP response back as a
/// [`RawResponse`], whatever its status; classification happens in the
/// decoder. They must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, url: Url, request: TypesRequest)
    -> Result<RawResponse, AtlasTypesError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(
        &self,
        url: Url,
        request: TypesRequest,
    ) -> Result<RawResponse, AtlasTypesError> {
        (**self).execute(url, request).await
    }
}
