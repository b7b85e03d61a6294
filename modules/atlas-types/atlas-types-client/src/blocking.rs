//! Blocking adapter for callers without an async runtime.

use std::future::Future;

use atlas_types_sdk::AtlasTypesError;

use crate::client::AtlasTypesClient;
use crate::config::AtlasTypesClientConfig;
use crate::hyper_transport::HyperTransport;
use crate::transport::Transport;

/// Runs client calls to completion on the calling thread.
///
/// Owns a current-thread tokio runtime; every operation of
/// [`AtlasTypesClient`] is reachable through [`call`](Self::call).
///
/// ```ignore
/// use atlas_types_sdk::AtlasTypesApi;
///
/// let client = BlockingAtlasTypesClient::from_config(&config)?;
/// let color = client.call(|c| c.get_enum_def_by_name("color"))?;
/// ```
pub struct BlockingAtlasTypesClient<T = HyperTransport> {
    runtime: tokio::runtime::Runtime,
    client: AtlasTypesClient<T>,
}

impl BlockingAtlasTypesClient<HyperTransport> {
    /// # Errors
    ///
    /// Same as [`AtlasTypesClient::from_config`], plus `Internal` when the
    /// runtime cannot be started.
    pub fn from_config(config: &AtlasTypesClientConfig) -> Result<Self, AtlasTypesError> {
        Self::new(AtlasTypesClient::from_config(config)?)
    }
}

impl<T: Transport> BlockingAtlasTypesClient<T> {
    /// Wraps an async client.
    ///
    /// # Errors
    ///
    /// `Internal` when the runtime cannot be started.
    pub fn new(client: AtlasTypesClient<T>) -> Result<Self, AtlasTypesError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AtlasTypesError::internal(format!("failed to start runtime: {e}")))?;
        Ok(Self { runtime, client })
    }

    /// Runs one client call and waits for its result.
    ///
    /// # Panics
    ///
    /// Panics when invoked from inside an async runtime.
    pub fn call<'a, F, Fut>(&'a self, f: F) -> Fut::Output
    where
        F: FnOnce(&'a AtlasTypesClient<T>) -> Fut,
        Fut: Future,
    {
        self.runtime.block_on(f(&self.client))
    }

    /// The wrapped async client.
    #[must_use]
    pub fn client(&self) -> &AtlasTypesClient<T> {
        &self.client
    }
}
