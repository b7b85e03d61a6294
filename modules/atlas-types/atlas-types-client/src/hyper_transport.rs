//! Default [`Transport`]: a pooled hyper client over rustls.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use atlas_types_sdk::AtlasTypesError;
use bytes::Bytes;
use http::header::{AUTHORIZATION, USER_AGENT};
use http::{HeaderValue, Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use rustls_pki_types::CertificateDer;
use secrecy::ExposeSecret;
use url::Url;

use crate::config::{AtlasTypesClientConfig, TlsRoots};
use crate::decode::RawResponse;
use crate::encode::TypesRequest;
use crate::transport::Transport;

type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

static NATIVE_ROOTS_CACHE: OnceLock<Vec<CertificateDer<'static>>> = OnceLock::new();

/// HTTP/1.1 and HTTP/2 transport with connection pooling.
///
/// Each request is bounded by the configured timeout, which covers connect,
/// response headers and the whole body. Bodies above `max_body_size` are
/// rejected without buffering the rest.
#[derive(Clone)]
pub struct HyperTransport {
    client: HyperClient,
    request_timeout: Duration,
    max_body_size: usize,
    user_agent: HeaderValue,
    authorization: Option<HeaderValue>,
    allow_insecure_http: bool,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("request_timeout", &self.request_timeout)
            .field("max_body_size", &self.max_body_size)
            .field("user_agent", &self.user_agent)
            .field("authorization", &self.authorization.as_ref().map(|_| "[REDACTED]"))
            .field("allow_insecure_http", &self.allow_insecure_http)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Builds the transport from client configuration.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - the user agent or bearer token is not a valid
    ///   header value
    /// * `Transport` - TLS roots could not be loaded
    pub fn from_config(config: &AtlasTypesClientConfig) -> Result<Self, AtlasTypesError> {
        let https = build_https_connector(config.tls_roots, config.allow_insecure_http)?;

        let mut client_builder = Client::builder(TokioExecutor::new());
        client_builder.pool_timer(TokioTimer::new());
        let client = client_builder.build::<_, Full<Bytes>>(https);

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| AtlasTypesError::invalid_argument("user_agent", e.to_string()))?;

        let authorization = config
            .bearer_token
            .as_ref()
            .map(|token| {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                        .map_err(|_| {
                            AtlasTypesError::invalid_argument(
                                "bearer_token",
                                "not a valid header value",
                            )
                        })?;
                value.set_sensitive(true);
                Ok::<_, AtlasTypesError>(value)
            })
            .transpose()?;

        if config.allow_insecure_http {
            tracing::warn!("plain http endpoints are permitted; traffic may be unencrypted");
        }

        Ok(Self {
            client,
            request_timeout: config.request_timeout,
            max_body_size: config.max_body_size,
            user_agent,
            authorization,
            allow_insecure_http: config.allow_insecure_http,
        })
    }

    fn build_request(
        &self,
        url: &Url,
        request: TypesRequest,
    ) -> Result<Request<Full<Bytes>>, AtlasTypesError> {
        match url.scheme() {
            "https" => {}
            "http" if self.allow_insecure_http => {}
            "http" => {
                return Err(AtlasTypesError::invalid_argument(
                    "endpoint",
                    "plain http is not permitted unless allow_insecure_http is set",
                ));
            }
            other => {
                return Err(AtlasTypesError::invalid_argument(
                    "endpoint",
                    format!("unsupported scheme '{other}'"),
                ));
            }
        }

        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|e: http::uri::InvalidUri| {
                AtlasTypesError::invalid_argument("endpoint", e.to_string())
            })?;

        let mut http_request = Request::new(Full::new(request.body.unwrap_or_default()));
        *http_request.method_mut() = request.method;
        *http_request.uri_mut() = uri;
        *http_request.headers_mut() = request.headers;

        let headers = http_request.headers_mut();
        headers
            .entry(USER_AGENT)
            .or_insert_with(|| self.user_agent.clone());
        if let Some(authorization) = &self.authorization {
            headers.insert(AUTHORIZATION, authorization.clone());
        }

        Ok(http_request)
    }

    async fn round_trip(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<RawResponse, AtlasTypesError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(AtlasTypesError::transport)?;

        let (parts, body) = response.into_parts();
        let body = read_body_limited(body, self.max_body_size).await?;

        Ok(RawResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn execute(
        &self,
        url: Url,
        request: TypesRequest,
    ) -> Result<RawResponse, AtlasTypesError> {
        let http_request = self.build_request(&url, request)?;

        match tokio::time::timeout(self.request_timeout, self.round_trip(http_request)).await {
            Ok(result) => result,
            Err(_) => Err(AtlasTypesError::Timeout(self.request_timeout)),
        }
    }
}

async fn read_body_limited(
    body: hyper::body::Incoming,
    limit: usize,
) -> Result<Bytes, AtlasTypesError> {
    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(AtlasTypesError::transport)?;
        if let Some(chunk) = frame.data_ref() {
            if collected.len() + chunk.len() > limit {
                return Err(AtlasTypesError::BodyTooLarge {
                    limit,
                    actual: collected.len() + chunk.len(),
                });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(Bytes::from(collected))
}

fn build_https_connector(
    tls_roots: TlsRoots,
    allow_http: bool,
) -> Result<HttpsConnector<HttpConnector>, AtlasTypesError> {
    match tls_roots {
        TlsRoots::WebPki => {
            let builder = hyper_rustls::HttpsConnectorBuilder::new()
                .with_provider_and_webpki_roots(crypto_provider())
                .map_err(AtlasTypesError::transport)?;
            let connector = if allow_http {
                builder.https_or_http().enable_all_versions().build()
            } else {
                builder.https_only().enable_all_versions().build()
            };
            Ok(connector)
        }
        TlsRoots::Native => {
            let builder =
                hyper_rustls::HttpsConnectorBuilder::new().with_tls_config(native_roots_config()?);
            let connector = if allow_http {
                builder.https_or_http().enable_all_versions().build()
            } else {
                builder.https_only().enable_all_versions().build()
            };
            Ok(connector)
        }
    }
}

fn crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

/// OS trust store, loaded once per process.
fn native_root_certs() -> &'static [CertificateDer<'static>] {
    NATIVE_ROOTS_CACHE
        .get_or_init(|| {
            let result = rustls_native_certs::load_native_certs();
            for err in &result.errors {
                tracing::warn!(error = %err, "error loading native root certificate");
            }
            tracing::debug!(count = result.certs.len(), "loaded native root certificates");
            result.certs
        })
        .as_slice()
}

fn native_roots_config() -> Result<rustls::ClientConfig, AtlasTypesError> {
    let certs = native_root_certs();
    if certs.is_empty() {
        return Err(AtlasTypesError::transport(
            "no native root CA certificates found in OS certificate store",
        ));
    }

    let mut root_store = rustls::RootCertStore::empty();
    let (added, ignored) = root_store.add_parsable_certificates(certs.iter().cloned());
    if ignored > 0 {
        tracing::warn!(added, ignored, "some native root certificates could not be parsed");
    }
    if added == 0 {
        return Err(AtlasTypesError::transport(format!(
            "no valid native root CA certificates parsed (found {})",
            certs.len()
        )));
    }

    let config = rustls::ClientConfig::builder_with_provider(crypto_provider())
        .with_safe_default_protocol_versions()
        .map_err(AtlasTypesError::transport)?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}
