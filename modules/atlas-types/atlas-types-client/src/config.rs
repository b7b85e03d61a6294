//! Client configuration: endpoint, timeouts, TLS and credentials.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use secrecy::SecretString;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// Prefix of environment variables read by [`AtlasTypesClientConfig::load`].
pub const ENV_PREFIX: &str = "ATLAS_TYPES__";

/// Service version sent with term-template operations unless overridden.
pub const DEFAULT_API_VERSION: &str = "2021-05-01-preview";

/// Default maximum response body size (10 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Trust anchors used to verify the service certificate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsRoots {
    /// Operating system trust store.
    #[default]
    Native,
    /// Mozilla roots bundled at build time.
    WebPki,
}

/// Configuration for the Atlas types client.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AtlasTypesClientConfig {
    /// Service base URL; may carry a base path.
    pub endpoint: String,

    /// Value of the `api-version` query parameter.
    #[serde(deserialize_with = "deserialize_text")]
    pub api_version: String,

    /// Deadline for a whole request, connect through last body byte.
    #[serde(deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,

    #[serde(deserialize_with = "deserialize_text")]
    pub user_agent: String,

    /// Responses larger than this are rejected with `BodyTooLarge`.
    pub max_body_size: usize,

    pub tls_roots: TlsRoots,

    /// Permits plain `http://` endpoints. Off by default.
    pub allow_insecure_http: bool,

    /// Sent as `Authorization: Bearer <token>` when set.
    #[serde(deserialize_with = "deserialize_secret")]
    pub bearer_token: Option<SecretString>,
}

impl Default for AtlasTypesClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://localhost:21443".to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("atlas-types-client/{}", env!("CARGO_PKG_VERSION")),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            tls_roots: TlsRoots::default(),
            allow_insecure_http: false,
            bearer_token: None,
        }
    }
}

impl AtlasTypesClientConfig {
    /// Config pointing at `endpoint`, everything else defaulted.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from an optional YAML file, then from
    /// `ATLAS_TYPES__*` environment variables (which win).
    ///
    /// Nested keys use `__` as separator, e.g. `ATLAS_TYPES__REQUEST_TIMEOUT=5s`.
    ///
    /// Environment values that look like integers are read back as text for
    /// the string fields. Values with leading zeros or a decimal point must be
    /// quoted to survive intact: `ATLAS_TYPES__BEARER_TOKEN='"0042"'`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a value has the
    /// wrong shape.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

/// Accepts text, and integers or booleans rendered as text.
struct TextVisitor;

impl Visitor<'_> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TextVisitor)
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_text(deserializer).map(|token| Some(SecretString::from(token)))
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AtlasTypesClientConfig::default();
        assert_eq!(cfg.api_version, "2021-05-01-preview");
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.max_body_size, 10 * 1024 * 1024);
        assert_eq!(cfg.tls_roots, TlsRoots::Native);
        assert!(!cfg.allow_insecure_http);
        assert!(cfg.bearer_token.is_none());
        assert!(cfg.user_agent.starts_with("atlas-types-client/"));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let cfg: AtlasTypesClientConfig = serde_json::from_value(serde_json::json!({
            "endpoint": "http://atlas.local:21000/api",
            "request_timeout": "1m 30s",
            "tls_roots": "webpki",
            "allow_insecure_http": true,
            "bearer_token": "s3cr3t"
        }))
        .unwrap();

        assert_eq!(cfg.endpoint, "http://atlas.local:21000/api");
        assert_eq!(cfg.request_timeout, Duration::from_secs(90));
        assert_eq!(cfg.tls_roots, TlsRoots::WebPki);
        assert!(cfg.allow_insecure_http);
        assert_eq!(cfg.bearer_token.unwrap().expose_secret(), "s3cr3t");
        assert_eq!(cfg.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<AtlasTypesClientConfig, _> =
            serde_json::from_value(serde_json::json!({ "endpont": "typo" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_duration_rejected() {
        let result: Result<AtlasTypesClientConfig, _> =
            serde_json::from_value(serde_json::json!({ "request_timeout": "soon" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let cfg = AtlasTypesClientConfig {
            bearer_token: Some(SecretString::from("hunter2")),
            ..AtlasTypesClientConfig::default()
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "endpoint: https://catalog.example.com\napi_version: 2022-03-01-preview\nrequest_timeout: 250ms"
        )
        .unwrap();

        let cfg = AtlasTypesClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.endpoint, "https://catalog.example.com");
        assert_eq!(cfg.api_version, "2022-03-01-preview");
        assert_eq!(cfg.request_timeout, Duration::from_millis(250));
        assert_eq!(cfg.max_body_size, DEFAULT_MAX_BODY_SIZE);
    }

    #[test]
    fn test_numeric_values_read_as_text() {
        let cfg: AtlasTypesClientConfig = serde_json::from_value(serde_json::json!({
            "api_version": 2024,
            "bearer_token": 123_456
        }))
        .unwrap();
        assert_eq!(cfg.api_version, "2024");
        assert_eq!(cfg.bearer_token.unwrap().expose_secret(), "123456");
    }

    #[test]
    fn test_numeric_env_token_loads() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ATLAS_TYPES__BEARER_TOKEN", "123456");
            jail.set_env("ATLAS_TYPES__USER_AGENT", "42");
            let cfg = AtlasTypesClientConfig::load(None)?;
            assert_eq!(cfg.bearer_token.unwrap().expose_secret(), "123456");
            assert_eq!(cfg.user_agent, "42");
            Ok(())
        });
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let cfg = AtlasTypesClientConfig::load(None).unwrap();
        assert_eq!(cfg.api_version, DEFAULT_API_VERSION);
    }
}
