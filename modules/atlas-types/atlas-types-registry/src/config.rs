//! Configuration for the types registry.

use serde::Deserialize;

/// Configuration for the types registry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TypeRegistryConfig {
    /// Recorded as `createdBy`/`updatedBy` on every stored definition.
    /// Default: `"admin"`
    pub actor: String,
}

impl Default for TypeRegistryConfig {
    fn default() -> Self {
        Self {
            actor: "admin".to_owned(),
        }
    }
}
