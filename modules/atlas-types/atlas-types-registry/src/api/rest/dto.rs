//! Wire shapes that exist only at the REST boundary.
//!
//! Definitions themselves travel as the SDK models; only the error document
//! and the query strings need types of their own.

use atlas_types_sdk::TypeDefFilter;
use serde::{Deserialize, Serialize};

/// Error document returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasErrorDto {
    pub error_code: String,
    pub error_message: String,
}

/// Query of `GET /typedefs` and `GET /typedefs/headers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTypeDefsQuery {
    #[serde(default)]
    pub include_term_template: Option<bool>,
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
}

impl ListTypeDefsQuery {
    #[must_use]
    pub fn to_filter(&self) -> TypeDefFilter {
        TypeDefFilter {
            include_term_template: self.include_term_template,
            type_name: self.type_name.clone(),
        }
    }
}

/// Query of the term-template routes; `api-version` is mandatory there.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermTemplateQuery {
    #[serde(rename = "api-version", default)]
    pub api_version: Option<String>,
}

impl TermTemplateQuery {
    /// Returns `true` when a non-blank api-version was supplied.
    #[must_use]
    pub fn has_api_version(&self) -> bool {
        self.api_version
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    }
}
