//! Domain error types for the types registry.

use atlas_types_sdk::{AtlasTypesError, ServiceError};
use thiserror::Error;

/// Domain-level errors for the types registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A definition in the request is malformed.
    #[error("Invalid type definition: {0}")]
    InvalidDefinition(String),

    /// No definition matches the lookup.
    #[error("Type not found: {0}")]
    NotFound(String),

    /// The request contradicts what is stored, e.g. a category change.
    #[error("Type conflict: {0}")]
    Conflict(String),

    /// The definition is still a super type of others.
    #[error("Type {name} is referenced by {referenced_by}")]
    InUse { name: String, referenced_by: String },
}

impl DomainError {
    #[must_use]
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition(message.into())
    }

    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// HTTP status the catalog reports for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidDefinition(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) | Self::InUse { .. } => 409,
        }
    }

    /// Catalog error code carried in `errorCode`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDefinition(_) => "ATLAS-400-00-001",
            Self::NotFound(_) => "ATLAS-404-00-007",
            Self::Conflict(_) => "ATLAS-409-00-001",
            Self::InUse { .. } => "ATLAS-409-00-002",
        }
    }
}

impl From<DomainError> for AtlasTypesError {
    fn from(e: DomainError) -> Self {
        AtlasTypesError::from_service(ServiceError {
            status: e.status(),
            error_code: Some(e.error_code().to_owned()),
            message: e.to_string(),
            body: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_status_and_codes() {
        assert_eq!(DomainError::invalid_definition("x").status(), 400);
        assert_eq!(DomainError::not_found("x").status(), 404);
        assert_eq!(DomainError::conflict("x").status(), 409);

        let in_use = DomainError::InUse {
            name: "DataSet".to_owned(),
            referenced_by: "hive_table".to_owned(),
        };
        assert_eq!(in_use.status(), 409);
        assert_eq!(in_use.error_code(), "ATLAS-409-00-002");
        assert_eq!(in_use.to_string(), "Type DataSet is referenced by hive_table");
    }

    #[test]
    fn test_domain_to_sdk_error_conversion() {
        let sdk_err: AtlasTypesError = DomainError::not_found("color").into();
        assert!(sdk_err.is_not_found());
        assert_eq!(
            sdk_err.service_error().unwrap().error_code.as_deref(),
            Some("ATLAS-404-00-007")
        );

        let sdk_err: AtlasTypesError = DomainError::conflict("category").into();
        assert!(sdk_err.is_conflict());

        // Rejected content is a service answer, same as over HTTP.
        let sdk_err: AtlasTypesError = DomainError::invalid_definition("empty name").into();
        assert!(matches!(sdk_err, AtlasTypesError::HttpStatus(_)));
        assert_eq!(sdk_err.status(), Some(400));
    }
}
