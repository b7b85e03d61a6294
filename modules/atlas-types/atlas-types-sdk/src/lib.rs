//! Atlas Types SDK
//!
//! This crate provides the public contract of the type-definition registry of
//! a metadata catalog:
//! - `AtlasTypesApi` trait implemented by the HTTP client and the local registry
//! - Type-definition models (`ClassificationDef`, `EntityDef`, `EnumDef`,
//!   `RelationshipDef`, `StructDef`, `TermTemplateDef`, the polymorphic
//!   `TypeDef` and the bulk `TypeDefinitions` container)
//! - `AtlasTypesError` for error handling
//!
//! ## Usage
//!
//! ```ignore
//! use atlas_types_sdk::{AtlasTypesApi, EnumDef, EnumElementDef, TypeDefinitions};
//!
//! let mut color = EnumDef::new("color");
//! color.element_defs = vec![
//!     EnumElementDef::new("RED", 0),
//!     EnumElementDef::new("GREEN", 1),
//! ];
//!
//! let created = api.create_type_defs(&TypeDefinitions::new().with(color)).await?;
//! let color = api.get_enum_def_by_name("color").await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root for convenience
pub use api::AtlasTypesApi;
pub use error::{AtlasTypesError, ServiceError};
pub use models::{
    AttributeDef, BaseTypeDef, Cardinality, ClassificationDef, ConstraintDef, EntityDef, EnumDef,
    EnumElementDef, RelationshipAttributeDef, RelationshipCategory, RelationshipDef,
    RelationshipEndDef, StructDef, TermTemplateDef, TypeCategory, TypeDef, TypeDefFilter,
    TypeDefHeader, TypeDefKind, TypeDefinitions, UnknownCategory,
};
