//! `AtlasTypesApi` trait definition.
//!
//! One method per logical operation on the type-definition registry. The
//! methods return decoded values only; implementations that talk HTTP also
//! offer variants that surface the raw status and headers.

use async_trait::async_trait;

use crate::error::AtlasTypesError;
use crate::models::{
    ClassificationDef, EntityDef, EnumDef, RelationshipDef, StructDef, TermTemplateDef, TypeDef,
    TypeDefFilter, TypeDefHeader, TypeDefinitions,
};

/// Public API of the types catalog.
///
/// Every call is independent: implementations keep no state between calls
/// and never retry. Dropping the returned future cancels the call.
///
/// ```ignore
/// let entity = api.get_entity_def_by_name("hive_table").await?;
/// let created = api.create_type_defs(&defs).await?;
/// ```
#[async_trait]
pub trait AtlasTypesApi: Send + Sync {
    /// Retrieves a classification definition by guid.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - if `guid` is empty
    /// * `NotFound` - if no classification has that guid
    async fn get_classification_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<ClassificationDef, AtlasTypesError>;

    /// Retrieves a classification definition by name.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - if `name` is empty
    /// * `NotFound` - if no classification has that name
    async fn get_classification_def_by_name(
        &self,
        name: &str,
    ) -> Result<ClassificationDef, AtlasTypesError>;

    /// Retrieves an entity definition by guid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty guid, `NotFound` when absent.
    async fn get_entity_def_by_guid(&self, guid: &str) -> Result<EntityDef, AtlasTypesError>;

    /// Retrieves an entity definition by name.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name, `NotFound` when absent.
    async fn get_entity_def_by_name(&self, name: &str) -> Result<EntityDef, AtlasTypesError>;

    /// Retrieves an enum definition by guid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty guid, `NotFound` when absent.
    async fn get_enum_def_by_guid(&self, guid: &str) -> Result<EnumDef, AtlasTypesError>;

    /// Retrieves an enum definition by name.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name, `NotFound` when absent.
    async fn get_enum_def_by_name(&self, name: &str) -> Result<EnumDef, AtlasTypesError>;

    /// Retrieves a relationship definition by guid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty guid, `NotFound` when absent.
    async fn get_relationship_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<RelationshipDef, AtlasTypesError>;

    /// Retrieves a relationship definition by name.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name, `NotFound` when absent.
    async fn get_relationship_def_by_name(
        &self,
        name: &str,
    ) -> Result<RelationshipDef, AtlasTypesError>;

    /// Retrieves a struct definition by guid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty guid, `NotFound` when absent.
    async fn get_struct_def_by_guid(&self, guid: &str) -> Result<StructDef, AtlasTypesError>;

    /// Retrieves a struct definition by name.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name, `NotFound` when absent.
    async fn get_struct_def_by_name(&self, name: &str) -> Result<StructDef, AtlasTypesError>;

    /// Retrieves a definition of any kind by guid; the `category` of the
    /// result tells which kind it is.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty guid, `NotFound` when absent.
    async fn get_type_def_by_guid(&self, guid: &str) -> Result<TypeDef, AtlasTypesError>;

    /// Retrieves a definition of any kind by name.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name, `NotFound` when absent.
    async fn get_type_def_by_name(&self, name: &str) -> Result<TypeDef, AtlasTypesError>;

    /// Deletes the definition with the given name, whatever its kind.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - if `name` is empty
    /// * `NotFound` - if nothing has that name
    /// * `Conflict` - if other definitions still depend on it
    async fn delete_type_by_name(&self, name: &str) -> Result<(), AtlasTypesError>;

    /// Lists all definitions, optionally filtered.
    ///
    /// # Errors
    ///
    /// Propagates service and transport failures.
    async fn get_all_type_defs(
        &self,
        filter: &TypeDefFilter,
    ) -> Result<TypeDefinitions, AtlasTypesError>;

    /// Creates the definitions in `defs`.
    ///
    /// Only definitions with new names are persisted; entries whose name
    /// already exists are skipped by the service. The result holds what
    /// was created, with guids and versions filled in.
    ///
    /// # Errors
    ///
    /// `Conflict` or other service errors when the batch is rejected.
    async fn create_type_defs(
        &self,
        defs: &TypeDefinitions,
    ) -> Result<TypeDefinitions, AtlasTypesError>;

    /// Replaces the definitions in `defs` wholesale; each version is bumped.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown definitions, `Conflict` for inconsistent ones.
    async fn update_type_defs(
        &self,
        defs: &TypeDefinitions,
    ) -> Result<TypeDefinitions, AtlasTypesError>;

    /// Deletes the definitions in `defs`.
    ///
    /// # Errors
    ///
    /// `NotFound` when any of them is absent.
    async fn delete_type_defs(&self, defs: &TypeDefinitions) -> Result<(), AtlasTypesError>;

    /// Lists `{category, guid, name}` headers, optionally filtered.
    ///
    /// # Errors
    ///
    /// Propagates service and transport failures.
    async fn list_type_def_headers(
        &self,
        filter: &TypeDefFilter,
    ) -> Result<Vec<TypeDefHeader>, AtlasTypesError>;

    /// Retrieves a term template by guid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty guid or a missing api-version,
    /// `NotFound` when absent.
    async fn get_term_template_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<TermTemplateDef, AtlasTypesError>;

    /// Retrieves a term template by name.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name or a missing api-version,
    /// `NotFound` when absent.
    async fn get_term_template_def_by_name(
        &self,
        name: &str,
    ) -> Result<TermTemplateDef, AtlasTypesError>;
}
