//! Local client implementing the `AtlasTypesApi` trait.

use std::sync::Arc;

use async_trait::async_trait;
use atlas_types_sdk::{
    AtlasTypesApi, AtlasTypesError, ClassificationDef, EntityDef, EnumDef, RelationshipDef,
    StructDef, TermTemplateDef, TypeDef, TypeDefFilter, TypeDefHeader, TypeDefKind,
    TypeDefinitions,
};

use crate::domain::service::TypeRegistryService;

/// In-process client for the types registry.
///
/// Behaves like the HTTP client against a registry server: the same
/// argument checks, and service failures surface as the same
/// [`AtlasTypesError`] service variants.
pub struct TypeRegistryLocalClient {
    service: Arc<TypeRegistryService>,
}

impl TypeRegistryLocalClient {
    /// Creates a new local client with the given service.
    #[must_use]
    pub fn new(service: Arc<TypeRegistryService>) -> Self {
        Self { service }
    }

    fn kind_by_guid<K>(&self, guid: &str) -> Result<K, AtlasTypesError>
    where
        K: TypeDefKind + TryFrom<TypeDef, Error = TypeDef>,
    {
        require("guid", guid)?;
        narrow(self.service.get_by_guid(Some(K::CATEGORY), guid)?)
    }

    fn kind_by_name<K>(&self, name: &str) -> Result<K, AtlasTypesError>
    where
        K: TypeDefKind + TryFrom<TypeDef, Error = TypeDef>,
    {
        require("name", name)?;
        narrow(self.service.get_by_name(Some(K::CATEGORY), name)?)
    }
}

fn require(argument: &'static str, value: &str) -> Result<(), AtlasTypesError> {
    if value.is_empty() {
        return Err(AtlasTypesError::invalid_argument(argument, "must not be empty"));
    }
    Ok(())
}

fn narrow<K>(def: TypeDef) -> Result<K, AtlasTypesError>
where
    K: TypeDefKind + TryFrom<TypeDef, Error = TypeDef>,
{
    K::try_from(def).map_err(|other| {
        AtlasTypesError::internal(format!(
            "type {} is not a {}",
            other.name(),
            K::CATEGORY
        ))
    })
}

#[async_trait]
impl AtlasTypesApi for TypeRegistryLocalClient {
    async fn get_classification_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<ClassificationDef, AtlasTypesError> {
        self.kind_by_guid(guid)
    }

    async fn get_classification_def_by_name(
        &self,
        name: &str,
    ) -> Result<ClassificationDef, AtlasTypesError> {
        self.kind_by_name(name)
    }

    async fn get_entity_def_by_guid(&self, guid: &str) -> Result<EntityDef, AtlasTypesError> {
        self.kind_by_guid(guid)
    }

    async fn get_entity_def_by_name(&self, name: &str) -> Result<EntityDef, AtlasTypesError> {
        self.kind_by_name(name)
    }

    async fn get_enum_def_by_guid(&self, guid: &str) -> Result<EnumDef, AtlasTypesError> {
        self.kind_by_guid(guid)
    }

    async fn get_enum_def_by_name(&self, name: &str) -> Result<EnumDef, AtlasTypesError> {
        self.kind_by_name(name)
    }

    async fn get_relationship_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<RelationshipDef, AtlasTypesError> {
        self.kind_by_guid(guid)
    }

    async fn get_relationship_def_by_name(
        &self,
        name: &str,
    ) -> Result<RelationshipDef, AtlasTypesError> {
        self.kind_by_name(name)
    }

    async fn get_struct_def_by_guid(&self, guid: &str) -> Result<StructDef, AtlasTypesError> {
        self.kind_by_guid(guid)
    }

    async fn get_struct_def_by_name(&self, name: &str) -> Result<StructDef, AtlasTypesError> {
        self.kind_by_name(name)
    }

    async fn get_type_def_by_guid(&self, guid: &str) -> Result<TypeDef, AtlasTypesError> {
        require("guid", guid)?;
        self.service
            .get_by_guid(None, guid)
            .map_err(AtlasTypesError::from)
    }

    async fn get_type_def_by_name(&self, name: &str) -> Result<TypeDef, AtlasTypesError> {
        require("name", name)?;
        self.service
            .get_by_name(None, name)
            .map_err(AtlasTypesError::from)
    }

    async fn delete_type_by_name(&self, name: &str) -> Result<(), AtlasTypesError> {
        require("name", name)?;
        self.service
            .delete_by_name(name)
            .map_err(AtlasTypesError::from)
    }

    async fn get_all_type_defs(
        &self,
        filter: &TypeDefFilter,
    ) -> Result<TypeDefinitions, AtlasTypesError> {
        Ok(self.service.list(filter))
    }

    async fn create_type_defs(
        &self,
        defs: &TypeDefinitions,
    ) -> Result<TypeDefinitions, AtlasTypesError> {
        self.service
            .create(defs.clone())
            .map_err(AtlasTypesError::from)
    }

    async fn update_type_defs(
        &self,
        defs: &TypeDefinitions,
    ) -> Result<TypeDefinitions, AtlasTypesError> {
        self.service
            .update(defs.clone())
            .map_err(AtlasTypesError::from)
    }

    async fn delete_type_defs(&self, defs: &TypeDefinitions) -> Result<(), AtlasTypesError> {
        self.service
            .delete(defs.clone())
            .map_err(AtlasTypesError::from)
    }

    async fn list_type_def_headers(
        &self,
        filter: &TypeDefFilter,
    ) -> Result<Vec<TypeDefHeader>, AtlasTypesError> {
        Ok(self.service.headers(filter))
    }

    async fn get_term_template_def_by_guid(
        &self,
        guid: &str,
    ) -> Result<TermTemplateDef, AtlasTypesError> {
        self.kind_by_guid(guid)
    }

    async fn get_term_template_def_by_name(
        &self,
        name: &str,
    ) -> Result<TermTemplateDef, AtlasTypesError> {
        self.kind_by_name(name)
    }
}
