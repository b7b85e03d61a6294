//! Domain service for the types registry.

use std::collections::HashSet;
use std::sync::Arc;

use atlas_types_sdk::{TypeCategory, TypeDef, TypeDefFilter, TypeDefHeader, TypeDefinitions};
use parking_lot::Mutex;
use uuid::Uuid;

use super::error::DomainError;
use super::repo::TypeDefRepository;
use crate::config::TypeRegistryConfig;

/// Domain service for type-definition lifecycle.
///
/// Reads go straight to the repository. Writes are serialized by a service
/// level lock: every batch is validated in full against the current state
/// before anything is stored, so a rejected batch leaves no trace.
pub struct TypeRegistryService {
    repo: Arc<dyn TypeDefRepository>,
    config: TypeRegistryConfig,
    write_lock: Mutex<()>,
}

impl TypeRegistryService {
    /// Creates a new `TypeRegistryService` with the given repository.
    #[must_use]
    pub fn new(repo: Arc<dyn TypeDefRepository>, config: TypeRegistryConfig) -> Self {
        Self {
            repo,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Retrieves a definition by guid, optionally requiring a category.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing has that guid or it is of another category.
    pub fn get_by_guid(
        &self,
        category: Option<TypeCategory>,
        guid: &str,
    ) -> Result<TypeDef, DomainError> {
        self.repo
            .get_by_guid(guid)
            .filter(|def| category.is_none_or(|c| def.category() == Some(c)))
            .ok_or_else(|| DomainError::not_found(describe_lookup(category, "guid", guid)))
    }

    /// Retrieves a definition by name, optionally requiring a category.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing has that name or it is of another category.
    pub fn get_by_name(
        &self,
        category: Option<TypeCategory>,
        name: &str,
    ) -> Result<TypeDef, DomainError> {
        self.repo
            .get_by_name(name)
            .filter(|def| category.is_none_or(|c| def.category() == Some(c)))
            .ok_or_else(|| DomainError::not_found(describe_lookup(category, "name", name)))
    }

    /// Lists definitions matching `filter`.
    ///
    /// Term templates are listed only when `includeTermTemplate` is `true`
    /// or the `type` filter asks for them. An unknown `type` matches nothing.
    #[must_use]
    pub fn list(&self, filter: &TypeDefFilter) -> TypeDefinitions {
        self.matching(filter).into_iter().collect()
    }

    /// Lists headers of the definitions matching `filter`.
    #[must_use]
    pub fn headers(&self, filter: &TypeDefFilter) -> Vec<TypeDefHeader> {
        self.matching(filter).iter().map(TypeDef::header).collect()
    }

    fn matching(&self, filter: &TypeDefFilter) -> Vec<TypeDef> {
        let Ok(category) = filter
            .type_name
            .as_deref()
            .map(str::parse::<TypeCategory>)
            .transpose()
        else {
            return Vec::new();
        };
        let include_term_templates = filter.include_term_template.unwrap_or(false)
            || category == Some(TypeCategory::TermTemplate);

        self.repo
            .list()
            .into_iter()
            .filter(|def| category.is_none_or(|c| def.category() == Some(c)))
            .filter(|def| {
                include_term_templates || def.category() != Some(TypeCategory::TermTemplate)
            })
            .collect()
    }

    /// Creates the definitions whose names are not yet taken.
    ///
    /// Existing names are skipped, not rejected; the result holds only what
    /// was stored, with guid, timestamps, provenance and `version = 1`.
    ///
    /// # Errors
    ///
    /// `InvalidDefinition` if any definition is malformed; nothing is stored.
    #[tracing::instrument(skip_all, fields(count = defs.len()))]
    pub fn create(&self, defs: TypeDefinitions) -> Result<TypeDefinitions, DomainError> {
        let defs = validate(defs)?;
        let _guard = self.write_lock.lock();
        let now = now_millis();

        let mut created = Vec::with_capacity(defs.len());
        for mut def in defs {
            if self.repo.get_by_name(def.name()).is_some() {
                tracing::debug!(name = def.name(), "type already exists, skipped");
                continue;
            }

            let category = def.category();
            let base = def.base_mut();
            base.category = category;
            base.guid = Some(Uuid::new_v4().to_string());
            base.create_time = Some(now);
            base.update_time = Some(now);
            base.created_by = Some(self.config.actor.clone());
            base.updated_by = Some(self.config.actor.clone());
            base.version = Some(1);
            base.last_modified_ts = Some("1".to_owned());
            created.push(def);
        }

        self.repo.upsert_all(created.clone());
        tracing::info!(created = created.len(), "type definitions created");
        Ok(created.into_iter().collect())
    }

    /// Replaces existing definitions wholesale.
    ///
    /// Guid and creation provenance are kept from the stored definition;
    /// `version` is incremented.
    ///
    /// # Errors
    ///
    /// * `InvalidDefinition` - a definition is malformed
    /// * `NotFound` - a name is not stored
    /// * `Conflict` - a definition would change category
    ///
    /// Nothing is stored when any definition fails.
    #[tracing::instrument(skip_all, fields(count = defs.len()))]
    pub fn update(&self, defs: TypeDefinitions) -> Result<TypeDefinitions, DomainError> {
        let defs = validate(defs)?;
        let _guard = self.write_lock.lock();
        let now = now_millis();

        let mut updated = Vec::with_capacity(defs.len());
        for mut def in defs {
            let existing = self.repo.get_by_name(def.name()).ok_or_else(|| {
                DomainError::not_found(format!("type {} does not exist", def.name()))
            })?;
            if existing.category() != def.category() {
                return Err(DomainError::conflict(format!(
                    "type {} is a {} and cannot be updated as a {}",
                    def.name(),
                    category_label(&existing),
                    category_label(&def),
                )));
            }

            let category = def.category();
            let previous = existing.base();
            let version = previous.version.unwrap_or(0) + 1;
            let base = def.base_mut();
            base.category = category;
            base.guid.clone_from(&previous.guid);
            base.create_time = previous.create_time;
            base.created_by.clone_from(&previous.created_by);
            base.update_time = Some(now);
            base.updated_by = Some(self.config.actor.clone());
            base.version = Some(version);
            base.last_modified_ts = Some(version.to_string());
            updated.push(def);
        }

        self.repo.upsert_all(updated.clone());
        tracing::info!(updated = updated.len(), "type definitions updated");
        Ok(updated.into_iter().collect())
    }

    /// Deletes the listed definitions, each matched on its full content.
    ///
    /// Server-assigned fields left out of a requested definition are not
    /// compared; everything else must equal the stored definition.
    ///
    /// # Errors
    ///
    /// * `NotFound` - any of them is not stored with that content
    /// * `InUse` - a remaining definition names one of them as super type
    ///
    /// Nothing is removed when any check fails.
    #[tracing::instrument(skip_all, fields(count = defs.len()))]
    pub fn delete(&self, defs: TypeDefinitions) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock();

        let mut names = Vec::with_capacity(defs.len());
        for def in defs.into_type_defs() {
            let matches = self
                .repo
                .get_by_name(def.name())
                .is_some_and(|stored| same_content(def.clone(), &stored));
            if !matches {
                return Err(DomainError::not_found(format!(
                    "no {} named {} with the given content",
                    category_label(&def),
                    def.name()
                )));
            }
            names.push(def.name().to_owned());
        }

        self.ensure_unreferenced(&names)?;
        let removed = self.repo.remove_all(&names);
        tracing::info!(deleted = removed.len(), "type definitions deleted");
        Ok(())
    }

    /// Deletes the single definition with `name`, whatever its category.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent, `InUse` when still a super type of another.
    #[tracing::instrument(skip(self))]
    pub fn delete_by_name(&self, name: &str) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock();

        if self.repo.get_by_name(name).is_none() {
            return Err(DomainError::not_found(format!("type {name} does not exist")));
        }
        let names = [name.to_owned()];
        self.ensure_unreferenced(&names)?;
        self.repo.remove_all(&names);
        tracing::info!("type definition deleted");
        Ok(())
    }

    fn ensure_unreferenced(&self, names: &[String]) -> Result<(), DomainError> {
        for def in self.repo.list() {
            if names.iter().any(|n| n == def.name()) {
                continue;
            }
            if let Some(parent) = def.super_types().iter().find(|s| names.contains(s)) {
                return Err(DomainError::InUse {
                    name: parent.clone(),
                    referenced_by: def.name().to_owned(),
                });
            }
        }
        Ok(())
    }
}

/// Checks a batch and flattens it; rejects the batch on the first problem.
fn validate(defs: TypeDefinitions) -> Result<Vec<TypeDef>, DomainError> {
    let defs = defs.into_type_defs();

    let mut seen = HashSet::with_capacity(defs.len());
    for def in &defs {
        let name = def.name();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_definition(format!(
                "{} definition has an empty name",
                category_label(def)
            )));
        }
        if !seen.insert(name) {
            return Err(DomainError::invalid_definition(format!(
                "type {name} appears more than once in the request"
            )));
        }
        if let TypeDef::Enum(enum_def) = def {
            let mut ordinals = HashSet::with_capacity(enum_def.element_defs.len());
            let duplicate = enum_def
                .element_defs
                .iter()
                .filter_map(|element| element.ordinal)
                .find(|ordinal| !ordinals.insert(*ordinal));
            if let Some(ordinal) = duplicate {
                return Err(DomainError::invalid_definition(format!(
                    "enum {name} has duplicate ordinal {ordinal}"
                )));
            }
        }
    }

    Ok(defs)
}

/// Compares a requested definition with a stored one, taking server-assigned
/// fields the request leaves out from `stored`.
fn same_content(mut requested: TypeDef, stored: &TypeDef) -> bool {
    let category = requested.category();
    let from = stored.base();
    let base = requested.base_mut();
    base.category = base.category.or(category);
    if base.guid.is_none() {
        base.guid.clone_from(&from.guid);
    }
    base.create_time = base.create_time.or(from.create_time);
    base.update_time = base.update_time.or(from.update_time);
    if base.created_by.is_none() {
        base.created_by.clone_from(&from.created_by);
    }
    if base.updated_by.is_none() {
        base.updated_by.clone_from(&from.updated_by);
    }
    base.version = base.version.or(from.version);
    if base.last_modified_ts.is_none() {
        base.last_modified_ts.clone_from(&from.last_modified_ts);
    }
    requested == *stored
}

fn describe_lookup(category: Option<TypeCategory>, key: &str, value: &str) -> String {
    match category {
        Some(category) => format!("no {category} type with {key} {value}"),
        None => format!("no type with {key} {value}"),
    }
}

fn category_label(def: &TypeDef) -> &'static str {
    def.category().map_or("UNKNOWN", TypeCategory::as_str)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::infra::InMemoryTypeDefRepository;
    use atlas_types_sdk::{
        EntityDef, EnumDef, EnumElementDef, StructDef, TermTemplateDef, TypeDefKind,
    };

    fn create_service() -> TypeRegistryService {
        TypeRegistryService::new(
            Arc::new(InMemoryTypeDefRepository::new()),
            TypeRegistryConfig {
                actor: "tester".to_owned(),
            },
        )
    }

    fn color() -> EnumDef {
        let mut def = EnumDef::new("color");
        def.element_defs = vec![
            EnumElementDef::new("RED", 0),
            EnumElementDef::new("GREEN", 1),
        ];
        def
    }

    fn entity(name: &str, super_types: &[&str]) -> EntityDef {
        let mut def = EntityDef::new(name);
        def.super_types = super_types.iter().map(|s| (*s).to_owned()).collect();
        def
    }

    #[test]
    fn test_create_assigns_server_fields() {
        let service = create_service();
        let created = service
            .create(TypeDefinitions::new().with(color()))
            .unwrap();

        let def = &created.enum_defs[0];
        assert!(def.base.guid.is_some());
        assert_eq!(def.base.version, Some(1));
        assert_eq!(def.base.created_by.as_deref(), Some("tester"));
        assert_eq!(def.base.create_time, def.base.update_time);
        assert_eq!(def.element_defs.len(), 2);
    }

    #[test]
    fn test_create_skips_existing_names() {
        let service = create_service();
        let first = service.create(TypeDefinitions::new().with(color())).unwrap();

        let again = service
            .create(
                TypeDefinitions::new()
                    .with(color())
                    .with(StructDef::new("address")),
            )
            .unwrap();

        assert_eq!(again.len(), 1);
        assert_eq!(again.struct_defs[0].name(), "address");

        let stored = service.get_by_name(None, "color").unwrap();
        assert_eq!(stored.guid(), first.enum_defs[0].guid());
    }

    #[test]
    fn test_create_rejects_duplicate_ordinals() {
        let service = create_service();
        let mut bad = color();
        bad.element_defs.push(EnumElementDef::new("BLUE", 1));

        let err = service
            .create(TypeDefinitions::new().with(StructDef::new("address")).with(bad))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDefinition(_)));
        // Rejected batches store nothing.
        assert!(service.get_by_name(None, "address").is_err());
    }

    #[test]
    fn test_create_rejects_empty_and_repeated_names() {
        let service = create_service();

        let err = service
            .create(TypeDefinitions::new().with(StructDef::new("")))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDefinition(_)));

        let err = service
            .create(
                TypeDefinitions::new()
                    .with(StructDef::new("dup"))
                    .with(EnumDef::new("dup")),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDefinition(_)));
    }

    #[test]
    fn test_update_keeps_identity_and_bumps_version() {
        let service = create_service();
        let created = service.create(TypeDefinitions::new().with(color())).unwrap();
        let original = &created.enum_defs[0];

        let mut changed = color();
        changed.element_defs.push(EnumElementDef::new("BLUE", 2));
        let updated = service
            .update(TypeDefinitions::new().with(changed))
            .unwrap();

        let def = &updated.enum_defs[0];
        assert_eq!(def.base.guid, original.base.guid);
        assert_eq!(def.base.create_time, original.base.create_time);
        assert_eq!(def.base.version, Some(2));
        assert_eq!(def.element_defs.len(), 3);

        let TypeDef::Enum(stored) = service.get_by_name(None, "color").unwrap() else {
            panic!("expected enum");
        };
        assert_eq!(stored.element_defs.len(), 3);
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let service = create_service();
        let err = service
            .update(TypeDefinitions::new().with(color()))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_update_cannot_change_category() {
        let service = create_service();
        service.create(TypeDefinitions::new().with(color())).unwrap();

        let err = service
            .update(TypeDefinitions::new().with(StructDef::new("color")))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_typed_lookup_checks_category() {
        let service = create_service();
        let created = service.create(TypeDefinitions::new().with(color())).unwrap();
        let guid = created.enum_defs[0].guid().unwrap().to_owned();

        assert!(service.get_by_guid(Some(TypeCategory::Enum), &guid).is_ok());
        assert!(service.get_by_guid(None, &guid).is_ok());
        let err = service
            .get_by_guid(Some(TypeCategory::Entity), &guid)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_bulk_delete_is_all_or_nothing() {
        let service = create_service();
        service
            .create(TypeDefinitions::new().with(color()).with(StructDef::new("address")))
            .unwrap();

        let err = service
            .delete(
                TypeDefinitions::new()
                    .with(color())
                    .with(StructDef::new("missing")),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(service.get_by_name(None, "color").is_ok());

        service
            .delete(TypeDefinitions::new().with(color()).with(StructDef::new("address")))
            .unwrap();
        assert!(service.list(&TypeDefFilter::default()).is_empty());
    }

    #[test]
    fn test_delete_super_type_in_use() {
        let service = create_service();
        service
            .create(
                TypeDefinitions::new()
                    .with(entity("DataSet", &[]))
                    .with(entity("hive_table", &["DataSet"])),
            )
            .unwrap();

        let err = service.delete_by_name("DataSet").unwrap_err();
        assert!(matches!(err, DomainError::InUse { .. }));

        // Deleting parent and child together is fine.
        service
            .delete(
                TypeDefinitions::new()
                    .with(entity("DataSet", &[]))
                    .with(entity("hive_table", &["DataSet"])),
            )
            .unwrap();
    }

    #[test]
    fn test_bulk_delete_matches_full_content() {
        let service = create_service();
        let mut address = StructDef::new("address");
        address.base.description = Some("x".to_owned());
        let created = service
            .create(TypeDefinitions::new().with(address.clone()))
            .unwrap();

        let err = service
            .delete(TypeDefinitions::new().with(StructDef::new("address")))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let mut stale = created.struct_defs[0].clone();
        stale.base.version = Some(7);
        let err = service
            .delete(TypeDefinitions::new().with(stale))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(service.get_by_name(None, "address").is_ok());

        // Both the caller's own copy and the stored copy match.
        service
            .delete(TypeDefinitions::new().with(address))
            .unwrap();
        service
            .create(TypeDefinitions::new().with(created.struct_defs[0].clone()))
            .unwrap();
        let stored = service.get_by_name(None, "address").unwrap();
        service
            .delete(TypeDefinitions::new().with(stored))
            .unwrap();
        assert!(service.list(&TypeDefFilter::default()).is_empty());
    }

    #[test]
    fn test_delete_by_name_missing() {
        let service = create_service();
        let err = service.delete_by_name("nothing").unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_list_filters() {
        let service = create_service();
        service
            .create(
                TypeDefinitions::new()
                    .with(color())
                    .with(StructDef::new("address"))
                    .with(TermTemplateDef::new("glossary")),
            )
            .unwrap();

        let all = service.list(&TypeDefFilter::default());
        assert_eq!(all.len(), 2);
        assert!(all.term_template_defs.is_empty());

        let with_templates = service.list(&TypeDefFilter::new().with_include_term_template(true));
        assert_eq!(with_templates.len(), 3);

        let enums = service.list(&TypeDefFilter::new().with_type("ENUM"));
        assert_eq!(enums.len(), 1);
        assert_eq!(enums.enum_defs[0].name(), "color");

        let templates = service.headers(&TypeDefFilter::new().with_type("term_template"));
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].category, Some(TypeCategory::TermTemplate));

        assert!(service.list(&TypeDefFilter::new().with_type("bogus")).is_empty());
    }
}
