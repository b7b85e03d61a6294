//! In-memory repository for type definitions.

use std::collections::{BTreeMap, HashMap};

use atlas_types_sdk::TypeDef;
use parking_lot::RwLock;

use crate::domain::repo::TypeDefRepository;

#[derive(Default)]
struct Store {
    /// Definitions keyed by name; iteration order is the listing order.
    by_name: BTreeMap<String, TypeDef>,
    /// guid -> name.
    guid_index: HashMap<String, String>,
}

impl Store {
    fn remove(&mut self, name: &str) -> Option<TypeDef> {
        let def = self.by_name.remove(name)?;
        if let Some(guid) = def.guid() {
            self.guid_index.remove(guid);
        }
        Some(def)
    }
}

/// In-memory repository for type definitions.
///
/// A single `RwLock` guards both the name map and the guid index, so
/// readers never observe a half-applied batch.
#[derive(Default)]
pub struct InMemoryTypeDefRepository {
    store: RwLock<Store>,
}

impl InMemoryTypeDefRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TypeDefRepository for InMemoryTypeDefRepository {
    fn get_by_guid(&self, guid: &str) -> Option<TypeDef> {
        let store = self.store.read();
        let name = store.guid_index.get(guid)?;
        store.by_name.get(name).cloned()
    }

    fn get_by_name(&self, name: &str) -> Option<TypeDef> {
        self.store.read().by_name.get(name).cloned()
    }

    fn list(&self) -> Vec<TypeDef> {
        self.store.read().by_name.values().cloned().collect()
    }

    fn upsert_all(&self, defs: Vec<TypeDef>) {
        let mut store = self.store.write();
        for def in defs {
            let name = def.name().to_owned();
            store.remove(&name);
            if let Some(guid) = def.guid() {
                store.guid_index.insert(guid.to_owned(), name.clone());
            }
            store.by_name.insert(name, def);
        }
    }

    fn remove_all(&self, names: &[String]) -> Vec<TypeDef> {
        let mut store = self.store.write();
        names.iter().filter_map(|name| store.remove(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use atlas_types_sdk::{EnumDef, StructDef};

    fn with_guid(def: impl Into<TypeDef>, guid: &str) -> TypeDef {
        let mut def = def.into();
        def.base_mut().guid = Some(guid.to_owned());
        def
    }

    #[test]
    fn test_lookup_by_name_and_guid() {
        let repo = InMemoryTypeDefRepository::new();
        repo.upsert_all(vec![with_guid(EnumDef::new("color"), "g-1")]);

        let by_name = repo.get_by_name("color").unwrap();
        assert_eq!(by_name.guid(), Some("g-1"));
        let by_guid = repo.get_by_guid("g-1").unwrap();
        assert_eq!(by_guid.name(), "color");
        assert!(repo.get_by_guid("g-2").is_none());
        assert!(repo.get_by_name("size").is_none());
    }

    #[test]
    fn test_replace_moves_guid_index() {
        let repo = InMemoryTypeDefRepository::new();
        repo.upsert_all(vec![with_guid(EnumDef::new("color"), "g-1")]);
        repo.upsert_all(vec![with_guid(EnumDef::new("color"), "g-9")]);

        assert!(repo.get_by_guid("g-1").is_none());
        assert!(repo.get_by_guid("g-9").is_some());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_list_is_ordered_by_name() {
        let repo = InMemoryTypeDefRepository::new();
        repo.upsert_all(vec![
            with_guid(StructDef::new("zeta"), "g-1"),
            with_guid(EnumDef::new("alpha"), "g-2"),
        ]);

        let names: Vec<String> = repo.list().iter().map(|d| d.name().to_owned()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_remove_all_returns_removed() {
        let repo = InMemoryTypeDefRepository::new();
        repo.upsert_all(vec![with_guid(EnumDef::new("color"), "g-1")]);

        let removed = repo.remove_all(&["color".to_owned(), "missing".to_owned()]);
        assert_eq!(removed.len(), 1);
        assert!(repo.is_empty());
        assert!(repo.get_by_guid("g-1").is_none());
    }
}
