//! Repository trait for type-definition storage.

use atlas_types_sdk::TypeDef;

/// Storage interface used by the domain service.
///
/// Names are unique across all categories. Batch writes are applied
/// atomically with respect to readers; the service serializes writers.
pub trait TypeDefRepository: Send + Sync {
    /// Looks up a definition by guid.
    fn get_by_guid(&self, guid: &str) -> Option<TypeDef>;

    /// Looks up a definition by name.
    fn get_by_name(&self, name: &str) -> Option<TypeDef>;

    /// All stored definitions, ordered by name.
    fn list(&self) -> Vec<TypeDef>;

    /// Inserts or replaces each definition, keyed by name.
    ///
    /// Every definition must carry a guid.
    fn upsert_all(&self, defs: Vec<TypeDef>);

    /// Removes the definitions with the given names, returning those that
    /// existed.
    fn remove_all(&self, names: &[String]) -> Vec<TypeDef>;
}
