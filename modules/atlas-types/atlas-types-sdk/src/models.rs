//! Public models for the Atlas types catalog.
//!
//! These are transport-agnostic data structures mirroring the JSON shapes the
//! catalog exchanges on the wire. Field names follow the service's camelCase
//! spelling; optional fields are skipped when absent so that a decoded
//! definition re-encodes without gaining fields it never had.
//!
//! The client never validates these values. Consistency rules (unique names,
//! matching categories, acyclic super types) belong to the service.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Discriminator identifying which kind of definition a payload describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCategory {
    Primitive,
    ObjectIdType,
    Enum,
    Struct,
    Classification,
    Entity,
    Array,
    Map,
    Relationship,
    TermTemplate,
}

impl TypeCategory {
    /// Wire spelling of the category, e.g. `TERM_TEMPLATE`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primitive => "PRIMITIVE",
            Self::ObjectIdType => "OBJECT_ID_TYPE",
            Self::Enum => "ENUM",
            Self::Struct => "STRUCT",
            Self::Classification => "CLASSIFICATION",
            Self::Entity => "ENTITY",
            Self::Array => "ARRAY",
            Self::Map => "MAP",
            Self::Relationship => "RELATIONSHIP",
            Self::TermTemplate => "TERM_TEMPLATE",
        }
    }

    /// Returns `true` for the six categories that have a definition shape
    /// of their own (everything except primitives, object ids, arrays and maps).
    #[must_use]
    pub const fn is_definition_kind(self) -> bool {
        matches!(
            self,
            Self::Enum
                | Self::Struct
                | Self::Classification
                | Self::Entity
                | Self::Relationship
                | Self::TermTemplate
        )
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`TypeCategory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for TypeCategory {
    type Err = UnknownCategory;

    /// Case-insensitive; accepts both `TERM_TEMPLATE` and `term_template`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.to_ascii_uppercase().as_str() {
            "PRIMITIVE" => Self::Primitive,
            "OBJECT_ID_TYPE" => Self::ObjectIdType,
            "ENUM" => Self::Enum,
            "STRUCT" => Self::Struct,
            "CLASSIFICATION" => Self::Classification,
            "ENTITY" => Self::Entity,
            "ARRAY" => Self::Array,
            "MAP" => Self::Map,
            "RELATIONSHIP" => Self::Relationship,
            "TERM_TEMPLATE" => Self::TermTemplate,
            _ => return Err(UnknownCategory(s.to_owned())),
        };
        Ok(category)
    }
}

/// How many values an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    Single,
    List,
    Set,
}

/// Semantics of a relationship between two entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipCategory {
    Association,
    Aggregation,
    Composition,
}

/// Fields shared by every definition kind.
///
/// `guid`, the timestamps, `createdBy`/`updatedBy` and `version` are assigned
/// by the service; callers normally leave them empty on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTypeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TypeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Locale/formatting metadata the service attaches to some payloads.
    /// Kept verbatim and never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_formatter: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    /// Opaque modification token; compared for equality only.
    #[serde(
        rename = "lastModifiedTS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified_ts: Option<String>,
}

impl BaseTypeDef {
    /// Creates a base with the given category and name and nothing else set.
    #[must_use]
    pub fn new(category: TypeCategory, name: impl Into<String>) -> Self {
        Self {
            category: Some(category),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A single `{type, params}` constraint attached to an attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub constraint_type: Option<String>,
    /// Open-ended parameters; values are arbitrary JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, serde_json::Value>>,
}

/// A named, typed field descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_notification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_indexable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unique: Option<bool>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, String>>,
    /// Name of the type this attribute holds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_max_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_min_count: Option<i32>,
}

impl AttributeDef {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }
}

/// Attribute of an entity type that is backed by a relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipAttributeDef {
    #[serde(flatten)]
    pub attribute: AttributeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_legacy_attribute: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type_name: Option<String>,
}

/// One member of an enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumElementDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i32>,
    #[serde(default)]
    pub value: String,
}

impl EnumElementDef {
    #[must_use]
    pub fn new(value: impl Into<String>, ordinal: i32) -> Self {
        Self {
            description: None,
            ordinal: Some(ordinal),
            value: value.into(),
        }
    }
}

/// One side of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEndDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_container: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_legacy_attribute: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Entity type name at this end.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Access to the shared part of a concrete definition kind.
pub trait TypeDefKind {
    /// Category every definition of this kind carries.
    const CATEGORY: TypeCategory;

    fn base(&self) -> &BaseTypeDef;

    fn base_mut(&mut self) -> &mut BaseTypeDef;

    fn name(&self) -> &str {
        &self.base().name
    }

    fn guid(&self) -> Option<&str> {
        self.base().guid.as_deref()
    }
}

macro_rules! impl_type_def_kind {
    ($ty:ty, $category:expr) => {
        impl TypeDefKind for $ty {
            const CATEGORY: TypeCategory = $category;

            fn base(&self) -> &BaseTypeDef {
                &self.base
            }

            fn base_mut(&mut self) -> &mut BaseTypeDef {
                &mut self.base
            }
        }

        impl $ty {
            /// Creates an empty definition of this kind with the given name.
            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    base: BaseTypeDef::new($category, name),
                    ..Self::default()
                }
            }
        }
    };
}

/// Classification type; supports multiple inheritance among classifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_defs: Vec<AttributeDef>,
    /// Entity types this classification may be applied to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub super_types: Vec<String>,
}

impl_type_def_kind!(ClassificationDef, TypeCategory::Classification);

/// Entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_defs: Vec<AttributeDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship_attribute_defs: Vec<RelationshipAttributeDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub super_types: Vec<String>,
}

impl_type_def_kind!(EntityDef, TypeCategory::Entity);

/// Enumeration type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub element_defs: Vec<EnumElementDef>,
}

impl_type_def_kind!(EnumDef, TypeCategory::Enum);

/// Relationship type between two entity types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_defs: Vec<AttributeDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_def1: Option<RelationshipEndDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_def2: Option<RelationshipEndDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_category: Option<RelationshipCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_label: Option<String>,
}

impl_type_def_kind!(RelationshipDef, TypeCategory::Relationship);

/// Struct type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_defs: Vec<AttributeDef>,
}

impl_type_def_kind!(StructDef, TypeCategory::Struct);

/// Glossary term template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermTemplateDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_defs: Vec<AttributeDef>,
}

impl_type_def_kind!(TermTemplateDef, TypeCategory::TermTemplate);

/// A definition of any kind, as returned by the polymorphic `typedef` lookups.
///
/// Deserialization dispatches on the `category` field. Categories without a
/// shape of their own (primitives, object ids, arrays, maps) decode into
/// [`TypeDef::Other`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeDef {
    Classification(ClassificationDef),
    Entity(EntityDef),
    Enum(EnumDef),
    Relationship(RelationshipDef),
    Struct(StructDef),
    TermTemplate(TermTemplateDef),
    Other(BaseTypeDef),
}

impl TypeDef {
    #[must_use]
    pub fn base(&self) -> &BaseTypeDef {
        match self {
            Self::Classification(def) => &def.base,
            Self::Entity(def) => &def.base,
            Self::Enum(def) => &def.base,
            Self::Relationship(def) => &def.base,
            Self::Struct(def) => &def.base,
            Self::TermTemplate(def) => &def.base,
            Self::Other(base) => base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseTypeDef {
        match self {
            Self::Classification(def) => &mut def.base,
            Self::Entity(def) => &mut def.base,
            Self::Enum(def) => &mut def.base,
            Self::Relationship(def) => &mut def.base,
            Self::Struct(def) => &mut def.base,
            Self::TermTemplate(def) => &mut def.base,
            Self::Other(base) => base,
        }
    }

    /// Category implied by the variant. For [`TypeDef::Other`] this is the
    /// category recorded in the payload, if any.
    #[must_use]
    pub fn category(&self) -> Option<TypeCategory> {
        match self {
            Self::Classification(_) => Some(TypeCategory::Classification),
            Self::Entity(_) => Some(TypeCategory::Entity),
            Self::Enum(_) => Some(TypeCategory::Enum),
            Self::Relationship(_) => Some(TypeCategory::Relationship),
            Self::Struct(_) => Some(TypeCategory::Struct),
            Self::TermTemplate(_) => Some(TypeCategory::TermTemplate),
            Self::Other(base) => base.category,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.base().name
    }

    #[must_use]
    pub fn guid(&self) -> Option<&str> {
        self.base().guid.as_deref()
    }

    /// Names of the super types, for the kinds that support inheritance.
    #[must_use]
    pub fn super_types(&self) -> &[String] {
        match self {
            Self::Classification(def) => &def.super_types,
            Self::Entity(def) => &def.super_types,
            _ => &[],
        }
    }

    /// Header summarizing this definition.
    #[must_use]
    pub fn header(&self) -> TypeDefHeader {
        TypeDefHeader {
            category: self.category(),
            guid: self.guid().map(ToOwned::to_owned),
            name: Some(self.name().to_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for TypeDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let category = match value.get("category") {
            Some(raw) => Some(TypeCategory::deserialize(raw).map_err(D::Error::custom)?),
            None => None,
        };

        let def = match category {
            Some(TypeCategory::Classification) => {
                serde_json::from_value(value).map(Self::Classification)
            }
            Some(TypeCategory::Entity) => serde_json::from_value(value).map(Self::Entity),
            Some(TypeCategory::Enum) => serde_json::from_value(value).map(Self::Enum),
            Some(TypeCategory::Relationship) => {
                serde_json::from_value(value).map(Self::Relationship)
            }
            Some(TypeCategory::Struct) => serde_json::from_value(value).map(Self::Struct),
            Some(TypeCategory::TermTemplate) => {
                serde_json::from_value(value).map(Self::TermTemplate)
            }
            Some(
                TypeCategory::Primitive
                | TypeCategory::ObjectIdType
                | TypeCategory::Array
                | TypeCategory::Map,
            )
            | None => serde_json::from_value(value).map(Self::Other),
        };
        def.map_err(D::Error::custom)
    }
}

macro_rules! impl_from_kind {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for TypeDef {
            fn from(def: $ty) -> Self {
                Self::$variant(def)
            }
        }

        /// Fails with the original definition when it is of another kind.
        impl TryFrom<TypeDef> for $ty {
            type Error = TypeDef;

            fn try_from(def: TypeDef) -> Result<Self, Self::Error> {
                match def {
                    TypeDef::$variant(def) => Ok(def),
                    other => Err(other),
                }
            }
        }
    };
}

impl_from_kind!(Classification, ClassificationDef);
impl_from_kind!(Entity, EntityDef);
impl_from_kind!(Enum, EnumDef);
impl_from_kind!(Relationship, RelationshipDef);
impl_from_kind!(Struct, StructDef);
impl_from_kind!(TermTemplate, TermTemplateDef);

/// Bulk container used by the create/update/delete/list operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinitions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classification_defs: Vec<ClassificationDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_defs: Vec<EntityDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_defs: Vec<EnumDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship_defs: Vec<RelationshipDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub struct_defs: Vec<StructDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub term_template_defs: Vec<TermTemplateDef>,
}

impl TypeDefinitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of definitions across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classification_defs.len()
            + self.entity_defs.len()
            + self.enum_defs.len()
            + self.relationship_defs.len()
            + self.struct_defs.len()
            + self.term_template_defs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a definition to the sequence matching its kind.
    ///
    /// [`TypeDef::Other`] has no sequence of its own and is dropped.
    pub fn push(&mut self, def: impl Into<TypeDef>) {
        match def.into() {
            TypeDef::Classification(def) => self.classification_defs.push(def),
            TypeDef::Entity(def) => self.entity_defs.push(def),
            TypeDef::Enum(def) => self.enum_defs.push(def),
            TypeDef::Relationship(def) => self.relationship_defs.push(def),
            TypeDef::Struct(def) => self.struct_defs.push(def),
            TypeDef::TermTemplate(def) => self.term_template_defs.push(def),
            TypeDef::Other(_) => {}
        }
    }

    /// Adds a definition, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, def: impl Into<TypeDef>) -> Self {
        self.push(def);
        self
    }

    /// Flattens the container into a single sequence, kind by kind, keeping
    /// the order within each kind.
    #[must_use]
    pub fn into_type_defs(self) -> Vec<TypeDef> {
        let mut defs = Vec::with_capacity(self.len());
        defs.extend(self.enum_defs.into_iter().map(TypeDef::Enum));
        defs.extend(self.struct_defs.into_iter().map(TypeDef::Struct));
        defs.extend(
            self.classification_defs
                .into_iter()
                .map(TypeDef::Classification),
        );
        defs.extend(self.entity_defs.into_iter().map(TypeDef::Entity));
        defs.extend(self.relationship_defs.into_iter().map(TypeDef::Relationship));
        defs.extend(
            self.term_template_defs
                .into_iter()
                .map(TypeDef::TermTemplate),
        );
        defs
    }
}

impl FromIterator<TypeDef> for TypeDefinitions {
    fn from_iter<I: IntoIterator<Item = TypeDef>>(iter: I) -> Self {
        let mut defs = Self::default();
        for def in iter {
            defs.push(def);
        }
        defs
    }
}

/// Minimal listing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TypeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Filters accepted by the bulk listing and header listing operations.
///
/// All fields are optional. When a field is `None` the corresponding query
/// parameter is not sent at all.
///
/// # Example
///
/// ```
/// use atlas_types_sdk::TypeDefFilter;
///
/// // Everything the service lists by default
/// let filter = TypeDefFilter::default();
/// assert!(filter.is_empty());
///
/// // Only enum definitions
/// let filter = TypeDefFilter::new().with_type("enum");
///
/// // Include term templates
/// let filter = TypeDefFilter::new().with_include_term_template(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefFilter {
    /// Whether term templates are part of the listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_term_template: Option<bool>,

    /// Restricts the listing to one category, e.g. `enum` or `entity`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl TypeDefFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_include_term_template(mut self, include: bool) -> Self {
        self.include_term_template = Some(include);
        self
    }

    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Returns `true` if no filters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include_term_template.is_none() && self.type_name.is_none()
    }
}
