//! REST handlers for the types registry.

use std::sync::Arc;

use atlas_types_sdk::{
    ClassificationDef, EntityDef, EnumDef, RelationshipDef, StructDef, TermTemplateDef,
    TypeCategory, TypeDef, TypeDefHeader, TypeDefKind, TypeDefinitions,
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;

use super::dto::{ListTypeDefsQuery, TermTemplateQuery};
use super::error::{ApiError, ApiResult};
use crate::domain::service::TypeRegistryService;

type Service = Extension<Arc<TypeRegistryService>>;

fn narrow<K>(def: TypeDef) -> ApiResult<Json<K>>
where
    K: TypeDefKind + TryFrom<TypeDef, Error = TypeDef>,
{
    K::try_from(def).map(Json).map_err(|other| {
        ApiError::Internal(format!(
            "type {} is stored as {}, expected {}",
            other.name(),
            other.category().map_or("UNKNOWN", TypeCategory::as_str),
            K::CATEGORY
        ))
    })
}

fn kind_by_guid<K>(service: &TypeRegistryService, guid: &str) -> ApiResult<Json<K>>
where
    K: TypeDefKind + TryFrom<TypeDef, Error = TypeDef>,
{
    narrow(service.get_by_guid(Some(K::CATEGORY), guid)?)
}

fn kind_by_name<K>(service: &TypeRegistryService, name: &str) -> ApiResult<Json<K>>
where
    K: TypeDefKind + TryFrom<TypeDef, Error = TypeDef>,
{
    narrow(service.get_by_name(Some(K::CATEGORY), name)?)
}

/// GET /atlas/v2/types/classificationdef/guid/{guid}
pub async fn get_classification_def_by_guid(
    Extension(service): Service,
    Path(guid): Path<String>,
) -> ApiResult<Json<ClassificationDef>> {
    kind_by_guid(&service, &guid)
}

/// GET /atlas/v2/types/classificationdef/name/{name}
pub async fn get_classification_def_by_name(
    Extension(service): Service,
    Path(name): Path<String>,
) -> ApiResult<Json<ClassificationDef>> {
    kind_by_name(&service, &name)
}

/// GET /atlas/v2/types/entitydef/guid/{guid}
pub async fn get_entity_def_by_guid(
    Extension(service): Service,
    Path(guid): Path<String>,
) -> ApiResult<Json<EntityDef>> {
    kind_by_guid(&service, &guid)
}

/// GET /atlas/v2/types/entitydef/name/{name}
pub async fn get_entity_def_by_name(
    Extension(service): Service,
    Path(name): Path<String>,
) -> ApiResult<Json<EntityDef>> {
    kind_by_name(&service, &name)
}

/// GET /atlas/v2/types/enumdef/guid/{guid}
pub async fn get_enum_def_by_guid(
    Extension(service): Service,
    Path(guid): Path<String>,
) -> ApiResult<Json<EnumDef>> {
    kind_by_guid(&service, &guid)
}

/// GET /atlas/v2/types/enumdef/name/{name}
pub async fn get_enum_def_by_name(
    Extension(service): Service,
    Path(name): Path<String>,
) -> ApiResult<Json<EnumDef>> {
    kind_by_name(&service, &name)
}

/// GET /atlas/v2/types/relationshipdef/guid/{guid}
pub async fn get_relationship_def_by_guid(
    Extension(service): Service,
    Path(guid): Path<String>,
) -> ApiResult<Json<RelationshipDef>> {
    kind_by_guid(&service, &guid)
}

/// GET /atlas/v2/types/relationshipdef/name/{name}
pub async fn get_relationship_def_by_name(
    Extension(service): Service,
    Path(name): Path<String>,
) -> ApiResult<Json<RelationshipDef>> {
    kind_by_name(&service, &name)
}

/// GET /atlas/v2/types/structdef/guid/{guid}
pub async fn get_struct_def_by_guid(
    Extension(service): Service,
    Path(guid): Path<String>,
) -> ApiResult<Json<StructDef>> {
    kind_by_guid(&service, &guid)
}

/// GET /atlas/v2/types/structdef/name/{name}
pub async fn get_struct_def_by_name(
    Extension(service): Service,
    Path(name): Path<String>,
) -> ApiResult<Json<StructDef>> {
    kind_by_name(&service, &name)
}

/// GET /atlas/v2/types/typedef/guid/{guid}
pub async fn get_type_def_by_guid(
    Extension(service): Service,
    Path(guid): Path<String>,
) -> ApiResult<Json<TypeDef>> {
    Ok(Json(service.get_by_guid(None, &guid)?))
}

/// GET /atlas/v2/types/typedef/name/{name}
pub async fn get_type_def_by_name(
    Extension(service): Service,
    Path(name): Path<String>,
) -> ApiResult<Json<TypeDef>> {
    Ok(Json(service.get_by_name(None, &name)?))
}

/// DELETE /atlas/v2/types/typedef/name/{name}
pub async fn delete_type_by_name(
    Extension(service): Service,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    service.delete_by_name(&name)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /atlas/v2/types/typedefs
pub async fn get_all_type_defs(
    Extension(service): Service,
    query: Result<Query<ListTypeDefsQuery>, QueryRejection>,
) -> ApiResult<Json<TypeDefinitions>> {
    let Query(query) = query?;
    Ok(Json(service.list(&query.to_filter())))
}

/// POST /atlas/v2/types/typedefs
///
/// Responds with the definitions actually created; names already taken are
/// left out.
pub async fn create_type_defs(
    Extension(service): Service,
    payload: Result<Json<TypeDefinitions>, JsonRejection>,
) -> ApiResult<Json<TypeDefinitions>> {
    let Json(defs) = payload?;
    Ok(Json(service.create(defs)?))
}

/// PUT /atlas/v2/types/typedefs
pub async fn update_type_defs(
    Extension(service): Service,
    payload: Result<Json<TypeDefinitions>, JsonRejection>,
) -> ApiResult<Json<TypeDefinitions>> {
    let Json(defs) = payload?;
    Ok(Json(service.update(defs)?))
}

/// DELETE /atlas/v2/types/typedefs
pub async fn delete_type_defs(
    Extension(service): Service,
    payload: Result<Json<TypeDefinitions>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(defs) = payload?;
    service.delete(defs)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /atlas/v2/types/typedefs/headers
pub async fn list_type_def_headers(
    Extension(service): Service,
    query: Result<Query<ListTypeDefsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TypeDefHeader>>> {
    let Query(query) = query?;
    Ok(Json(service.headers(&query.to_filter())))
}

/// GET /types/termtemplatedef/guid/{guid}?api-version=...
pub async fn get_term_template_def_by_guid(
    Extension(service): Service,
    Path(guid): Path<String>,
    query: Result<Query<TermTemplateQuery>, QueryRejection>,
) -> ApiResult<Json<TermTemplateDef>> {
    let Query(query) = query?;
    if !query.has_api_version() {
        return Err(ApiError::MissingApiVersion);
    }
    kind_by_guid(&service, &guid)
}

/// GET /types/termtemplatedef/name/{name}?api-version=...
pub async fn get_term_template_def_by_name(
    Extension(service): Service,
    Path(name): Path<String>,
    query: Result<Query<TermTemplateQuery>, QueryRejection>,
) -> ApiResult<Json<TermTemplateDef>> {
    let Query(query) = query?;
    if !query.has_api_version() {
        return Err(ApiError::MissingApiVersion);
    }
    kind_by_name(&service, &name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::config::TypeRegistryConfig;
    use crate::domain::error::DomainError;
    use crate::infra::InMemoryTypeDefRepository;
    use atlas_types_sdk::EnumElementDef;

    fn create_service() -> Arc<TypeRegistryService> {
        let repo = Arc::new(InMemoryTypeDefRepository::new());
        Arc::new(TypeRegistryService::new(repo, TypeRegistryConfig::default()))
    }

    fn color() -> EnumDef {
        let mut def = EnumDef::new("color");
        def.element_defs = vec![EnumElementDef::new("RED", 0)];
        def
    }

    #[tokio::test]
    async fn test_create_then_get_enum_handler() {
        let service = create_service();

        let Json(created) = create_type_defs(
            Extension(service.clone()),
            Ok(Json(TypeDefinitions::new().with(color()))),
        )
        .await
        .unwrap();
        assert_eq!(created.enum_defs.len(), 1);

        let Json(def) = get_enum_def_by_name(Extension(service), Path("color".to_owned()))
            .await
            .unwrap();
        assert_eq!(def.base.created_by.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_kind_mismatch_is_not_found() {
        let service = create_service();
        service
            .create(TypeDefinitions::new().with(color()))
            .unwrap();

        let err = get_struct_def_by_name(Extension(service), Path("color".to_owned()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Domain(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_no_content() {
        let service = create_service();
        service
            .create(TypeDefinitions::new().with(color()))
            .unwrap();

        let status = delete_type_by_name(Extension(service.clone()), Path("color".to_owned()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(service.get_by_name(None, "color").is_err());
    }

    #[tokio::test]
    async fn test_term_template_requires_api_version() {
        let service = create_service();
        service
            .create(TypeDefinitions::new().with(TermTemplateDef::new("glossary")))
            .unwrap();

        let err = get_term_template_def_by_name(
            Extension(service.clone()),
            Path("glossary".to_owned()),
            Ok(Query(TermTemplateQuery::default())),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::MissingApiVersion));

        let Json(def) = get_term_template_def_by_name(
            Extension(service),
            Path("glossary".to_owned()),
            Ok(Query(TermTemplateQuery {
                api_version: Some("2021-05-01-preview".to_owned()),
            })),
        )
        .await
        .unwrap();
        assert_eq!(def.name(), "glossary");
    }
}
