//! REST route registration for the types registry.

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::domain::service::TypeRegistryService;

/// Builds the router serving every types route over `service`.
///
/// Paths are absolute, so the router is meant to be mounted at the root of
/// the catalog endpoint.
#[must_use]
pub fn router(service: Arc<TypeRegistryService>) -> Router {
    Router::new()
        .route(
            "/atlas/v2/types/classificationdef/guid/{guid}",
            get(handlers::get_classification_def_by_guid),
        )
        .route(
            "/atlas/v2/types/classificationdef/name/{name}",
            get(handlers::get_classification_def_by_name),
        )
        .route(
            "/atlas/v2/types/entitydef/guid/{guid}",
            get(handlers::get_entity_def_by_guid),
        )
        .route(
            "/atlas/v2/types/entitydef/name/{name}",
            get(handlers::get_entity_def_by_name),
        )
        .route(
            "/atlas/v2/types/enumdef/guid/{guid}",
            get(handlers::get_enum_def_by_guid),
        )
        .route(
            "/atlas/v2/types/enumdef/name/{name}",
            get(handlers::get_enum_def_by_name),
        )
        .route(
            "/atlas/v2/types/relationshipdef/guid/{guid}",
            get(handlers::get_relationship_def_by_guid),
        )
        .route(
            "/atlas/v2/types/relationshipdef/name/{name}",
            get(handlers::get_relationship_def_by_name),
        )
        .route(
            "/atlas/v2/types/structdef/guid/{guid}",
            get(handlers::get_struct_def_by_guid),
        )
        .route(
            "/atlas/v2/types/structdef/name/{name}",
            get(handlers::get_struct_def_by_name),
        )
        .route(
            "/atlas/v2/types/typedef/guid/{guid}",
            get(handlers::get_type_def_by_guid),
        )
        .route(
            "/atlas/v2/types/typedef/name/{name}",
            get(handlers::get_type_def_by_name).delete(handlers::delete_type_by_name),
        )
        .route(
            "/atlas/v2/types/typedefs",
            get(handlers::get_all_type_defs)
                .post(handlers::create_type_defs)
                .put(handlers::update_type_defs)
                .delete(handlers::delete_type_defs),
        )
        .route(
            "/atlas/v2/types/typedefs/headers",
            get(handlers::list_type_def_headers),
        )
        .route(
            "/types/termtemplatedef/guid/{guid}",
            get(handlers::get_term_template_def_by_guid),
        )
        .route(
            "/types/termtemplatedef/name/{name}",
            get(handlers::get_term_template_def_by_name),
        )
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
}
