//! Request encoding: operation + arguments to method, path, query, headers, body.
//!
//! Encoding is pure: nothing here touches the network, so argument errors are
//! reported before any connection is opened.

use atlas_types_sdk::{AtlasTypesError, TypeDefFilter, TypeDefinitions};
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

/// Root of the typed definition routes.
pub const TYPES_PATH: &str = "/atlas/v2/types";
/// Bulk listing, create, update and delete.
pub const TYPEDEFS_PATH: &str = "/atlas/v2/types/typedefs";
/// Header listing.
pub const TYPEDEF_HEADERS_PATH: &str = "/atlas/v2/types/typedefs/headers";
/// Term-template routes live outside the `/atlas/v2` tree.
pub const TERM_TEMPLATE_PATH: &str = "/types/termtemplatedef";

pub const API_VERSION_PARAM: &str = "api-version";
pub const INCLUDE_TERM_TEMPLATE_PARAM: &str = "includeTermTemplate";
pub const TYPE_PARAM: &str = "type";

const APPLICATION_JSON: &str = "application/json";

/// One logical call against the types catalog, borrowing its arguments.
#[derive(Debug, Clone, Copy)]
pub enum TypesOperation<'a> {
    GetClassificationDefByGuid { guid: &'a str },
    GetClassificationDefByName { name: &'a str },
    GetEntityDefByGuid { guid: &'a str },
    GetEntityDefByName { name: &'a str },
    GetEnumDefByGuid { guid: &'a str },
    GetEnumDefByName { name: &'a str },
    GetRelationshipDefByGuid { guid: &'a str },
    GetRelationshipDefByName { name: &'a str },
    GetStructDefByGuid { guid: &'a str },
    GetStructDefByName { name: &'a str },
    GetTypeDefByGuid { guid: &'a str },
    GetTypeDefByName { name: &'a str },
    DeleteTypeByName { name: &'a str },
    GetAllTypeDefs { filter: &'a TypeDefFilter },
    CreateTypeDefs { defs: &'a TypeDefinitions },
    UpdateTypeDefs { defs: &'a TypeDefinitions },
    DeleteTypeDefs { defs: &'a TypeDefinitions },
    ListTypeDefHeaders { filter: &'a TypeDefFilter },
    GetTermTemplateDefByGuid { guid: &'a str },
    GetTermTemplateDefByName { name: &'a str },
}

impl TypesOperation<'_> {
    /// Stable operation name used in logs and spans.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetClassificationDefByGuid { .. } => "get_classification_def_by_guid",
            Self::GetClassificationDefByName { .. } => "get_classification_def_by_name",
            Self::GetEntityDefByGuid { .. } => "get_entity_def_by_guid",
            Self::GetEntityDefByName { .. } => "get_entity_def_by_name",
            Self::GetEnumDefByGuid { .. } => "get_enum_def_by_guid",
            Self::GetEnumDefByName { .. } => "get_enum_def_by_name",
            Self::GetRelationshipDefByGuid { .. } => "get_relationship_def_by_guid",
            Self::GetRelationshipDefByName { .. } => "get_relationship_def_by_name",
            Self::GetStructDefByGuid { .. } => "get_struct_def_by_guid",
            Self::GetStructDefByName { .. } => "get_struct_def_by_name",
            Self::GetTypeDefByGuid { .. } => "get_type_def_by_guid",
            Self::GetTypeDefByName { .. } => "get_type_def_by_name",
            Self::DeleteTypeByName { .. } => "delete_type_by_name",
            Self::GetAllTypeDefs { .. } => "get_all_type_defs",
            Self::CreateTypeDefs { .. } => "create_type_defs",
            Self::UpdateTypeDefs { .. } => "update_type_defs",
            Self::DeleteTypeDefs { .. } => "delete_type_defs",
            Self::ListTypeDefHeaders { .. } => "list_type_def_headers",
            Self::GetTermTemplateDefByGuid { .. } => "get_term_template_def_by_guid",
            Self::GetTermTemplateDefByName { .. } => "get_term_template_def_by_name",
        }
    }

    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::DeleteTypeByName { .. } | Self::DeleteTypeDefs { .. } => Method::DELETE,
            Self::CreateTypeDefs { .. } => Method::POST,
            Self::UpdateTypeDefs { .. } => Method::PUT,
            _ => Method::GET,
        }
    }

    /// Returns `true` for operations whose success response has no value.
    #[must_use]
    pub const fn expects_empty_response(&self) -> bool {
        matches!(
            self,
            Self::DeleteTypeByName { .. } | Self::DeleteTypeDefs { .. }
        )
    }

    /// Encodes the operation into a transport-neutral request.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - empty or dot-segment guid/name, or an empty
    ///   `api_version` for a term-template operation
    /// * `Internal` - the bulk body could not be serialized
    pub fn encode(&self, api_version: &str) -> Result<TypesRequest, AtlasTypesError> {
        let path = self.path()?;

        let mut query = Vec::new();
        match self {
            Self::GetAllTypeDefs { filter } | Self::ListTypeDefHeaders { filter } => {
                push_filter(&mut query, filter);
            }
            Self::GetTermTemplateDefByGuid { .. } | Self::GetTermTemplateDefByName { .. } => {
                if api_version.is_empty() {
                    return Err(AtlasTypesError::invalid_argument(
                        "api_version",
                        "required for term-template operations",
                    ));
                }
                query.push((API_VERSION_PARAM.to_owned(), api_version.to_owned()));
            }
            _ => {}
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

        let body = match self {
            Self::CreateTypeDefs { defs }
            | Self::UpdateTypeDefs { defs }
            | Self::DeleteTypeDefs { defs } => {
                let bytes = serde_json::to_vec(defs).map_err(|e| {
                    AtlasTypesError::internal(format!("failed to encode request body: {e}"))
                })?;
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
                Some(Bytes::from(bytes))
            }
            _ => None,
        };

        Ok(TypesRequest {
            operation: self.name(),
            method: self.method(),
            path,
            query,
            headers,
            body,
        })
    }

    fn path(&self) -> Result<String, AtlasTypesError> {
        match *self {
            Self::GetClassificationDefByGuid { guid } => by_guid("classificationdef", guid),
            Self::GetClassificationDefByName { name } => by_name("classificationdef", name),
            Self::GetEntityDefByGuid { guid } => by_guid("entitydef", guid),
            Self::GetEntityDefByName { name } => by_name("entitydef", name),
            Self::GetEnumDefByGuid { guid } => by_guid("enumdef", guid),
            Self::GetEnumDefByName { name } => by_name("enumdef", name),
            Self::GetRelationshipDefByGuid { guid } => by_guid("relationshipdef", guid),
            Self::GetRelationshipDefByName { name } => by_name("relationshipdef", name),
            Self::GetStructDefByGuid { guid } => by_guid("structdef", guid),
            Self::GetStructDefByName { name } => by_name("structdef", name),
            Self::GetTypeDefByGuid { guid } => by_guid("typedef", guid),
            Self::GetTypeDefByName { name } | Self::DeleteTypeByName { name } => {
                by_name("typedef", name)
            }
            Self::GetAllTypeDefs { .. }
            | Self::CreateTypeDefs { .. }
            | Self::UpdateTypeDefs { .. }
            | Self::DeleteTypeDefs { .. } => Ok(TYPEDEFS_PATH.to_owned()),
            Self::ListTypeDefHeaders { .. } => Ok(TYPEDEF_HEADERS_PATH.to_owned()),
            Self::GetTermTemplateDefByGuid { guid } => {
                let guid = segment("guid", guid)?;
                Ok(format!("{TERM_TEMPLATE_PATH}/guid/{guid}"))
            }
            Self::GetTermTemplateDefByName { name } => {
                let name = segment("name", name)?;
                Ok(format!("{TERM_TEMPLATE_PATH}/name/{name}"))
            }
        }
    }
}

fn by_guid(kind: &str, guid: &str) -> Result<String, AtlasTypesError> {
    let guid = segment("guid", guid)?;
    Ok(format!("{TYPES_PATH}/{kind}/guid/{guid}"))
}

fn by_name(kind: &str, name: &str) -> Result<String, AtlasTypesError> {
    let name = segment("name", name)?;
    Ok(format!("{TYPES_PATH}/{kind}/name/{name}"))
}

/// Percent-encodes a single path segment; `/` becomes `%2F`.
///
/// `.` and `..` are rejected: URL parsers resolve them as dot segments even
/// when percent-encoded, which would retarget the request.
fn segment(argument: &'static str, value: &str) -> Result<String, AtlasTypesError> {
    if value.is_empty() {
        return Err(AtlasTypesError::invalid_argument(
            argument,
            "must not be empty",
        ));
    }
    if value == "." || value == ".." {
        return Err(AtlasTypesError::invalid_argument(
            argument,
            "must not be a dot segment",
        ));
    }
    Ok(urlencoding::encode(value).into_owned())
}

fn push_filter(query: &mut Vec<(String, String)>, filter: &TypeDefFilter) {
    if let Some(include) = filter.include_term_template {
        query.push((INCLUDE_TERM_TEMPLATE_PARAM.to_owned(), include.to_string()));
    }
    if let Some(type_name) = &filter.type_name {
        query.push((TYPE_PARAM.to_owned(), type_name.clone()));
    }
}

/// A fully encoded request, independent of the transport that sends it.
#[derive(Debug, Clone)]
pub struct TypesRequest {
    /// Operation name, for logging.
    pub operation: &'static str,
    pub method: Method,
    /// Percent-encoded path, relative to the endpoint.
    pub path: String,
    /// Query pairs in send order, not yet encoded.
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl TypesRequest {
    /// Resolves the request against `endpoint`.
    ///
    /// A base path on the endpoint is kept: `https://host/catalog` plus
    /// `/atlas/v2/types/typedefs` yields `https://host/catalog/atlas/v2/types/typedefs`.
    #[must_use]
    pub fn url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        let base = endpoint.path().trim_end_matches('/');
        url.set_path(&format!("{base}{}", self.path));
        url.set_query(None);
        url.set_fragment(None);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        url
    }

    /// Path plus encoded query, as it appears on the request line.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{query}", self.path)
    }

    /// Value of the first query parameter named `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Per-call additions layered on top of an encoded request.
///
/// ```ignore
/// let options = RequestOptions::new()
///     .with_header("x-correlation-id", "c-42")?
///     .with_api_version("2022-03-01-preview");
/// client.get_term_template_def_by_name_with_response("glossary", &options).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    /// Appended after the operation's own query pairs.
    pub query: Vec<(String, String)>,
    /// Replaces the client's default `api-version` for this call.
    pub api_version: Option<String>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the name or value is not a valid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, AtlasTypesError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AtlasTypesError::invalid_argument("header", e.to_string()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AtlasTypesError::invalid_argument("header", e.to_string()))?;
        self.headers.append(name, value);
        Ok(self)
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Merges these options into `request`. Option headers override the
    /// operation's headers of the same name.
    pub fn apply(&self, request: &mut TypesRequest) {
        for (name, value) in &self.headers {
            request.headers.insert(name.clone(), value.clone());
        }
        request.query.extend(self.query.iter().cloned());
    }
}
