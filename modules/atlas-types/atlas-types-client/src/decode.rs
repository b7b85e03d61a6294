//! Response decoding: status classification and JSON body parsing.

use atlas_types_sdk::{AtlasTypesError, ServiceError};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Maximum number of body bytes kept in a [`ServiceError`].
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// What a transport hands back: status, headers, and the fully read body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// A decoded value together with the response status and headers.
#[derive(Debug, Clone)]
pub struct TypesResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub value: T,
}

impl<T> TypesResponse<T> {
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transforms the value, keeping status and headers.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TypesResponse<U> {
        TypesResponse {
            status: self.status,
            headers: self.headers,
            value: f(self.value),
        }
    }
}

/// Decodes a response that must carry a JSON value.
///
/// # Errors
///
/// * service errors for non-2xx statuses (see [`AtlasTypesError::from_service`])
/// * `EmptyBody` for a 2xx without a body
/// * `Decode` when the body does not match `T`
pub fn decode_json<T: DeserializeOwned>(
    raw: RawResponse,
) -> Result<TypesResponse<T>, AtlasTypesError> {
    let raw = check_status(raw)?;
    if raw.body.iter().all(u8::is_ascii_whitespace) {
        return Err(AtlasTypesError::EmptyBody);
    }
    let value = serde_json::from_slice(&raw.body)?;
    Ok(TypesResponse {
        status: raw.status,
        headers: raw.headers,
        value,
    })
}

/// Decodes a response whose success carries no value. The body is never parsed.
///
/// # Errors
///
/// Service errors for non-2xx statuses.
pub fn decode_empty(raw: RawResponse) -> Result<TypesResponse<()>, AtlasTypesError> {
    let raw = check_status(raw)?;
    Ok(TypesResponse {
        status: raw.status,
        headers: raw.headers,
        value: (),
    })
}

fn check_status(raw: RawResponse) -> Result<RawResponse, AtlasTypesError> {
    if raw.status.is_success() {
        Ok(raw)
    } else {
        Err(AtlasTypesError::from_service(service_error(
            raw.status, &raw.body,
        )))
    }
}

/// Atlas error document: `{"errorCode": "...", "errorMessage": "..."}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtlasErrorBody {
    error_code: Option<String>,
    error_message: Option<String>,
}

/// Gateway-style error document: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Deserialize)]
struct WrappedErrorBody {
    error: WrappedError,
}

#[derive(Deserialize)]
struct WrappedError {
    code: Option<String>,
    message: Option<String>,
}

/// Builds a [`ServiceError`] from a non-2xx response body.
///
/// Recognises both Atlas and gateway error documents; anything else is kept
/// as a truncated text preview.
#[must_use]
pub fn service_error(status: StatusCode, body: &[u8]) -> ServiceError {
    let preview_len = body.len().min(ERROR_BODY_PREVIEW_LIMIT);
    let preview = String::from_utf8_lossy(&body[..preview_len]).into_owned();

    let atlas = serde_json::from_slice::<AtlasErrorBody>(body)
        .ok()
        .filter(|e| e.error_code.is_some() || e.error_message.is_some())
        .map(|e| (e.error_code, e.error_message));
    let (error_code, message) = atlas
        .or_else(|| {
            serde_json::from_slice::<WrappedErrorBody>(body)
                .ok()
                .map(|e| (e.error.code, e.error.message))
        })
        .unwrap_or_default();

    let message = message.unwrap_or_else(|| {
        if preview.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned()
        } else {
            preview.clone()
        }
    });

    ServiceError {
        status: status.as_u16(),
        error_code,
        message,
        body: preview,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use atlas_types_sdk::{ClassificationDef, TypeCategory, TypeDef};
    use serde_json::json;

    fn json_response(status: StatusCode, value: &serde_json::Value) -> RawResponse {
        RawResponse::new(status, serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn test_classification_body_decodes_all_fields() {
        let body = json!({
            "category": "CLASSIFICATION",
            "guid": "2c3a-11",
            "name": "PII",
            "description": "Personally identifiable",
            "createTime": 1_700_000_000_000_i64,
            "updateTime": 1_700_000_100_000_i64,
            "createdBy": "admin",
            "updatedBy": "steward",
            "version": 3,
            "typeVersion": "1.1",
            "serviceType": "atlas_core",
            "lastModifiedTS": "2",
            "options": { "displayName": "PII" },
            "attributeDefs": [{
                "name": "level",
                "typeName": "int",
                "cardinality": "SINGLE",
                "isOptional": true,
                "isUnique": false,
                "isIndexable": true,
                "includeInNotification": false,
                "valuesMinCount": 0,
                "valuesMaxCount": 1,
                "constraints": [{
                    "type": "ownedRef",
                    "params": {
                        "attribute": "owner",
                        "nested": { "depth": [1, 2, { "leaf": null }] }
                    }
                }]
            }],
            "entityTypes": ["hive_table", "hive_column"],
            "subTypes": ["PII_Strict"]
        });

        let resp: TypesResponse<ClassificationDef> =
            decode_json(json_response(StatusCode::OK, &body)).unwrap();
        let def = resp.value;

        assert_eq!(def.base.category, Some(TypeCategory::Classification));
        assert_eq!(def.base.guid.as_deref(), Some("2c3a-11"));
        assert_eq!(def.base.version, Some(3));
        assert_eq!(def.base.last_modified_ts.as_deref(), Some("2"));
        assert_eq!(def.entity_types, vec!["hive_table", "hive_column"]);
        assert_eq!(def.sub_types, vec!["PII_Strict"]);

        let params = def.attribute_defs[0].constraints[0].params.as_ref().unwrap();
        assert_eq!(params["nested"], json!({ "depth": [1, 2, { "leaf": null }] }));

        // Nothing documented is lost on the way back out.
        assert_eq!(serde_json::to_value(&def).unwrap(), body);
    }

    #[test]
    fn test_polymorphic_body_dispatches_on_category() {
        let body = json!({ "category": "ENUM", "name": "color", "elementDefs": [] });
        let resp: TypesResponse<TypeDef> =
            decode_json(json_response(StatusCode::OK, &body)).unwrap();
        assert_eq!(resp.value.category(), Some(TypeCategory::Enum));
        assert!(matches!(resp.value, TypeDef::Enum(_)));
    }

    #[test]
    fn test_not_found_parses_atlas_error_body() {
        let body = json!({
            "errorCode": "ATLAS-404-00-007",
            "errorMessage": "Given typename hive_tbl was invalid"
        });
        let err = decode_json::<ClassificationDef>(json_response(StatusCode::NOT_FOUND, &body))
            .unwrap_err();

        assert!(err.is_not_found());
        let detail = err.service_error().unwrap();
        assert_eq!(detail.status, 404);
        assert_eq!(detail.error_code.as_deref(), Some("ATLAS-404-00-007"));
        assert_eq!(detail.message, "Given typename hive_tbl was invalid");
        assert!(detail.body.contains("ATLAS-404-00-007"));
    }

    #[test]
    fn test_wrapped_error_body_is_recognised() {
        let body = json!({ "error": { "code": "Conflict", "message": "already exists" } });
        let err = decode_empty(json_response(StatusCode::CONFLICT, &body)).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(err.service_error().unwrap().message, "already exists");
    }

    #[test]
    fn test_plain_text_error_kept_as_message() {
        let err = decode_json::<TypeDef>(RawResponse::new(
            StatusCode::BAD_GATEWAY,
            "upstream unavailable",
        ))
        .unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.service_error().unwrap().message, "upstream unavailable");
    }

    #[test]
    fn test_empty_error_body_uses_reason_phrase() {
        let err = decode_empty(RawResponse::new(StatusCode::INTERNAL_SERVER_ERROR, ""))
            .unwrap_err();
        assert_eq!(
            err.service_error().unwrap().message,
            "Internal Server Error"
        );
    }

    #[test]
    fn test_error_preview_is_truncated() {
        let big = "x".repeat(ERROR_BODY_PREVIEW_LIMIT * 2);
        let detail = service_error(StatusCode::BAD_REQUEST, big.as_bytes());
        assert_eq!(detail.body.len(), ERROR_BODY_PREVIEW_LIMIT);
    }

    #[test]
    fn test_empty_success_body_is_not_a_value() {
        let err = decode_json::<TypeDef>(RawResponse::new(StatusCode::OK, "")).unwrap_err();
        assert!(matches!(err, AtlasTypesError::EmptyBody));
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let err =
            decode_json::<ClassificationDef>(RawResponse::new(StatusCode::OK, "{not json"))
                .unwrap_err();
        assert!(matches!(err, AtlasTypesError::Decode(_)));
    }

    #[test]
    fn test_delete_success_ignores_body() {
        let resp = decode_empty(RawResponse::new(StatusCode::NO_CONTENT, "")).unwrap();
        assert_eq!(resp.status, StatusCode::NO_CONTENT);

        // Whatever a 200 carries is not interpreted.
        let resp = decode_empty(RawResponse::new(StatusCode::OK, "<html>ok</html>")).unwrap();
        assert_eq!(resp.status, StatusCode::OK);
    }
}
