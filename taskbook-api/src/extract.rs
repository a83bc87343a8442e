/// Request extractors and field validation
///
/// Wraps axum's `Json` and `Path` extractors so that their rejections come
/// back in the API's error format (400 with `{error, code}`) instead of
/// axum's plain-text defaults, and provides the helpers handlers use to turn
/// loosely-typed JSON fields into checked values.
///
/// Request bodies are taken as a [`JsonObject`] and read field by field, so
/// that a missing field, a `null`, an empty string and a wrong type can each
/// be reported precisely.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};
use serde_json::Value;

/// JSON body extractor with API-formatted rejections
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Path parameter extractor with API-formatted rejections
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// A request body that must be a JSON object
pub type JsonObject = serde_json::Map<String, Value>;

/// Error for one or more required fields that were not supplied
///
/// Produces "The field title is required" or
/// "The fields title and user_id are required".
pub fn missing_fields(fields: &[&str]) -> ApiError {
    match fields {
        [] => ApiError::BadRequest("Request body is empty".to_string()),
        [field] => ApiError::BadRequest(format!("The field {} is required", field)),
        [init @ .., last] => ApiError::BadRequest(format!(
            "The fields {} and {} are required",
            init.join(", "),
            last
        )),
    }
}

/// Reads a text field
///
/// Returns `Ok(None)` when the field is absent, `null` or empty, and an error
/// when it holds anything other than a string.
pub fn text_field(field: &str, value: Option<Value>) -> Result<Option<String>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ApiError::BadRequest(format!(
            "The field {} must be a string",
            field
        ))),
    }
}

/// Reads an owner reference
///
/// Any "no owner" signal (absent, `null`, `0`, `false`, `""`) yields
/// `Ok(None)`; a non-integer value is an error.
pub fn owner_field(field: &str, value: Option<Value>) -> Result<Option<i64>, ApiError> {
    let invalid = || ApiError::BadRequest(format!("The field {} must be an integer", field));

    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(None),
            Some(id) => Ok(Some(id)),
            None => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

/// Reads a required boolean field
pub fn bool_field(field: &str, value: Option<Value>) -> Result<bool, ApiError> {
    match value {
        None => Err(ApiError::BadRequest(format!("The field {} is required", field))),
        Some(Value::Bool(b)) => Ok(b),
        Some(_) => Err(ApiError::BadRequest(format!(
            "The field {} must be a boolean",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(err: ApiError) -> String {
        match err {
            ApiError::BadRequest(msg) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_message() {
        assert_eq!(message(missing_fields(&["title"])), "The field title is required");
        assert_eq!(
            message(missing_fields(&["name", "email"])),
            "The fields name and email are required"
        );
        assert_eq!(
            message(missing_fields(&["a", "b", "c"])),
            "The fields a, b and c are required"
        );
    }

    #[test]
    fn test_text_field() {
        assert_eq!(text_field("name", None).unwrap(), None);
        assert_eq!(text_field("name", Some(json!(null))).unwrap(), None);
        assert_eq!(text_field("name", Some(json!(""))).unwrap(), None);
        assert_eq!(
            text_field("name", Some(json!("Ana"))).unwrap(),
            Some("Ana".to_string())
        );
        assert!(text_field("name", Some(json!(42))).is_err());
    }

    #[test]
    fn test_owner_field_treats_falsy_as_missing() {
        for falsy in [json!(null), json!(0), json!(false), json!("")] {
            assert_eq!(owner_field("user_id", Some(falsy)).unwrap(), None);
        }
        assert_eq!(owner_field("user_id", None).unwrap(), None);
        assert_eq!(owner_field("user_id", Some(json!(7))).unwrap(), Some(7));
        assert_eq!(owner_field("user_id", Some(json!(-3))).unwrap(), Some(-3));
    }

    #[test]
    fn test_owner_field_rejects_non_integers() {
        assert!(owner_field("user_id", Some(json!("7"))).is_err());
        assert!(owner_field("user_id", Some(json!(1.5))).is_err());
        assert!(owner_field("user_id", Some(json!(true))).is_err());
        assert!(owner_field("user_id", Some(json!([1]))).is_err());
    }

    #[test]
    fn test_bool_field() {
        assert!(bool_field("is_completed", Some(json!(true))).unwrap());
        assert!(!bool_field("is_completed", Some(json!(false))).unwrap());
        assert!(bool_field("is_completed", None).is_err());
        assert!(bool_field("is_completed", Some(json!(null))).is_err());
        assert!(bool_field("is_completed", Some(json!("true"))).is_err());
        assert!(bool_field("is_completed", Some(json!(1))).is_err());
    }
}
