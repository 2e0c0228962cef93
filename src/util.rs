use std::borrow::Cow;

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, HttpRequest,
};
use chrono::{Datelike, Utc};
use serde::{de::Error, Deserialize, Deserializer};
use uuid::Uuid;
use validator::ValidationError;

use crate::error::ApiError;

pub const DEFAULT_USER_NAME: &str = "Anonymous";

pub fn default_user_name() -> String {
    DEFAULT_USER_NAME.to_string()
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn validate_non_blank(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::from("This field may not be blank.")));
    }

    if text.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::from("This field must contain non white space characters.")));
    }

    Ok(())
}

/// Tells an absent field (`None`) apart from an explicit `null` (`Some(None)`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query filter value where `?movie_id=` (empty) means no filter at all.
pub fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse::<Uuid>().map(Some).map_err(D::Error::custom)
        }
        _ => Ok(None),
    }
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        ApiError::BadRequest(err.to_string()).into()
    })
}

/// A malformed identifier in the path can't name an existing row.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err: PathError, _req: &HttpRequest| ApiError::NotFound.into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        ApiError::BadRequest(err.to_string()).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        review: Option<Option<u32>>,
    }

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "empty_as_none")]
        movie_id: Option<Uuid>,
    }

    #[test]
    fn empty_filter_value_means_no_filter() {
        let empty = web::Query::<Filter>::from_query("movie_id=").unwrap();
        assert_eq!(empty.movie_id, None);

        let missing = web::Query::<Filter>::from_query("").unwrap();
        assert_eq!(missing.movie_id, None);

        let id = Uuid::new_v4();
        let set = web::Query::<Filter>::from_query(&format!("movie_id={}", id)).unwrap();
        assert_eq!(set.movie_id, Some(id));

        assert!(web::Query::<Filter>::from_query("movie_id=not-a-uuid").is_err());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(validate_non_blank("").is_err());
        assert!(validate_non_blank("   \n").is_err());
        assert!(validate_non_blank("Great movie").is_ok());
    }

    #[test]
    fn double_option_distinguishes_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.review, None);

        let null: Patch = serde_json::from_str(r#"{"review": null}"#).unwrap();
        assert_eq!(null.review, Some(None));

        let set: Patch = serde_json::from_str(r#"{"review": 7}"#).unwrap();
        assert_eq!(set.review, Some(Some(7)));
    }
}
