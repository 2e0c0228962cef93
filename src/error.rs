use std::collections::BTreeMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

pub type ApiResult<T> = Result<T, ApiError>;

/// Postgres error code for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Messages keyed by the payload field they refer to.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    /// `Ok(())` when nothing was collected, a validation error otherwise.
    pub fn into_result(self) -> ApiResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self.0.keys().map(String::as_str).collect::<Vec<_>>();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in errors.field_errors() {
            for err in errors.iter() {
                let message = match err.message.as_ref() {
                    Some(message) => message.to_string(),
                    None => err.code.to_string(),
                };
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed, {0}")]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        ApiError::Validation(errors)
    }

    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
            _ => false,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(errors) => {
                tracing::info!("Rejected payload: {}", errors);
                HttpResponse::BadRequest().json(json!({ "errors": errors }))
            }
            ApiError::BadRequest(message) => {
                tracing::info!("Bad request: {}", message);
                HttpResponse::BadRequest().json(json!({ "error": message }))
            }
            ApiError::NotFound => HttpResponse::NotFound().json(json!({ "error": "Not found" })),
            ApiError::Database(err) => {
                tracing::error!("Database Error {:#?}", err);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Something went wrong"
                }))
            }
        }
    }
}
