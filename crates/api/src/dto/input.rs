//! Input DTO extraction and validation.
//!
//! Handlers receive a [`DtoIn`]: the request's JSON body (or, for `GET`, its
//! query string) as a loosely typed object. Typed accessors check one field
//! each and fail with `invalidDtoIn` naming that field, so a handler that
//! checks fields in order reports the first bad one and nothing else.
//!
//! A key whose value is JSON `null` is treated the same as a missing key.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Query, Request},
    http::Method,
};
use serde_json::{Map, Value};

use shopping_list_core::Quantity;

use crate::error::AppError;

/// Parameter name reported when the payload as a whole is unusable.
pub const DTO_IN_PARAM: &str = "dtoIn";

/// Loosely typed request input awaiting validation.
#[derive(Debug, Clone, Default)]
pub struct DtoIn(Map<String, Value>);

impl DtoIn {
    /// Wrap an already parsed JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a request body. An empty body reads as `{}`.
    ///
    /// # Errors
    ///
    /// Returns `invalidDtoIn` for `dtoIn` if the body is not a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            Ok(_) => Err(AppError::invalid_dto_in(
                DTO_IN_PARAM,
                "dtoIn must be a JSON object.",
            )),
            Err(e) => Err(AppError::invalid_dto_in(
                DTO_IN_PARAM,
                format!("dtoIn is not valid JSON: {e}"),
            )),
        }
    }

    /// Build input from decoded query parameters; every value is a string.
    #[must_use]
    pub fn from_query(params: HashMap<String, String>) -> Self {
        Self(
            params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }

    fn field(&self, param: &str) -> Option<&Value> {
        self.0.get(param).filter(|value| !value.is_null())
    }

    /// A string that is non-empty after trimming. The untrimmed text is returned.
    ///
    /// # Errors
    ///
    /// Returns `invalidDtoIn` if the field is missing, not a string, or blank.
    pub fn required_str(&self, param: &'static str) -> Result<&str, AppError> {
        match self.field(param) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
            _ => Err(AppError::invalid_dto_in(
                param,
                format!("{param} must be a non-empty string."),
            )),
        }
    }

    /// An optional string; empty strings are allowed.
    ///
    /// # Errors
    ///
    /// Returns `invalidDtoIn` if the field is present but not a string.
    pub fn optional_str(&self, param: &'static str) -> Result<Option<&str>, AppError> {
        match self.field(param) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(AppError::invalid_dto_in(
                param,
                format!("{param} must be a string if provided."),
            )),
        }
    }

    /// An optional string that, when present, must be non-empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns `invalidDtoIn` if the field is present but not a non-empty string.
    pub fn optional_non_empty_str(&self, param: &'static str) -> Result<Option<&str>, AppError> {
        match self.field(param) {
            None => Ok(None),
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s)),
            Some(_) => Err(AppError::invalid_dto_in(
                param,
                format!("{param} must be a non-empty string if provided."),
            )),
        }
    }

    /// A JSON boolean. Strings such as `"true"` are rejected.
    ///
    /// # Errors
    ///
    /// Returns `invalidDtoIn` if the field is missing or not a boolean.
    pub fn required_bool(&self, param: &'static str) -> Result<bool, AppError> {
        match self.field(param) {
            Some(Value::Bool(b)) => Ok(*b),
            _ => Err(AppError::invalid_dto_in(
                param,
                format!("{param} must be boolean."),
            )),
        }
    }

    /// An optional JSON number.
    ///
    /// # Errors
    ///
    /// Returns `invalidDtoIn` if the field is present but not a number.
    pub fn optional_quantity(&self, param: &'static str) -> Result<Option<Quantity>, AppError> {
        match self.field(param) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_f64().and_then(Quantity::new).map(Some).ok_or_else(|| {
                AppError::invalid_dto_in(param, format!("{param} must be a finite number."))
            }),
            Some(_) => Err(AppError::invalid_dto_in(
                param,
                format!("{param} must be a number if provided."),
            )),
        }
    }

    /// An optional flag spelled exactly `"true"` or `"false"`; absent means `false`.
    ///
    /// # Errors
    ///
    /// Returns `invalidDtoIn` for any other value.
    pub fn optional_flag(&self, param: &'static str) -> Result<bool, AppError> {
        match self.field(param) {
            None => Ok(false),
            Some(Value::String(s)) if s == "true" => Ok(true),
            Some(Value::String(s)) if s == "false" => Ok(false),
            Some(_) => Err(AppError::invalid_dto_in(
                param,
                format!("{param} must be 'true' or 'false' if provided."),
            )),
        }
    }
}

impl<S> FromRequest<S> for DtoIn
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if request.method() == Method::GET {
            let Query(params) = Query::<HashMap<String, String>>::try_from_uri(request.uri())
                .map_err(|e| AppError::invalid_dto_in(DTO_IN_PARAM, e.body_text()))?;
            return Ok(Self::from_query(params));
        }

        let body = Bytes::from_request(request, state)
            .await
            .map_err(|e| AppError::invalid_dto_in(DTO_IN_PARAM, e.body_text()))?;
        Self::from_body(&body)
    }
}
