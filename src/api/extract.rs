//! Request extractors that report failures as [`AppError`].
//!
//! axum's own rejections answer with plain text; these wrappers keep every
//! error body in the `{"error": "..."}` shape.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and validated.
///
/// # Errors
///
/// Rejects with [`AppError::Validation`] when the body is not valid JSON for
/// `T` or when a `validator` rule fails.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidJson(value))
    }
}

/// Numeric `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("Id inválido"))?;

        Ok(IdPath(id))
    }
}

/// Query string where a repeated key keeps its first value.
///
/// # Errors
///
/// Rejects with [`AppError::Validation`] when the query string cannot be
/// decoded into `T`.
#[derive(Debug)]
pub struct FirstQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for FirstQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        let mut fields = Map::new();
        for (key, value) in pairs {
            fields.entry(key).or_insert(Value::String(value));
        }

        let value = serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::bad_request(format!("Parámetros inválidos: {e}")))?;

        Ok(FirstQuery(value))
    }
}
