//! Lenient JSON body parsing for the write endpoints.
//!
//! Bodies are read as JSON whatever the content type. Numbers may arrive as
//! JSON numbers or as numeric strings.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use super::api_error::ApiError;

/// A request body that must be a JSON object.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    pub fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(JsonObject(map)),
            _ => Err(ApiError::InvalidInput),
        }
    }

    pub fn required_text(&self, field: &str) -> Result<String, ApiError> {
        match self.0.get(field) {
            Some(Value::String(text)) => Ok(text.clone()),
            _ => Err(ApiError::InvalidInput),
        }
    }

    pub fn required_number(&self, field: &str) -> Result<f64, ApiError> {
        match self.0.get(field) {
            Some(Value::Number(number)) => number.as_f64().ok_or(ApiError::InvalidInput),
            Some(Value::String(text)) => text.trim().parse().map_err(|_| ApiError::InvalidInput),
            _ => Err(ApiError::InvalidInput),
        }
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::InvalidInput)?;
        JsonObject::parse(&bytes)
    }
}
