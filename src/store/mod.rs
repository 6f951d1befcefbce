// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Record Store access: the trait every backend implements and its error taxonomy.

pub mod http;
#[cfg(test)]
pub mod memory;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::logic::wire::WirePayload;
use crate::models::field_errors::FieldErrors;
use crate::models::record::RecordId;

pub use http::HttpStore;

/// Endpoint of the movies resource.
pub const MOVIES_ENDPOINT: &str = "movies";
/// Aggregated lookup lists for the movie form.
pub const MOVIE_OPTIONS_ENDPOINT: &str = "movie-options";

/// Field-keyed validation messages as returned by the Store.
pub type FieldMessages = BTreeMap<String, Vec<String>>;

/// Why a Store call failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Structured rejection (`{ errors: { field: [message, ...] } }`).
    #[error("validation failed for {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    Validation(FieldMessages),
    /// Non-validation error status.
    #[error("server responded with status {0}")]
    Status(u16),
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// The response body could not be understood.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Extract a validation failure from an error body, if it has one.
    pub fn from_error_body(body: &Value) -> Option<Self> {
        let errors = body.get("errors")?.as_object()?;
        let messages: FieldMessages = errors
            .iter()
            .map(|(field, value)| {
                let list = match value {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                    Value::String(single) => vec![single.clone()],
                    _ => Vec::new(),
                };
                (field.clone(), list)
            })
            .collect();
        (!messages.is_empty()).then_some(StoreError::Validation(messages))
    }

    /// Map onto the uniform inline-error shape used by drafts and edit buffers.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            StoreError::Validation(messages) => FieldErrors::from_store(messages),
            other => FieldErrors::row_failure(other.to_string()),
        }
    }
}

/// CRUD surface of the remote Record Store.
///
/// Implementations block the calling thread; they are only ever invoked from
/// the command worker pool.
pub trait RecordStore: Send + Sync {
    /// Every record of a resource, as raw JSON objects.
    fn list(&self, endpoint: &str) -> Result<Vec<Value>, StoreError>;

    /// Create a record and return the Store's representation of it.
    fn create(&self, endpoint: &str, payload: &WirePayload) -> Result<Value, StoreError>;

    fn update(&self, endpoint: &str, id: RecordId, payload: &WirePayload) -> Result<(), StoreError>;

    fn delete(&self, endpoint: &str, id: RecordId) -> Result<(), StoreError>;

    /// Lookup lists for the movie form (`genres`, `actors`, `statuses`, ...).
    fn movie_options(&self) -> Result<Value, StoreError>;
}

/// Accept a bare array or an object wrapping it in `data`.
pub fn list_items(body: Value) -> Result<Vec<Value>, StoreError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(StoreError::Decode("expected a list of records".into())),
        },
        _ => Err(StoreError::Decode("expected a list of records".into())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::field_errors::FieldError;

    #[test]
    fn validation_body_is_decoded_and_remapped() {
        let body = json!({
            "message": "The given data was invalid.",
            "errors": {"name_en": ["The name en has already been taken."], "name_ar": "Required"}
        });
        let err = StoreError::from_error_body(&body).unwrap();
        let errors = err.field_errors();

        assert_eq!(errors.get("name_en"), Some(&FieldError::AlreadyTaken));
        assert_eq!(errors.get("name_ar"), Some(&FieldError::Server("Required".into())));
    }

    #[test]
    fn bodies_without_errors_are_not_validation_failures() {
        assert!(StoreError::from_error_body(&json!({"message": "Server Error"})).is_none());
        assert!(StoreError::from_error_body(&json!({"errors": {}})).is_none());
    }

    #[test]
    fn operational_failures_become_row_failures() {
        let errors = StoreError::Status(500).field_errors();
        assert!(errors.get("name_en").is_none());
        assert!(matches!(errors.general(), Some(FieldError::RequestFailed(msg)) if msg.contains("500")));
    }

    #[test]
    fn list_accepts_bare_and_wrapped_arrays() {
        assert_eq!(list_items(json!([{"id": 1}])).unwrap().len(), 1);
        assert_eq!(list_items(json!({"data": [{"id": 1}, {"id": 2}]})).unwrap().len(), 2);
        assert!(matches!(list_items(json!({"id": 1})), Err(StoreError::Decode(_))));
    }
}
