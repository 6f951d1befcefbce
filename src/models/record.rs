// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Persisted records and drafts of the simple resources.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::models::resource::ResourceSchema;

/// Identifier assigned by the Record Store; immutable once created.
pub type RecordId = i64;

/// Field name to editable text value. Drafts are plain `FieldValues` and
/// therefore never carry an `id`.
pub type FieldValues = BTreeMap<String, String>;

/// A record as last fetched from the Store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub values: FieldValues,
}

impl Record {
    /// Text value of a field, empty when absent.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Decode a Store JSON object, keeping only the schema's fields.
    ///
    /// Numbers and booleans are converted to their text form; `null` and
    /// missing fields become empty strings.
    pub fn from_json(schema: &ResourceSchema, raw: &Value) -> Result<Self> {
        let object = raw
            .as_object()
            .ok_or_else(|| anyhow!("expected a JSON object for a {} record", schema.endpoint))?;
        let id = object
            .get("id")
            .and_then(json_id)
            .with_context(|| format!("{} record without a numeric id", schema.endpoint))?;

        let values = schema
            .fields
            .iter()
            .map(|spec| {
                let text = object.get(spec.key).map(json_text).unwrap_or_default();
                (spec.key.to_string(), text)
            })
            .collect();

        Ok(Self { id, values })
    }

    #[cfg(test)]
    pub fn with_values(id: RecordId, pairs: &[(&str, &str)]) -> Self {
        Self {
            id,
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// A fresh draft pre-filled with each field's default.
pub fn empty_draft(schema: &ResourceSchema) -> FieldValues {
    schema
        .fields
        .iter()
        .map(|spec| (spec.key.to_string(), spec.default.to_string()))
        .collect()
}

/// Accept ids sent either as numbers or numeric strings.
pub(crate) fn json_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::resource::Resource;

    #[test]
    fn from_json_keeps_schema_fields_and_stringifies_numbers() {
        let schema = Resource::Ratings.schema();
        let raw = json!({
            "id": 12,
            "name_en": "Teens",
            "name_ar": "مراهقون",
            "ranking": 3,
            "maturity_rating": null,
            "created_at": "2024-01-01"
        });

        let record = Record::from_json(schema, &raw).unwrap();

        assert_eq!(record.id, 12);
        assert_eq!(record.value("ranking"), "3");
        assert_eq!(record.value("maturity_rating"), "");
        assert!(!record.values.contains_key("created_at"));
    }

    #[test]
    fn from_json_accepts_string_ids_and_rejects_missing_ids() {
        let schema = Resource::Genres.schema();
        let ok = Record::from_json(schema, &json!({"id": "5", "name_en": "Drama"})).unwrap();
        assert_eq!(ok.id, 5);

        assert!(Record::from_json(schema, &json!({"name_en": "Drama"})).is_err());
        assert!(Record::from_json(schema, &json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn empty_draft_uses_field_defaults() {
        let draft = empty_draft(Resource::Languages.schema());
        assert_eq!(draft.get("name_en").map(String::as_str), Some(""));
        assert_eq!(draft.get("color").map(String::as_str), Some("#3366CC"));
    }
}
