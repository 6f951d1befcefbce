// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Typed encoders from drafts to Store request bodies.
//!
//! Every field is enumerated explicitly with its encoding rule:
//! - text fields are sent trimmed;
//! - integer fields become JSON numbers (simple resources) or text parts;
//! - booleans become `"0"`/`"1"`;
//! - relations become repeated `name[]` parts;
//! - optional numbers and references become an empty part when unset;
//! - images are file parts, only when a new file was chosen.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::models::movie::{ImageSlot, MovieDraft, MovieField, Relation};
use crate::models::record::{FieldValues, RecordId};
use crate::models::resource::{FieldKind, ResourceSchema};

/// Request body handed to the Record Store.
#[derive(Clone, Debug, PartialEq)]
pub enum WirePayload {
    Json(Value),
    Form(Vec<FormPart>),
}

/// One multipart form entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(PathBuf),
}

impl FormPart {
    fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    fn file(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            value: FormValue::File(path),
        }
    }
}

/// JSON body for a simple resource.
///
/// Integer fields are sent as numbers; an unparsable or empty integer is sent
/// as `null` and left for the Store to reject.
pub fn encode_record(schema: &ResourceSchema, values: &FieldValues) -> WirePayload {
    let mut body = Map::new();
    for spec in schema.fields {
        let raw = values.get(spec.key).map(|v| v.trim()).unwrap_or("");
        let encoded = match spec.kind {
            FieldKind::Integer { .. } => raw
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::Null),
            FieldKind::Text | FieldKind::Color => Value::String(raw.to_string()),
        };
        body.insert(spec.key.to_string(), encoded);
    }
    WirePayload::Json(Value::Object(body))
}

/// Multipart body for a movie.
pub fn encode_movie(draft: &MovieDraft) -> WirePayload {
    let mut parts = Vec::new();

    for field in MovieField::ALL {
        parts.push(FormPart::text(field.key(), draft.text(field).trim()));
    }
    parts.push(FormPart::text("status_id", optional_id(draft.status_id)));
    parts.push(FormPart::text("maturity_id", optional_id(draft.maturity_id)));
    parts.push(FormPart::text("featured", if draft.featured { "1" } else { "0" }));

    for relation in Relation::ALL {
        let name = format!("{}[]", relation.key());
        for id in draft.related(relation) {
            parts.push(FormPart::text(name.clone(), id.to_string()));
        }
    }

    for slot in [ImageSlot::Poster, ImageSlot::Banner] {
        if let Some(path) = draft.image(slot) {
            parts.push(FormPart::file(slot.key(), path.clone()));
        }
    }

    WirePayload::Form(parts)
}

fn optional_id(id: Option<RecordId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::resource::Resource;

    fn texts<'a>(parts: &'a [FormPart], name: &str) -> Vec<&'a str> {
        parts
            .iter()
            .filter(|p| p.name == name)
            .filter_map(|p| match &p.value {
                FormValue::Text(t) => Some(t.as_str()),
                FormValue::File(_) => None,
            })
            .collect()
    }

    #[test]
    fn record_encoding_trims_text_and_numbers_integers() {
        let schema = Resource::Ratings.schema();
        let mut values = FieldValues::new();
        values.insert("name_en".into(), " Family ".into());
        values.insert("name_ar".into(), "عائلي".into());
        values.insert("ranking".into(), "4".into());
        values.insert("maturity_rating".into(), "PG".into());

        let WirePayload::Json(body) = encode_record(schema, &values) else {
            panic!("simple resources are sent as JSON");
        };

        assert_eq!(
            body,
            json!({"name_en": "Family", "name_ar": "عائلي", "ranking": 4, "maturity_rating": "PG"})
        );
    }

    #[test]
    fn movie_encoding_flattens_relations_and_flags() {
        let mut draft = MovieDraft {
            title_en: "Theeb".into(),
            duration: String::new(),
            featured: true,
            status_id: Some(3),
            poster: Some(PathBuf::from("/tmp/poster.jpg")),
            ..Default::default()
        };
        draft.toggle_related(Relation::Genres, 2);
        draft.toggle_related(Relation::Genres, 8);
        draft.toggle_related(Relation::Subtitles, 1);

        let WirePayload::Form(parts) = encode_movie(&draft) else {
            panic!("movies are sent as multipart");
        };

        assert_eq!(texts(&parts, "featured"), vec!["1"]);
        assert_eq!(texts(&parts, "duration"), vec![""]);
        assert_eq!(texts(&parts, "maturity_id"), vec![""]);
        assert_eq!(texts(&parts, "status_id"), vec!["3"]);
        assert_eq!(texts(&parts, "genres[]"), vec!["2", "8"]);
        assert_eq!(texts(&parts, "subtitles[]"), vec!["1"]);
        assert!(texts(&parts, "actors[]").is_empty());

        let files: Vec<_> = parts
            .iter()
            .filter(|p| matches!(p.value, FormValue::File(_)))
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(files, vec!["poster"], "banner is omitted when unchanged");
    }
}
