// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! In-process Record Store used by command-level tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use serde_json::{Map, Value, json};

use super::{RecordStore, StoreError};
use crate::logic::wire::{FormValue, WirePayload};
use crate::models::record::{RecordId, json_id};

/// Record Store backed by plain collections, with scriptable failures.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    collections: BTreeMap<String, Vec<Map<String, Value>>>,
    next_id: RecordId,
    /// `(field, value, error)`: creates whose `field` equals `value` fail.
    create_failures: Vec<(String, String, StoreError)>,
    delete_failures: BTreeSet<RecordId>,
    list_failure: Option<StoreError>,
    options: Option<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection; records without an id get one assigned.
    pub fn seed(&self, endpoint: &str, records: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        for record in records {
            let Value::Object(mut object) = record else {
                continue;
            };
            let id = match object.get("id").and_then(json_id) {
                Some(id) => id,
                None => state.allocate_id(),
            };
            state.next_id = state.next_id.max(id);
            object.insert("id".into(), json!(id));
            state
                .collections
                .entry(endpoint.to_string())
                .or_default()
                .push(object);
        }
    }

    pub fn fail_create_when(&self, field: &str, value: &str, error: StoreError) {
        let mut state = self.state.lock().unwrap();
        state
            .create_failures
            .push((field.to_string(), value.to_string(), error));
    }

    pub fn fail_delete(&self, id: RecordId) {
        self.state.lock().unwrap().delete_failures.insert(id);
    }

    pub fn fail_list(&self, error: Option<StoreError>) {
        self.state.lock().unwrap().list_failure = error;
    }

    pub fn set_options(&self, options: Value) {
        self.state.lock().unwrap().options = Some(options);
    }

    /// Snapshot of a collection.
    pub fn records(&self, endpoint: &str) -> Vec<Value> {
        let state = self.state.lock().unwrap();
        state
            .collections
            .get(endpoint)
            .map(|items| items.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }
}

impl State {
    fn allocate_id(&mut self) -> RecordId {
        self.next_id += 1;
        self.next_id
    }
}

/// Flatten a payload into a JSON object; repeated `name[]` parts become arrays.
fn payload_object(payload: &WirePayload) -> Map<String, Value> {
    match payload {
        WirePayload::Json(Value::Object(object)) => object.clone(),
        WirePayload::Json(_) => Map::new(),
        WirePayload::Form(parts) => {
            let mut object = Map::new();
            for part in parts {
                let value = match &part.value {
                    FormValue::Text(text) => Value::String(text.clone()),
                    FormValue::File(path) => Value::String(path.display().to_string()),
                };
                match part.name.strip_suffix("[]") {
                    Some(name) => {
                        let entry = object
                            .entry(name.to_string())
                            .or_insert_with(|| Value::Array(Vec::new()));
                        if let Value::Array(items) = entry {
                            items.push(value);
                        }
                    }
                    None => {
                        object.insert(part.name.clone(), value);
                    }
                }
            }
            object
        }
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl RecordStore for MemoryStore {
    fn list(&self, endpoint: &str) -> Result<Vec<Value>, StoreError> {
        let state = self.state.lock().unwrap();
        if let Some(err) = &state.list_failure {
            return Err(err.clone());
        }
        Ok(state
            .collections
            .get(endpoint)
            .map(|items| items.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default())
    }

    fn create(&self, endpoint: &str, payload: &WirePayload) -> Result<Value, StoreError> {
        let mut state = self.state.lock().unwrap();
        let mut object = payload_object(payload);
        for (field, value, error) in &state.create_failures {
            if object.get(field).map(text_of).as_deref() == Some(value.as_str()) {
                return Err(error.clone());
            }
        }
        let id = state.allocate_id();
        object.insert("id".into(), json!(id));
        state
            .collections
            .entry(endpoint.to_string())
            .or_default()
            .push(object.clone());
        Ok(Value::Object(object))
    }

    fn update(&self, endpoint: &str, id: RecordId, payload: &WirePayload) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let record = state
            .collections
            .get_mut(endpoint)
            .and_then(|items| items.iter_mut().find(|r| r.get("id").and_then(json_id) == Some(id)))
            .ok_or(StoreError::Status(404))?;
        for (key, value) in payload_object(payload) {
            if key != "id" && key != "_method" {
                record.insert(key, value);
            }
        }
        Ok(())
    }

    fn delete(&self, endpoint: &str, id: RecordId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.delete_failures.contains(&id) {
            return Err(StoreError::Status(500));
        }
        let items = state
            .collections
            .get_mut(endpoint)
            .ok_or(StoreError::Status(404))?;
        let before = items.len();
        items.retain(|r| r.get("id").and_then(json_id) != Some(id));
        if items.len() == before {
            return Err(StoreError::Status(404));
        }
        Ok(())
    }

    fn movie_options(&self) -> Result<Value, StoreError> {
        let state = self.state.lock().unwrap();
        state
            .options
            .clone()
            .ok_or_else(|| StoreError::Status(404))
    }
}
