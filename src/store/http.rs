// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Blocking HTTP client for the Record Store REST API.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, multipart};
use reqwest::header::ACCEPT;
use serde_json::Value;
use url::Url;

use super::{MOVIE_OPTIONS_ENDPOINT, RecordStore, StoreError, list_items};
use crate::logic::wire::{FormPart, FormValue, WirePayload};
use crate::models::record::RecordId;

/// Record Store reached over HTTP.
pub struct HttpStore {
    client: Client,
    base: Url,
}

impl HttpStore {
    /// Build a client for `base_url` (e.g. `http://127.0.0.1:8000/api/`).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base =
            Url::parse(&normalized).with_context(|| format!("Invalid Store URL {base_url:?}"))?;
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, StoreError> {
        self.base
            .join(path)
            .map_err(|err| StoreError::Transport(format!("invalid request path {path:?}: {err}")))
    }

    fn record_url(&self, endpoint: &str, id: RecordId) -> Result<Url, StoreError> {
        self.url(&format!("{endpoint}/{id}"))
    }

    /// Send a request and decode the JSON body (`Null` for empty bodies).
    fn send(&self, request: RequestBuilder) -> Result<Value, StoreError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        let status = response.status();

        if status.is_client_error() {
            let body: Value = response.json().unwrap_or(Value::Null);
            if matches!(status, StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST)
                && let Some(err) = StoreError::from_error_body(&body)
            {
                return Err(err);
            }
            return Err(StoreError::Status(status.as_u16()));
        }
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| StoreError::Decode(err.to_string()))
    }

    fn post_record(&self, endpoint: &str, payload: &WirePayload) -> Result<Value, StoreError> {
        let request = self.client.post(self.url(endpoint)?);
        let request = match payload {
            WirePayload::Json(body) => request.json(body),
            WirePayload::Form(parts) => request.multipart(multipart_form(parts)?),
        };
        let mut body = self.send(request)?;
        Ok(match body.get_mut("data") {
            Some(data) => data.take(),
            None => body,
        })
    }

    fn put_record(&self, endpoint: &str, id: RecordId, payload: &WirePayload) -> Result<(), StoreError> {
        let url = self.record_url(endpoint, id)?;
        let request = match payload {
            WirePayload::Json(body) => self.client.put(url).json(body),
            // Multipart bodies are only parsed on POST; tunnel the PUT.
            WirePayload::Form(parts) => self
                .client
                .post(url)
                .multipart(multipart_form(parts)?.text("_method", "PUT")),
        };
        self.send(request).map(|_| ())
    }
}

fn multipart_form(parts: &[FormPart]) -> Result<multipart::Form, StoreError> {
    let mut form = multipart::Form::new();
    for part in parts {
        form = match &part.value {
            FormValue::Text(text) => form.text(part.name.clone(), text.clone()),
            FormValue::File(path) => {
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                let file = multipart::Part::file(path)
                    .map_err(|err| {
                        StoreError::Transport(format!("cannot read {}: {err}", path.display()))
                    })?
                    .mime_str(mime.essence_str())
                    .map_err(|err| StoreError::Transport(err.to_string()))?;
                form.part(part.name.clone(), file)
            }
        };
    }
    Ok(form)
}

fn log_failure<T>(result: Result<T, StoreError>, op: &str, endpoint: &str) -> Result<T, StoreError> {
    if let Err(err) = &result {
        match err {
            StoreError::Validation(_) => tracing::debug!(op, endpoint, %err, "store rejected request"),
            _ => tracing::warn!(op, endpoint, %err, "store request failed"),
        }
    }
    result
}

impl RecordStore for HttpStore {
    fn list(&self, endpoint: &str) -> Result<Vec<Value>, StoreError> {
        tracing::debug!(endpoint, "listing records");
        let result = self
            .url(endpoint)
            .and_then(|url| self.send(self.client.get(url)))
            .and_then(list_items);
        log_failure(result, "list", endpoint)
    }

    fn create(&self, endpoint: &str, payload: &WirePayload) -> Result<Value, StoreError> {
        tracing::debug!(endpoint, "creating record");
        log_failure(self.post_record(endpoint, payload), "create", endpoint)
    }

    fn update(&self, endpoint: &str, id: RecordId, payload: &WirePayload) -> Result<(), StoreError> {
        tracing::debug!(endpoint, id, "updating record");
        log_failure(self.put_record(endpoint, id, payload), "update", endpoint)
    }

    fn delete(&self, endpoint: &str, id: RecordId) -> Result<(), StoreError> {
        tracing::debug!(endpoint, id, "deleting record");
        let result = self
            .record_url(endpoint, id)
            .and_then(|url| self.send(self.client.delete(url)))
            .map(|_| ());
        log_failure(result, "delete", endpoint)
    }

    fn movie_options(&self) -> Result<Value, StoreError> {
        let result = self
            .url(MOVIE_OPTIONS_ENDPOINT)
            .and_then(|url| self.send(self.client.get(url)));
        log_failure(result, "options", MOVIE_OPTIONS_ENDPOINT)
    }
}
