// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Field-level validation results shared by local validation and Store responses.

use std::collections::BTreeMap;

/// Why a single field (or a whole row) was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidInteger,
    OutOfRange { min: i64, max: i64 },
    InvalidImdbUrl,
    InvalidColor,
    SelectAtLeastOne,
    ImageWidth { expected: u32, actual: u32 },
    ImageHeight { min: u32, max: u32, actual: u32 },
    ImageTooLarge { max_bytes: u64 },
    ImageUnreadable,
    /// Store reported a uniqueness violation ("has already been taken").
    AlreadyTaken,
    /// Any other Store validation message, shown verbatim.
    Server(String),
    /// Non-validation failure attached to a whole row.
    RequestFailed(String),
}

/// Errors for one draft or for the edit buffer, keyed by field name.
///
/// A value with no entries is valid for submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, FieldError>,
    general: Option<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row-level failure without a field (network error, non-validation status).
    pub fn row_failure(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            general: Some(FieldError::RequestFailed(message.into())),
        }
    }

    /// Decode a Store validation payload (`field -> [message, ...]`).
    ///
    /// Only the first non-blank message per field is kept; uniqueness
    /// violations are mapped to [`FieldError::AlreadyTaken`]. A payload with no
    /// usable message becomes a row-level failure.
    pub fn from_store(messages: &BTreeMap<String, Vec<String>>) -> Self {
        let mut errors = Self::new();
        for (field, list) in messages {
            let Some(first) = list.iter().find(|m| !m.trim().is_empty()) else {
                continue;
            };
            let error = if is_duplicate_message(first) {
                FieldError::AlreadyTaken
            } else {
                FieldError::Server(first.trim().to_string())
            };
            errors.fields.insert(field.clone(), error);
        }
        if errors.is_empty() {
            // Still a rejection; keep the row flagged even without a usable message.
            let fields: Vec<&str> = messages.keys().map(String::as_str).collect();
            return Self::row_failure(format!("validation failed for {}", fields.join(", ")));
        }
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }

    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.general.is_some())
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.fields.get(field)
    }

    pub fn general(&self) -> Option<&FieldError> {
        self.general.as_ref()
    }

    pub fn set(&mut self, field: impl Into<String>, error: FieldError) {
        self.fields.insert(field.into(), error);
    }

    /// Drop the error for one field; the row-level failure is cleared too
    /// since the user is correcting the row.
    pub fn clear_field(&mut self, field: &str) {
        self.fields.remove(field);
        self.general = None;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldError)> {
        self.fields.iter()
    }
}

fn is_duplicate_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["taken", "duplicate", "already"]
        .iter()
        .any(|needle| lower.contains(needle))
}

/// Per-draft errors keyed by the draft's position in the ordered sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftErrors {
    rows: BTreeMap<usize, FieldErrors>,
}

impl DraftErrors {
    pub fn get(&self, index: usize) -> Option<&FieldErrors> {
        self.rows.get(&index)
    }

    /// Store errors for a row; empty errors remove the entry.
    pub fn set(&mut self, index: usize, errors: FieldErrors) {
        if errors.is_empty() {
            self.rows.remove(&index);
        } else {
            self.rows.insert(index, errors);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Clear one field of one row (optimistic clear-on-edit).
    pub fn clear_field(&mut self, index: usize, field: &str) {
        if let Some(row) = self.rows.get_mut(&index) {
            row.clear_field(field);
            if row.is_empty() {
                self.rows.remove(&index);
            }
        }
    }

    /// Discard the entry at `index` and shift every later entry down by one.
    pub fn remove_row(&mut self, index: usize) {
        let rows = std::mem::take(&mut self.rows);
        self.rows = rows
            .into_iter()
            .filter(|(i, _)| *i != index)
            .map(|(i, errs)| if i > index { (i - 1, errs) } else { (i, errs) })
            .collect();
    }

    /// Re-key failed drafts after the succeeded ones were removed.
    ///
    /// Each failed draft moves to `original - |succeeded below original|`.
    pub fn rekeyed_after_success(failed: Vec<(usize, FieldErrors)>, succeeded: &[usize]) -> Self {
        let mut out = Self::default();
        for (original, errors) in failed {
            let shift = succeeded.iter().filter(|s| **s < original).count();
            out.set(original - shift, errors);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errs(field: &str) -> FieldErrors {
        let mut e = FieldErrors::new();
        e.set(field, FieldError::Required);
        e
    }

    #[test]
    fn store_duplicate_messages_are_remapped() {
        let mut raw = BTreeMap::new();
        raw.insert("name_en".to_string(), vec!["The name en has already been taken.".to_string()]);
        raw.insert("name_ar".to_string(), vec!["Must be Arabic.".to_string(), "other".to_string()]);

        let decoded = FieldErrors::from_store(&raw);

        assert_eq!(decoded.get("name_en"), Some(&FieldError::AlreadyTaken));
        assert_eq!(
            decoded.get("name_ar"),
            Some(&FieldError::Server("Must be Arabic.".into()))
        );
    }

    #[test]
    fn blank_store_messages_still_flag_the_row() {
        let mut raw = BTreeMap::new();
        raw.insert("name_en".to_string(), vec!["  ".to_string()]);
        raw.insert("name_ar".to_string(), Vec::new());

        let decoded = FieldErrors::from_store(&raw);
        assert!(!decoded.is_empty());
        assert_eq!(
            decoded.general(),
            Some(&FieldError::RequestFailed("validation failed for name_ar, name_en".into()))
        );

        let mut rows = DraftErrors::default();
        rows.set(0, decoded);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn remove_row_shifts_later_entries_down() {
        let mut rows = DraftErrors::default();
        rows.set(0, errs("a"));
        rows.set(1, errs("b"));
        rows.set(2, errs("c"));

        rows.remove_row(1);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows.get(0), Some(&errs("a")));
        assert_eq!(rows.get(1), Some(&errs("c")));
        assert!(rows.get(2).is_none());
    }

    #[test]
    fn rekey_subtracts_succeeded_rows_below() {
        let failed = vec![(1, errs("b")), (4, errs("e"))];
        let rows = DraftErrors::rekeyed_after_success(failed, &[0, 2, 3]);

        assert_eq!(rows.get(0), Some(&errs("b")));
        assert_eq!(rows.get(1), Some(&errs("e")));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn clearing_last_field_drops_row_entry() {
        let mut rows = DraftErrors::default();
        rows.set(0, errs("name_en"));

        rows.clear_field(0, "name_en");

        assert!(rows.is_empty());
    }

    #[test]
    fn row_failure_is_not_empty() {
        let e = FieldErrors::row_failure("timeout");
        assert!(!e.is_empty());
        assert_eq!(e.len(), 1);
        assert_eq!(e.general(), Some(&FieldError::RequestFailed("timeout".into())));
    }
}
