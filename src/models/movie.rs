// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Movie records, their editable draft form, and lookup options.
//!
//! Movies are richer than the simple resources: localized titles and
//! descriptions, several many-to-many relations, and poster/banner uploads.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use crate::i18n::{Label, Locale};
use crate::models::field_errors::{FieldError, FieldErrors};
use crate::models::record::{RecordId, json_id, json_text};
use crate::models::validation::{is_imdb_title_url, validate_integer};

/// Many-to-many relations submitted as repeated `name[]` form entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    Genres,
    Actors,
    Directors,
    Languages,
    Subtitles,
}

impl Relation {
    pub const ALL: [Relation; 5] = [
        Relation::Genres,
        Relation::Actors,
        Relation::Directors,
        Relation::Languages,
        Relation::Subtitles,
    ];

    /// JSON key in Store payloads and the stem of the form field.
    pub fn key(self) -> &'static str {
        match self {
            Relation::Genres => "genres",
            Relation::Actors => "actors",
            Relation::Directors => "directors",
            Relation::Languages => "languages",
            Relation::Subtitles => "subtitles",
        }
    }

    pub fn label(self) -> Label {
        match self {
            Relation::Genres => Label::Genres,
            Relation::Actors => Label::Actors,
            Relation::Directors => Label::Directors,
            Relation::Languages => Label::Languages,
            Relation::Subtitles => Label::Subtitles,
        }
    }
}

/// Which image slot a file belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Poster,
    Banner,
}

impl ImageSlot {
    pub fn key(self) -> &'static str {
        match self {
            ImageSlot::Poster => "poster",
            ImageSlot::Banner => "banner",
        }
    }
}

/// One selectable entry of a lookup list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionItem {
    pub id: RecordId,
    pub name_en: String,
    pub name_ar: String,
}

impl OptionItem {
    pub fn name(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar if !self.name_ar.is_empty() => &self.name_ar,
            _ => &self.name_en,
        }
    }

    fn from_json(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let id = object.get("id").and_then(json_id)?;
        let name_en = first_text(object, &["name_en", "maturity_rating", "name"]);
        let name_ar = first_text(object, &["name_ar"]);
        Some(Self {
            id,
            name_en,
            name_ar,
        })
    }
}

/// Aggregated lookup lists from `GET /movie-options`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieOptions {
    pub genres: Vec<OptionItem>,
    pub actors: Vec<OptionItem>,
    pub directors: Vec<OptionItem>,
    pub languages: Vec<OptionItem>,
    pub statuses: Vec<OptionItem>,
    pub maturities: Vec<OptionItem>,
}

impl MovieOptions {
    pub fn from_json(raw: &Value) -> Result<Self> {
        let object = unwrap_data(raw)
            .as_object()
            .ok_or_else(|| anyhow!("movie options must be a JSON object"))?;
        let list = |key: &str| -> Vec<OptionItem> {
            object
                .get(key)
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(OptionItem::from_json).collect())
                .unwrap_or_default()
        };
        Ok(Self {
            genres: list("genres"),
            actors: list("actors"),
            directors: list("directors"),
            languages: list("languages"),
            statuses: list("statuses"),
            maturities: list("maturities"),
        })
    }

    /// Choices for a relation. Subtitles are picked from the language list.
    pub fn for_relation(&self, relation: Relation) -> &[OptionItem] {
        match relation {
            Relation::Genres => &self.genres,
            Relation::Actors => &self.actors,
            Relation::Directors => &self.directors,
            Relation::Languages | Relation::Subtitles => &self.languages,
        }
    }
}

/// Editable working copy of a movie (create form or edit buffer).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieDraft {
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub imdb_url: String,
    /// Minutes, kept as typed text until validation.
    pub duration: String,
    pub status_id: Option<RecordId>,
    pub maturity_id: Option<RecordId>,
    pub featured: bool,
    pub relations: BTreeMap<Relation, BTreeSet<RecordId>>,
    /// Newly chosen files; `None` keeps whatever the Store already has.
    pub poster: Option<PathBuf>,
    pub banner: Option<PathBuf>,
    /// Existing image URLs reported by the Store (edit mode only).
    pub poster_url: Option<String>,
    pub banner_url: Option<String>,
}

impl MovieDraft {
    pub fn related(&self, relation: Relation) -> impl Iterator<Item = RecordId> + '_ {
        self.relations
            .get(&relation)
            .into_iter()
            .flat_map(|ids| ids.iter().copied())
    }

    pub fn is_related(&self, relation: Relation, id: RecordId) -> bool {
        self.relations
            .get(&relation)
            .is_some_and(|ids| ids.contains(&id))
    }

    pub fn toggle_related(&mut self, relation: Relation, id: RecordId) {
        let ids = self.relations.entry(relation).or_default();
        if !ids.remove(&id) {
            ids.insert(id);
        }
    }

    pub fn set_text(&mut self, field: MovieField, value: String) {
        match field {
            MovieField::TitleEn => self.title_en = value,
            MovieField::TitleAr => self.title_ar = value,
            MovieField::DescriptionEn => self.description_en = value,
            MovieField::DescriptionAr => self.description_ar = value,
            MovieField::ImdbUrl => self.imdb_url = value,
            MovieField::Duration => self.duration = value,
        }
    }

    pub fn text(&self, field: MovieField) -> &str {
        match field {
            MovieField::TitleEn => &self.title_en,
            MovieField::TitleAr => &self.title_ar,
            MovieField::DescriptionEn => &self.description_en,
            MovieField::DescriptionAr => &self.description_ar,
            MovieField::ImdbUrl => &self.imdb_url,
            MovieField::Duration => &self.duration,
        }
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&PathBuf> {
        match slot {
            ImageSlot::Poster => self.poster.as_ref(),
            ImageSlot::Banner => self.banner.as_ref(),
        }
    }

    pub fn set_image(&mut self, slot: ImageSlot, path: Option<PathBuf>) {
        match slot {
            ImageSlot::Poster => self.poster = path,
            ImageSlot::Banner => self.banner = path,
        }
    }
}

/// Free-text fields of the movie form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovieField {
    TitleEn,
    TitleAr,
    DescriptionEn,
    DescriptionAr,
    ImdbUrl,
    Duration,
}

impl MovieField {
    pub const ALL: [MovieField; 6] = [
        MovieField::TitleEn,
        MovieField::TitleAr,
        MovieField::DescriptionEn,
        MovieField::DescriptionAr,
        MovieField::ImdbUrl,
        MovieField::Duration,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MovieField::TitleEn => "title_en",
            MovieField::TitleAr => "title_ar",
            MovieField::DescriptionEn => "description_en",
            MovieField::DescriptionAr => "description_ar",
            MovieField::ImdbUrl => "imdb_url",
            MovieField::Duration => "duration",
        }
    }

    pub fn label(self) -> Label {
        match self {
            MovieField::TitleEn => Label::TitleEn,
            MovieField::TitleAr => Label::TitleAr,
            MovieField::DescriptionEn => Label::DescriptionEn,
            MovieField::DescriptionAr => Label::DescriptionAr,
            MovieField::ImdbUrl => Label::ImdbUrl,
            MovieField::Duration => Label::Duration,
        }
    }

    pub fn arabic(self) -> bool {
        matches!(self, MovieField::TitleAr | MovieField::DescriptionAr)
    }

    pub fn multiline(self) -> bool {
        matches!(self, MovieField::DescriptionEn | MovieField::DescriptionAr)
    }
}

/// A movie as listed by the Store, with enough detail to seed an edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieRecord {
    pub id: RecordId,
    pub draft: MovieDraft,
}

impl MovieRecord {
    pub fn title(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar if !self.draft.title_ar.is_empty() => &self.draft.title_ar,
            _ => &self.draft.title_en,
        }
    }

    /// Case-insensitive match against both titles.
    pub fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.draft.title_en.to_lowercase().contains(needle_lower)
            || self.draft.title_ar.to_lowercase().contains(needle_lower)
    }

    /// Decode a Store movie object. Relations may be sent as id arrays or as
    /// arrays of objects carrying an `id`.
    pub fn from_json(raw: &Value) -> Result<Self> {
        let object = raw
            .as_object()
            .ok_or_else(|| anyhow!("expected a JSON object for a movie"))?;
        let id = object
            .get("id")
            .and_then(json_id)
            .context("movie without a numeric id")?;

        let relations = Relation::ALL
            .iter()
            .map(|rel| {
                let ids: BTreeSet<RecordId> = object
                    .get(rel.key())
                    .and_then(Value::as_array)
                    .map(|items| items.iter().filter_map(relation_id).collect())
                    .unwrap_or_default();
                (*rel, ids)
            })
            .collect();

        let draft = MovieDraft {
            title_en: first_text(object, &["title_en"]),
            title_ar: first_text(object, &["title_ar"]),
            description_en: first_text(object, &["description_en"]),
            description_ar: first_text(object, &["description_ar"]),
            imdb_url: first_text(object, &["imdb_url"]),
            duration: first_text(object, &["duration"]),
            status_id: reference_id(object, "status_id", "status"),
            maturity_id: reference_id(object, "maturity_id", "maturity"),
            featured: object.get("featured").is_some_and(truthy),
            relations,
            poster: None,
            banner: None,
            poster_url: non_empty(first_text(object, &["poster_url", "poster"])),
            banner_url: non_empty(first_text(object, &["banner_url", "banner"])),
        };

        Ok(Self { id, draft })
    }
}

/// Validate the movie form. A poster is mandatory when creating.
pub fn validate_movie(draft: &MovieDraft, creating: bool) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in [MovieField::TitleEn, MovieField::TitleAr] {
        if draft.text(field).trim().is_empty() {
            errors.set(field.key(), FieldError::Required);
        }
    }

    let imdb = draft.imdb_url.trim();
    if !imdb.is_empty() && !is_imdb_title_url(imdb) {
        errors.set(MovieField::ImdbUrl.key(), FieldError::InvalidImdbUrl);
    }

    let duration = draft.duration.trim();
    if duration.is_empty() {
        errors.set(MovieField::Duration.key(), FieldError::Required);
    } else if let Some(err) = validate_integer(duration, 1, 600) {
        errors.set(MovieField::Duration.key(), err);
    }

    if draft.status_id.is_none() {
        errors.set("status_id", FieldError::Required);
    }

    if draft.related(Relation::Languages).next().is_none() {
        errors.set(Relation::Languages.key(), FieldError::SelectAtLeastOne);
    }

    if creating && draft.poster.is_none() {
        errors.set(ImageSlot::Poster.key(), FieldError::Required);
    }

    errors
}

/// Some APIs wrap payloads in `{ "data": ... }`.
pub(crate) fn unwrap_data(raw: &Value) -> &Value {
    raw.get("data").unwrap_or(raw)
}

fn first_text(object: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| object.get(*k))
        .map(json_text)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn relation_id(item: &Value) -> Option<RecordId> {
    match item {
        Value::Object(obj) => obj.get("id").and_then(json_id),
        other => json_id(other),
    }
}

/// Foreign key sent either flat (`status_id`) or nested (`status: {id}`).
fn reference_id(object: &Map<String, Value>, flat: &str, nested: &str) -> Option<RecordId> {
    object
        .get(flat)
        .and_then(json_id)
        .or_else(|| object.get(nested).and_then(relation_id))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => matches!(s.as_str(), "1" | "true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_draft() -> MovieDraft {
        let mut draft = MovieDraft {
            title_en: "The Message".into(),
            title_ar: "الرسالة".into(),
            duration: "177".into(),
            status_id: Some(1),
            poster: Some(PathBuf::from("poster.png")),
            ..Default::default()
        };
        draft.toggle_related(Relation::Languages, 2);
        draft
    }

    #[test]
    fn from_json_accepts_nested_and_flat_relations() {
        let raw = json!({
            "id": 3,
            "title_en": "Wadjda",
            "title_ar": "وجدة",
            "duration": 98,
            "featured": 1,
            "status": {"id": 4, "name_en": "Released"},
            "maturity_id": "2",
            "genres": [{"id": 1}, {"id": 5}],
            "languages": [7],
            "poster_url": "https://cdn.example/p.jpg"
        });

        let movie = MovieRecord::from_json(&raw).unwrap();

        assert_eq!(movie.id, 3);
        assert_eq!(movie.draft.duration, "98");
        assert!(movie.draft.featured);
        assert_eq!(movie.draft.status_id, Some(4));
        assert_eq!(movie.draft.maturity_id, Some(2));
        assert!(movie.draft.is_related(Relation::Genres, 5));
        assert!(movie.draft.is_related(Relation::Languages, 7));
        assert_eq!(movie.draft.related(Relation::Actors).count(), 0);
        assert_eq!(movie.draft.poster_url.as_deref(), Some("https://cdn.example/p.jpg"));
    }

    #[test]
    fn options_accept_wrapped_payload_and_maturity_names() {
        let raw = json!({"data": {
            "genres": [{"id": 1, "name_en": "Drama", "name_ar": "دراما"}],
            "maturities": [{"id": 9, "maturity_rating": "PG-13"}],
            "languages": [{"id": 2, "name_en": "Arabic", "name_ar": "العربية"}]
        }});

        let options = MovieOptions::from_json(&raw).unwrap();

        assert_eq!(options.genres[0].name(Locale::Ar), "دراما");
        assert_eq!(options.maturities[0].name(Locale::Ar), "PG-13");
        assert_eq!(options.for_relation(Relation::Subtitles).len(), 1);
        assert!(options.actors.is_empty());
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_movie(&valid_draft(), true).is_empty());
    }

    #[test]
    fn validation_flags_languages_duration_and_imdb() {
        let mut draft = valid_draft();
        draft.toggle_related(Relation::Languages, 2);
        draft.duration = "abc".into();
        draft.imdb_url = "https://www.imdb.com/name/nm1".into();

        let errors = validate_movie(&draft, false);

        assert_eq!(errors.get("languages"), Some(&FieldError::SelectAtLeastOne));
        assert_eq!(errors.get("duration"), Some(&FieldError::InvalidInteger));
        assert_eq!(errors.get("imdb_url"), Some(&FieldError::InvalidImdbUrl));
    }

    #[test]
    fn poster_is_only_required_when_creating() {
        let mut draft = valid_draft();
        draft.poster = None;

        assert_eq!(
            validate_movie(&draft, true).get("poster"),
            Some(&FieldError::Required)
        );
        assert!(validate_movie(&draft, false).is_empty());
    }
}
