// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Table-driven descriptions of the simple catalog resources.
//!
//! One [`ResourceSchema`] per Store endpoint drives the generic bulk editor:
//! which fields a row has, how each is validated and encoded, and which
//! fields participate in search.

use crate::i18n::{Label, Locale};
use crate::models::record::Record;

/// Simple resources edited through the bulk row editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Actors,
    Directors,
    Genres,
    Languages,
    Maturity,
    Statuses,
    Ratings,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Actors,
        Resource::Directors,
        Resource::Genres,
        Resource::Languages,
        Resource::Maturity,
        Resource::Statuses,
        Resource::Ratings,
    ];

    pub fn schema(self) -> &'static ResourceSchema {
        match self {
            Resource::Actors => &ACTORS,
            Resource::Directors => &DIRECTORS,
            Resource::Genres => &GENRES,
            Resource::Languages => &LANGUAGES,
            Resource::Maturity => &MATURITY,
            Resource::Statuses => &STATUSES,
            Resource::Ratings => &RATINGS,
        }
    }
}

/// How a field is entered, validated, and sent to the Store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Whole number within an inclusive range; sent as a JSON number.
    Integer { min: i64, max: i64 },
    /// `#RRGGBB` badge colour.
    Color,
}

#[derive(Debug)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: Label,
    pub kind: FieldKind,
    pub required: bool,
    /// Initial value for a fresh draft.
    pub default: &'static str,
    /// Arabic input; rendered right-to-left regardless of UI locale.
    pub arabic: bool,
}

#[derive(Debug)]
pub struct ResourceSchema {
    pub resource: Resource,
    /// Path segment under the Store base URL.
    pub endpoint: &'static str,
    pub title: Label,
    pub fields: &'static [FieldSpec],
    /// Fields matched (logical OR) by the search box.
    pub search_fields: &'static [&'static str],
}

impl ResourceSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Human-facing name of a record, preferring the Arabic name under `ar`.
    pub fn display_name(&self, record: &Record, locale: Locale) -> String {
        let preferred = match locale {
            Locale::Ar if self.field("name_ar").is_some() => "name_ar",
            _ => self.search_fields.first().copied().unwrap_or("name_en"),
        };
        let name = record.value(preferred);
        if name.trim().is_empty() {
            format!("#{}", record.id)
        } else {
            name.to_string()
        }
    }

    /// Case-insensitive substring match over the configured search fields.
    pub fn matches(&self, record: &Record, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self
                .search_fields
                .iter()
                .any(|f| record.value(f).to_lowercase().contains(needle_lower))
    }
}

const NAME_EN: FieldSpec = FieldSpec {
    key: "name_en",
    label: Label::NameEn,
    kind: FieldKind::Text,
    required: true,
    default: "",
    arabic: false,
};

const NAME_AR: FieldSpec = FieldSpec {
    key: "name_ar",
    label: Label::NameAr,
    kind: FieldKind::Text,
    required: true,
    default: "",
    arabic: true,
};

const MATURITY_RATING: FieldSpec = FieldSpec {
    key: "maturity_rating",
    label: Label::MaturityRating,
    kind: FieldKind::Text,
    required: true,
    default: "",
    arabic: false,
};

const NAME_PAIR: [FieldSpec; 2] = [NAME_EN, NAME_AR];
const NAME_SEARCH: [&str; 2] = ["name_en", "name_ar"];

static ACTORS: ResourceSchema = ResourceSchema {
    resource: Resource::Actors,
    endpoint: "actors",
    title: Label::Actors,
    fields: &NAME_PAIR,
    search_fields: &NAME_SEARCH,
};

static DIRECTORS: ResourceSchema = ResourceSchema {
    resource: Resource::Directors,
    endpoint: "directors",
    title: Label::Directors,
    fields: &NAME_PAIR,
    search_fields: &NAME_SEARCH,
};

static GENRES: ResourceSchema = ResourceSchema {
    resource: Resource::Genres,
    endpoint: "genres",
    title: Label::Genres,
    fields: &NAME_PAIR,
    search_fields: &NAME_SEARCH,
};

static STATUSES: ResourceSchema = ResourceSchema {
    resource: Resource::Statuses,
    endpoint: "status",
    title: Label::Statuses,
    fields: &NAME_PAIR,
    search_fields: &NAME_SEARCH,
};

static LANGUAGES: ResourceSchema = ResourceSchema {
    resource: Resource::Languages,
    endpoint: "languages",
    title: Label::Languages,
    fields: &[
        NAME_EN,
        NAME_AR,
        FieldSpec {
            key: "color",
            label: Label::BadgeColor,
            kind: FieldKind::Color,
            required: false,
            default: "#3366CC",
            arabic: false,
        },
    ],
    search_fields: &NAME_SEARCH,
};

static MATURITY: ResourceSchema = ResourceSchema {
    resource: Resource::Maturity,
    endpoint: "maturity",
    title: Label::Maturity,
    fields: &[MATURITY_RATING],
    search_fields: &["maturity_rating"],
};

static RATINGS: ResourceSchema = ResourceSchema {
    resource: Resource::Ratings,
    endpoint: "ratings",
    title: Label::Ratings,
    fields: &[
        NAME_EN,
        NAME_AR,
        FieldSpec {
            key: "ranking",
            label: Label::Ranking,
            kind: FieldKind::Integer { min: 1, max: 100 },
            required: true,
            default: "",
            arabic: false,
        },
        MATURITY_RATING,
    ],
    search_fields: &NAME_SEARCH,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_points_back_to_its_resource() {
        for resource in Resource::ALL {
            let schema = resource.schema();
            assert_eq!(schema.resource, resource);
            assert!(!schema.fields.is_empty());
            for key in schema.search_fields {
                assert!(schema.field(key).is_some(), "{key} missing in {resource:?}");
            }
        }
    }

    #[test]
    fn search_is_case_insensitive_across_name_fields() {
        let schema = Resource::Genres.schema();
        let record = Record::with_values(1, &[("name_en", "Science Fiction"), ("name_ar", "خيال علمي")]);

        assert!(schema.matches(&record, "fiction"));
        assert!(schema.matches(&record, "علمي"));
        assert!(!schema.matches(&record, "drama"));
    }

    #[test]
    fn display_name_prefers_arabic_under_arabic_locale() {
        let schema = Resource::Actors.schema();
        let record = Record::with_values(7, &[("name_en", "Omar"), ("name_ar", "عمر")]);

        assert_eq!(schema.display_name(&record, Locale::En), "Omar");
        assert_eq!(schema.display_name(&record, Locale::Ar), "عمر");
        let blank = Record::with_values(9, &[]);
        assert_eq!(schema.display_name(&blank, Locale::En), "#9");
    }
}
