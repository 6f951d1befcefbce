// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Local validation rules applied before anything reaches the Store.
//! Everything here is pure except [`probe_image`], which reads the file header.

use std::path::Path;

use anyhow::{Context, Result};
use url::Url;

use crate::models::field_errors::{FieldError, FieldErrors};
use crate::models::record::FieldValues;
use crate::models::resource::{FieldKind, FieldSpec, ResourceSchema};

/// Validate every field of a draft or edit buffer against its schema.
pub fn validate_record(schema: &ResourceSchema, values: &FieldValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for spec in schema.fields {
        let value = values.get(spec.key).map(String::as_str).unwrap_or("");
        if let Some(err) = validate_field(spec, value) {
            errors.set(spec.key, err);
        }
    }
    errors
}

/// Validate one value against its field spec.
///
/// Empty optional fields are always valid; kind-specific checks only run on
/// non-empty input.
pub fn validate_field(spec: &FieldSpec, value: &str) -> Option<FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return spec.required.then_some(FieldError::Required);
    }

    match spec.kind {
        FieldKind::Text => None,
        FieldKind::Integer { min, max } => validate_integer(value, min, max),
        FieldKind::Color => (!is_hex_color(value)).then_some(FieldError::InvalidColor),
    }
}

/// Whole number in `min..=max`.
pub fn validate_integer(value: &str, min: i64, max: i64) -> Option<FieldError> {
    match value.trim().parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => None,
        Ok(_) => Some(FieldError::OutOfRange { min, max }),
        Err(_) => Some(FieldError::InvalidInteger),
    }
}

/// `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// IMDb title link such as `https://www.imdb.com/title/tt0111161/`.
pub fn is_imdb_title_url(value: &str) -> bool {
    let Ok(url) = Url::parse(value.trim()) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    if !matches!(
        url.host_str(),
        Some("imdb.com" | "www.imdb.com" | "m.imdb.com")
    ) {
        return false;
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();
    match segments.as_slice() {
        ["title", id] => id
            .strip_prefix("tt")
            .is_some_and(|digits| {
                (7..=8).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
            }),
        _ => false,
    }
}

/// Pixel and size constraints for an uploaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageRule {
    pub width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub max_bytes: u64,
}

pub const POSTER_RULE: ImageRule = ImageRule {
    width: 500,
    min_height: 700,
    max_height: 800,
    max_bytes: 2 * 1024 * 1024,
};

pub const BANNER_RULE: ImageRule = ImageRule {
    width: 1920,
    min_height: 1080,
    max_height: 1080,
    max_bytes: 5 * 1024 * 1024,
};

/// Decoded dimensions and on-disk size of a candidate image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

/// Read the image header to obtain its pixel dimensions.
pub fn probe_image(path: &Path) -> Result<ImageInfo> {
    let bytes = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat image {:?}", path))?
        .len();
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("Failed to decode image {:?}", path))?;
    Ok(ImageInfo {
        width,
        height,
        bytes,
    })
}

/// Check probed image facts against a rule; size is checked first.
pub fn check_image(rule: &ImageRule, info: &ImageInfo) -> Option<FieldError> {
    if info.bytes > rule.max_bytes {
        return Some(FieldError::ImageTooLarge {
            max_bytes: rule.max_bytes,
        });
    }
    if info.width != rule.width {
        return Some(FieldError::ImageWidth {
            expected: rule.width,
            actual: info.width,
        });
    }
    if !(rule.min_height..=rule.max_height).contains(&info.height) {
        return Some(FieldError::ImageHeight {
            min: rule.min_height,
            max: rule.max_height,
            actual: info.height,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgba};
    use tempfile::TempDir;

    use super::*;
    use crate::models::record::empty_draft;
    use crate::models::resource::Resource;

    #[test]
    fn required_fields_are_reported_per_field() {
        let schema = Resource::Actors.schema();
        let mut draft = empty_draft(schema);
        draft.insert("name_en".into(), "  Omar  ".into());

        let errors = validate_record(schema, &draft);

        assert!(errors.get("name_en").is_none());
        assert_eq!(errors.get("name_ar"), Some(&FieldError::Required));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn ranking_must_be_an_integer_in_range() {
        let schema = Resource::Ratings.schema();
        let spec = schema.field("ranking").unwrap();

        assert_eq!(validate_field(spec, "12"), None);
        assert_eq!(validate_field(spec, "1.5"), Some(FieldError::InvalidInteger));
        assert_eq!(
            validate_field(spec, "0"),
            Some(FieldError::OutOfRange { min: 1, max: 100 })
        );
        assert_eq!(validate_field(spec, ""), Some(FieldError::Required));
    }

    #[test]
    fn optional_color_accepts_empty_and_hex_only() {
        let spec = Resource::Languages.schema().field("color").unwrap();

        assert_eq!(validate_field(spec, ""), None);
        assert_eq!(validate_field(spec, "#1e90FF"), None);
        assert_eq!(validate_field(spec, "blue"), Some(FieldError::InvalidColor));
        assert_eq!(validate_field(spec, "#12345"), Some(FieldError::InvalidColor));
    }

    #[test]
    fn imdb_urls_must_point_at_a_title() {
        assert!(is_imdb_title_url("https://www.imdb.com/title/tt0111161/"));
        assert!(is_imdb_title_url("http://imdb.com/title/tt12345678"));
        assert!(!is_imdb_title_url("https://www.imdb.com/name/nm0000151/"));
        assert!(!is_imdb_title_url("https://example.com/title/tt0111161/"));
        assert!(!is_imdb_title_url("ftp://imdb.com/title/tt0111161"));
        assert!(!is_imdb_title_url("not a url"));
    }

    #[test]
    fn image_rules_check_size_then_width_then_height() {
        let ok = ImageInfo {
            width: 500,
            height: 750,
            bytes: 1024,
        };
        assert_eq!(check_image(&POSTER_RULE, &ok), None);

        let wide = ImageInfo { width: 600, ..ok };
        assert_eq!(
            check_image(&POSTER_RULE, &wide),
            Some(FieldError::ImageWidth {
                expected: 500,
                actual: 600
            })
        );

        let short = ImageInfo { height: 600, ..ok };
        assert!(matches!(
            check_image(&POSTER_RULE, &short),
            Some(FieldError::ImageHeight { actual: 600, .. })
        ));

        let heavy = ImageInfo {
            bytes: 3 * 1024 * 1024,
            ..wide
        };
        assert!(matches!(
            check_image(&POSTER_RULE, &heavy),
            Some(FieldError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn probe_image_reads_dimensions_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("poster.png");
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(20, 28, Rgba([10, 20, 30, 255]));
        img.save(&path).expect("png saved");

        let info = probe_image(&path).unwrap();

        assert_eq!((info.width, info.height), (20, 28));
        assert!(info.bytes > 0);
    }

    #[test]
    fn probe_image_errors_on_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(probe_image(&path).is_err());
    }
}
