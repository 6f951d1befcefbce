// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Filesystem-safe file name stems for exported spreadsheets.

const FALLBACK: &str = "export";

const RESERVED: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Turn a resource title (English or Arabic) into a file name stem.
///
/// Unicode is transliterated with `deunicode` so Arabic titles still yield a
/// readable ASCII stem; anything outside `[A-Za-z0-9-]` becomes a single `_`.
pub fn sanitize_component(value: &str) -> String {
    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len());

    for ch in transliterated.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        return FALLBACK.to_string();
    }
    if RESERVED.contains(&out.to_ascii_uppercase().as_str()) {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::sanitize_component;

    #[test]
    fn spaces_and_punctuation_collapse_to_one_underscore() {
        assert_eq!(sanitize_component("  Maturity / Ratings! "), "Maturity_Ratings");
    }

    #[test]
    fn arabic_titles_are_transliterated() {
        let stem = sanitize_component("الممثلون");
        assert!(!stem.is_empty());
        assert!(stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }

    #[test]
    fn reserved_device_names_get_a_suffix() {
        assert_eq!(sanitize_component("con"), "con_");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(sanitize_component("..."), "export");
        assert_eq!(sanitize_component(""), "export");
    }
}
