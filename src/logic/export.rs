// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Spreadsheet export of a resource collection.
//!
//! Writes a minimal Office Open XML workbook (`.xlsx`): one worksheet with a
//! header row and inline-string cells, packaged as a ZIP container.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::macros::format_description;
use zip::{CompressionMethod, write::FileOptions};

use crate::utils::sanitize_component;

/// Captured rows ready to be written off the UI thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetPayload {
    pub output: PathBuf,
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Suggest a file name such as `genres_20250102_0930.xlsx`.
pub fn suggested_export_name(resource: &str, now: OffsetDateTime) -> String {
    let base = sanitize_component(resource).to_ascii_lowercase();
    let stamp = now
        .format(format_description!("[year][month][day]_[hour][minute]"))
        .unwrap_or_default();
    if stamp.is_empty() {
        format!("{base}.xlsx")
    } else {
        format!("{base}_{stamp}.xlsx")
    }
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );
    if replace {
        path.set_extension(extension);
    }
    path
}

/// Write the workbook to `payload.output`.
pub fn write_xlsx(payload: &SheetPayload) -> Result<()> {
    let output = &payload.output;
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create spreadsheet {:?}", output))?;
    let mut zip = zip::ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml(&payload.sheet_name)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(&payload.headers, &payload.rows)),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to add {name} to spreadsheet"))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("Failed to write {name}"))?;
    }

    zip.finish().context("Failed to finalize spreadsheet")?;
    tracing::info!(path = %output.display(), rows = payload.rows.len(), "spreadsheet written");
    Ok(())
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

fn workbook_xml(sheet_name: &str) -> String {
    // Sheet names are limited to 31 characters and may not contain []:*?/\
    let name: String = sheet_name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let name = if name.trim().is_empty() { "Sheet1".to_string() } else { name };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(&name)
    )
}

fn sheet_xml(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, cells) in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)).enumerate() {
        let row_number = r + 1;
        out.push_str(&format!(r#"<row r="{row_number}">"#));
        for (c, value) in cells.iter().enumerate() {
            out.push_str(&format!(
                r#"<c r="{}{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                column_name(c),
                row_number,
                escape_xml(value)
            ));
        }
        out.push_str("</row>");
    }
    out.push_str("</sheetData></worksheet>");
    out
}

/// Zero-based column index to spreadsheet letters (0 -> A, 26 -> AA).
fn column_name(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters are not allowed in XML 1.0.
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}
