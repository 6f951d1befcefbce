// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Small shared widgets: the toggle switch, validated inputs and colour badges.

use eframe::egui;

use crate::i18n::Locale;
use crate::models::field_errors::{FieldError, FieldErrors};

/// Stroke and text colour for invalid fields.
pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 53, 69);

/// Secondary caption text.
pub fn muted(text: impl Into<String>) -> egui::RichText {
    egui::RichText::new(text.into())
        .small()
        .color(egui::Color32::from_gray(120))
}

/// Horizontal layout following the reading direction of `locale`.
pub fn row_layout(locale: Locale) -> egui::Layout {
    if locale.is_rtl() {
        egui::Layout::right_to_left(egui::Align::Center)
    } else {
        egui::Layout::left_to_right(egui::Align::Center)
    }
}

/// Compact on/off switch; the knob travels towards the reading direction.
pub fn toggle_switch(ui: &mut egui::Ui, on: &mut bool, locale: Locale) -> egui::Response {
    let spacing = ui.style().spacing.interact_size;
    let size = egui::vec2(spacing.x.max(32.0), spacing.y.max(18.0));
    let (rect, mut response) = ui.allocate_exact_size(size, egui::Sense::click());
    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let t = ui.ctx().animate_bool(response.id, *on);
        let t = if locale.is_rtl() { 1.0 - t } else { t };
        let visuals = ui.style().interact_selectable(&response, *on);
        let fill = if *on {
            visuals.bg_fill
        } else {
            ui.visuals().widgets.inactive.bg_fill
        };
        ui.painter()
            .rect_filled(rect.expand(visuals.expansion), rect.height() * 0.5, fill);
        let x = egui::lerp((rect.left() + 8.0)..=(rect.right() - 8.0), t);
        ui.painter().circle(
            egui::pos2(x, rect.center().y),
            6.5,
            visuals.bg_fill,
            visuals.fg_stroke,
        );
    }

    response
}

/// Single- or multi-line text input outlined in red when `error` is set.
///
/// Returns the new text when the user changed it. Arabic inputs are
/// right-aligned regardless of the UI locale.
pub fn validated_input(
    ui: &mut egui::Ui,
    value: &str,
    error: Option<&FieldError>,
    locale: Locale,
    arabic: bool,
    multiline: bool,
    width: f32,
) -> Option<String> {
    let mut text = value.to_string();
    let align = if arabic {
        egui::Align::RIGHT
    } else {
        egui::Align::LEFT
    };
    let stroke = match error {
        Some(_) => egui::Stroke::new(1.5, ERROR_COLOR),
        None => egui::Stroke::NONE,
    };

    let mut changed = false;
    ui.vertical(|ui| {
        egui::Frame::new()
            .stroke(stroke)
            .corner_radius(3.0)
            .inner_margin(1.0)
            .show(ui, |ui| {
                let edit = if multiline {
                    egui::TextEdit::multiline(&mut text).desired_rows(3)
                } else {
                    egui::TextEdit::singleline(&mut text)
                };
                changed = ui
                    .add(edit.desired_width(width).horizontal_align(align))
                    .changed();
            });
        if let Some(error) = error {
            error_label(ui, error, locale);
        }
    });

    changed.then_some(text)
}

/// Inline localized error under a field.
pub fn error_label(ui: &mut egui::Ui, error: &FieldError, locale: Locale) {
    ui.label(
        egui::RichText::new(error.render(locale))
            .small()
            .color(ERROR_COLOR),
    );
}

/// Row-level failure (not tied to a field), if any.
pub fn row_error(ui: &mut egui::Ui, errors: Option<&FieldErrors>, locale: Locale) {
    if let Some(general) = errors.and_then(FieldErrors::general) {
        error_label(ui, general, locale);
    }
}

/// Parse `#RRGGBB`.
pub fn parse_hex_color(value: &str) -> Option<egui::Color32> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(egui::Color32::from_rgb(
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
    ))
}

/// Pill showing `text` on the badge colour, with readable foreground.
pub fn color_badge(ui: &mut egui::Ui, hex: &str, text: &str) {
    let Some(fill) = parse_hex_color(hex) else {
        ui.label(text);
        return;
    };
    let luminance = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    let fg = if luminance > 150.0 {
        egui::Color32::BLACK
    } else {
        egui::Color32::WHITE
    };
    egui::Frame::new()
        .fill(fill)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(fg).small());
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_case_insensitively() {
        assert_eq!(
            parse_hex_color("#1e90FF"),
            Some(egui::Color32::from_rgb(0x1E, 0x90, 0xFF))
        );
        assert_eq!(parse_hex_color("1E90FF"), None);
        assert_eq!(parse_hex_color("#1E90F"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn rtl_rows_run_right_to_left() {
        assert_eq!(row_layout(Locale::Ar).main_dir, egui::Direction::RightToLeft);
        assert_eq!(row_layout(Locale::En).main_dir, egui::Direction::LeftToRight);
    }
}
