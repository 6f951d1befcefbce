// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Rendering of the bulk row editor: draft rows, the record table and its footer.

use eframe::egui;
use egui_phosphor::regular as icons;

use super::{BulkEditorModel, BulkEditorMsg};
use crate::i18n::{Label, Locale};
use crate::logic::pagination::PAGE_SIZES;
use crate::models::field_errors::FieldError;
use crate::models::record::Record;
use crate::models::resource::{FieldKind, FieldSpec};
use crate::ui::components::widgets::{
    color_badge, error_label, muted, parse_hex_color, row_error, row_layout, validated_input,
};

const INPUT_WIDTH: f32 = 170.0;

/// Table columns in reading order.
#[derive(Clone, Copy)]
enum Column {
    Select,
    Id,
    Field(&'static FieldSpec),
    Actions,
}

fn columns(model: &BulkEditorModel, locale: Locale) -> Vec<Column> {
    let mut cols = vec![Column::Select, Column::Id];
    cols.extend(model.schema().fields.iter().map(Column::Field));
    cols.push(Column::Actions);
    if locale.is_rtl() {
        cols.reverse();
    }
    cols
}

/// Render the editor and return the messages triggered by the user.
pub fn view(ui: &mut egui::Ui, model: &BulkEditorModel, locale: Locale) -> Vec<BulkEditorMsg> {
    let mut msgs = Vec::new();

    egui::CollapsingHeader::new(Label::NewEntries.text(locale))
        .id_salt(("drafts", model.schema().endpoint))
        .default_open(true)
        .show(ui, |ui| render_drafts(ui, model, locale, &mut msgs));

    ui.add_space(10.0);
    ui.separator();
    ui.heading(Label::Existing.text(locale));
    ui.add_space(4.0);
    render_toolbar(ui, model, locale, &mut msgs);
    ui.add_space(6.0);
    render_table(ui, model, locale, &mut msgs);
    ui.add_space(6.0);
    render_footer(ui, model, locale, &mut msgs);

    render_confirm(ui.ctx(), model, locale, &mut msgs);
    msgs
}

fn render_drafts(
    ui: &mut egui::Ui,
    model: &BulkEditorModel,
    locale: Locale,
    msgs: &mut Vec<BulkEditorMsg>,
) {
    let locked = model.is_submitting();
    let fields = model.schema().fields;

    for (index, draft) in model.drafts().iter().enumerate() {
        let errors = model.draft_errors().get(index);
        ui.group(|ui| {
            ui.add_enabled_ui(!locked, |ui| {
                ui.with_layout(row_layout(locale), |ui| {
                    ui.label(egui::RichText::new(format!("{}", index + 1)).strong());
                    for spec in fields {
                        ui.vertical(|ui| {
                            ui.label(muted(field_caption(spec, locale)));
                            let value = draft.get(spec.key).map(String::as_str).unwrap_or("");
                            let error = errors.and_then(|e| e.get(spec.key));
                            if let Some(value) = field_input(ui, spec, value, error, locale) {
                                msgs.push(BulkEditorMsg::DraftFieldChanged {
                                    index,
                                    field: spec.key.to_string(),
                                    value,
                                });
                            }
                        });
                    }
                    if ui
                        .button(icons::TRASH_SIMPLE)
                        .on_hover_text(Label::RemoveRow.text(locale))
                        .clicked()
                    {
                        msgs.push(BulkEditorMsg::RemoveDraftRow(index));
                    }
                });
            });
            row_error(ui, errors, locale);
        });
    }

    ui.add_space(6.0);
    ui.with_layout(row_layout(locale), |ui| {
        let add = egui::Button::new(format!("{} {}", icons::PLUS, Label::AddRow.text(locale)));
        if ui.add_enabled(!locked, add).clicked() {
            msgs.push(BulkEditorMsg::AddDraftRow);
        }
        let save = egui::Button::new(format!(
            "{} {}",
            icons::FLOPPY_DISK,
            Label::SaveAll.text(locale)
        ));
        if ui
            .add_enabled(!locked && !model.drafts().is_empty(), save)
            .clicked()
        {
            msgs.push(BulkEditorMsg::SubmitDrafts);
        }
        if locked {
            ui.add(egui::Spinner::new().size(14.0));
        }
    });
}

fn render_toolbar(
    ui: &mut egui::Ui,
    model: &BulkEditorModel,
    locale: Locale,
    msgs: &mut Vec<BulkEditorMsg>,
) {
    ui.with_layout(row_layout(locale), |ui| {
        ui.label(icons::MAGNIFYING_GLASS);
        let mut search = model.view_state().search.clone();
        let align = if locale.is_rtl() {
            egui::Align::RIGHT
        } else {
            egui::Align::LEFT
        };
        if ui
            .add(
                egui::TextEdit::singleline(&mut search)
                    .hint_text(Label::Search.text(locale))
                    .horizontal_align(align)
                    .desired_width(220.0),
            )
            .changed()
        {
            msgs.push(BulkEditorMsg::SearchChanged(search));
        }

        if ui
            .add_enabled(
                !model.is_loading(),
                egui::Button::new(format!(
                    "{} {}",
                    icons::ARROW_CLOCKWISE,
                    Label::Refresh.text(locale)
                )),
            )
            .clicked()
        {
            msgs.push(BulkEditorMsg::Refresh);
        }

        let selected = model.selection().len();
        let delete = egui::Button::new(format!(
            "{} {} ({selected})",
            icons::TRASH,
            Label::DeleteSelected.text(locale)
        ));
        if ui
            .add_enabled(selected > 0 && !model.is_batch_deleting(), delete)
            .clicked()
        {
            msgs.push(BulkEditorMsg::RequestDeleteSelected);
        }

        if model.is_loading() || model.is_batch_deleting() {
            ui.add(egui::Spinner::new().size(14.0));
        }
    });
}

fn render_table(
    ui: &mut egui::Ui,
    model: &BulkEditorModel,
    locale: Locale,
    msgs: &mut Vec<BulkEditorMsg>,
) {
    if !model.is_loaded() {
        ui.label(muted(Label::Loading.text(locale)).italics());
        return;
    }

    let page = model.visible_rows();
    if page.rows.is_empty() {
        ui.label(muted(Label::NoRecords.text(locale)).italics());
        return;
    }

    let page_ids: Vec<_> = page.rows.iter().map(|r| r.id).collect();
    let cols = columns(model, locale);

    egui::ScrollArea::horizontal()
        .id_salt(("table", model.schema().endpoint))
        .show(ui, |ui| {
            egui::Grid::new(("records", model.schema().endpoint))
                .num_columns(cols.len())
                .striped(true)
                .spacing(egui::vec2(12.0, 6.0))
                .show(ui, |ui| {
                    for col in &cols {
                        match col {
                            Column::Select => {
                                let mut all = model.selection().covers(&page_ids);
                                if ui
                                    .checkbox(&mut all, "")
                                    .on_hover_text(Label::SelectAllOnPage.text(locale))
                                    .clicked()
                                {
                                    msgs.push(BulkEditorMsg::ToggleSelectAllOnPage);
                                }
                            }
                            Column::Id => {
                                ui.label(egui::RichText::new("ID").strong());
                            }
                            Column::Field(spec) => {
                                ui.label(egui::RichText::new(field_caption(spec, locale)).strong());
                            }
                            Column::Actions => {
                                ui.label("");
                            }
                        }
                    }
                    ui.end_row();

                    for record in &page.rows {
                        render_row(ui, model, record, &cols, locale, msgs);
                        ui.end_row();
                    }
                });
        });
}

fn render_row(
    ui: &mut egui::Ui,
    model: &BulkEditorModel,
    record: &Record,
    cols: &[Column],
    locale: Locale,
    msgs: &mut Vec<BulkEditorMsg>,
) {
    let editing = model.edit().filter(|e| e.id == record.id);

    for col in cols {
        match col {
            Column::Select => {
                let mut checked = model.selection().contains(record.id);
                if ui.checkbox(&mut checked, "").clicked() {
                    msgs.push(BulkEditorMsg::ToggleSelection(record.id));
                }
            }
            Column::Id => {
                ui.label(muted(record.id.to_string()));
            }
            Column::Field(spec) => match editing {
                Some(edit) => {
                    let value = edit.values.get(spec.key).map(String::as_str).unwrap_or("");
                    let error = edit.errors.get(spec.key);
                    ui.add_enabled_ui(!edit.saving, |ui| {
                        if let Some(value) = field_input(ui, spec, value, error, locale) {
                            msgs.push(BulkEditorMsg::EditFieldChanged {
                                field: spec.key.to_string(),
                                value,
                            });
                        }
                    });
                }
                None => render_value(ui, spec, record),
            },
            Column::Actions => {
                ui.with_layout(row_layout(locale), |ui| match editing {
                    Some(edit) => {
                        if ui
                            .add_enabled(!edit.saving, egui::Button::new(icons::CHECK))
                            .on_hover_text(Label::Save.text(locale))
                            .clicked()
                        {
                            msgs.push(BulkEditorMsg::SubmitEdit);
                        }
                        if ui
                            .button(icons::X)
                            .on_hover_text(Label::Cancel.text(locale))
                            .clicked()
                        {
                            msgs.push(BulkEditorMsg::CancelEdit);
                        }
                        if edit.saving {
                            ui.add(egui::Spinner::new().size(12.0));
                        }
                        if let Some(general) = edit.errors.general() {
                            error_label(ui, general, locale);
                        }
                    }
                    None => {
                        if ui
                            .button(icons::PENCIL_SIMPLE)
                            .on_hover_text(Label::Edit.text(locale))
                            .clicked()
                        {
                            msgs.push(BulkEditorMsg::BeginEdit(record.id));
                        }
                        let deleting = model.is_deleting(record.id);
                        if ui
                            .add_enabled(!deleting, egui::Button::new(icons::TRASH_SIMPLE))
                            .on_hover_text(Label::Delete.text(locale))
                            .clicked()
                        {
                            msgs.push(BulkEditorMsg::RequestDelete(record.id));
                        }
                        if deleting {
                            ui.add(egui::Spinner::new().size(12.0));
                        }
                    }
                });
            }
        }
    }
}

fn render_value(ui: &mut egui::Ui, spec: &FieldSpec, record: &Record) {
    let value = record.value(spec.key);
    match spec.kind {
        FieldKind::Color => color_badge(ui, value, value),
        _ => {
            ui.label(value);
        }
    }
}

fn render_footer(
    ui: &mut egui::Ui,
    model: &BulkEditorModel,
    locale: Locale,
    msgs: &mut Vec<BulkEditorMsg>,
) {
    let page = model.visible_rows();
    let view = model.view_state();

    ui.with_layout(row_layout(locale), |ui| {
        ui.label(muted(Label::PageSize.text(locale)));
        let mut size = view.page_size;
        egui::ComboBox::from_id_salt(("page_size", model.schema().endpoint))
            .selected_text(size.to_string())
            .width(60.0)
            .show_ui(ui, |ui| {
                for option in PAGE_SIZES {
                    ui.selectable_value(&mut size, option, option.to_string());
                }
            });
        if size != view.page_size {
            msgs.push(BulkEditorMsg::PageSizeChanged(size));
        }

        ui.separator();
        // Arrows point along the reading direction.
        let (back, forward) = if locale.is_rtl() {
            (icons::CARET_RIGHT, icons::CARET_LEFT)
        } else {
            (icons::CARET_LEFT, icons::CARET_RIGHT)
        };
        if ui
            .add_enabled(view.page > 1, egui::Button::new(back))
            .on_hover_text(Label::Previous.text(locale))
            .clicked()
        {
            msgs.push(BulkEditorMsg::PageChanged(view.page - 1));
        }
        ui.label(format!(
            "{} / {}  ({})",
            view.page,
            page.total_pages.max(1),
            page.total
        ));
        if ui
            .add_enabled(view.page < page.total_pages, egui::Button::new(forward))
            .on_hover_text(Label::Next.text(locale))
            .clicked()
        {
            msgs.push(BulkEditorMsg::PageChanged(view.page + 1));
        }
    });
}

fn render_confirm(
    ctx: &egui::Context,
    model: &BulkEditorModel,
    locale: Locale,
    msgs: &mut Vec<BulkEditorMsg>,
) {
    let Some(text) = model.confirm_text(locale) else {
        return;
    };
    egui::Window::new(Label::ConfirmTitle.text(locale))
        .id(egui::Id::new(("confirm", model.schema().endpoint)))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(text.render(locale));
            ui.add_space(8.0);
            ui.with_layout(row_layout(locale), |ui| {
                if ui.button(Label::Yes.text(locale)).clicked() {
                    msgs.push(BulkEditorMsg::ConfirmAccepted);
                }
                if ui.button(Label::No.text(locale)).clicked() {
                    msgs.push(BulkEditorMsg::ConfirmDeclined);
                }
            });
        });
}

fn field_caption(spec: &FieldSpec, locale: Locale) -> String {
    let label = spec.label.text(locale);
    if spec.required {
        format!("{label} *")
    } else {
        label.to_string()
    }
}

fn field_input(
    ui: &mut egui::Ui,
    spec: &FieldSpec,
    value: &str,
    error: Option<&FieldError>,
    locale: Locale,
) -> Option<String> {
    match spec.kind {
        FieldKind::Color => {
            let mut changed = None;
            ui.horizontal(|ui| {
                let mut color = parse_hex_color(value)
                    .unwrap_or(egui::Color32::GRAY);
                if ui.color_edit_button_srgba(&mut color).changed() {
                    changed = Some(format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b()));
                }
                if let Some(text) = validated_input(ui, value, error, locale, false, false, 80.0) {
                    changed = Some(text);
                }
            });
            changed
        }
        FieldKind::Integer { .. } => validated_input(ui, value, error, locale, false, false, 70.0),
        FieldKind::Text => validated_input(ui, value, error, locale, spec.arabic, false, INPUT_WIDTH),
    }
}
