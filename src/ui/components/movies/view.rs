// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

use eframe::egui;
use egui_phosphor::regular as icons;

use super::{MovieForm, MoviesModel, MoviesMsg, image_rule};
use crate::i18n::{Label, Locale};
use crate::logic::pagination::PAGE_SIZES;
use crate::models::movie::{ImageSlot, MovieField, MovieOptions, MovieRecord, OptionItem, Relation};
use crate::models::record::RecordId;
use crate::ui::components::widgets::{
    error_label, muted, row_layout, toggle_switch, validated_input,
};

const PREVIEW_HEIGHT: f32 = 140.0;

#[derive(Clone, Copy)]
enum Column {
    Select,
    Id,
    Title,
    Duration,
    Status,
    Featured,
    Actions,
}

fn columns(locale: Locale) -> Vec<Column> {
    let mut cols = vec![
        Column::Select,
        Column::Id,
        Column::Title,
        Column::Duration,
        Column::Status,
        Column::Featured,
        Column::Actions,
    ];
    if locale.is_rtl() {
        cols.reverse();
    }
    cols
}

/// Render the movie table (and the form window when open).
pub fn view(ui: &mut egui::Ui, model: &MoviesModel, locale: Locale) -> Vec<MoviesMsg> {
    let mut msgs = Vec::new();

    render_toolbar(ui, model, locale, &mut msgs);
    ui.add_space(6.0);
    render_table(ui, model, locale, &mut msgs);
    ui.add_space(6.0);
    render_footer(ui, model, locale, &mut msgs);

    if let Some(form) = model.form() {
        render_form(ui.ctx(), model, form, locale, &mut msgs);
    }
    render_confirm(ui.ctx(), model, locale, &mut msgs);
    msgs
}

fn render_toolbar(ui: &mut egui::Ui, model: &MoviesModel, locale: Locale, msgs: &mut Vec<MoviesMsg>) {
    ui.with_layout(row_layout(locale), |ui| {
        if ui
            .button(format!("{} {}", icons::PLUS, Label::NewMovie.text(locale)))
            .clicked()
        {
            msgs.push(MoviesMsg::NewMovie);
        }
        ui.separator();

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
            msgs.push(MoviesMsg::SearchChanged(search));
        }

        let refresh = egui::Button::new(format!("{} {}", icons::ARROW_CLOCKWISE, Label::Refresh.text(locale)));
        if ui.add_enabled(!model.is_loading(), refresh).clicked() {
            msgs.push(MoviesMsg::Refresh);
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
            msgs.push(MoviesMsg::RequestDeleteSelected);
        }

        if model.is_loading() || model.is_batch_deleting() {
            ui.add(egui::Spinner::new().size(14.0));
        }
    });
}

fn render_table(ui: &mut egui::Ui, model: &MoviesModel, locale: Locale, msgs: &mut Vec<MoviesMsg>) {
    if !model.is_loaded() {
        ui.label(muted(Label::Loading.text(locale)).italics());
        return;
    }
    let page = model.visible_rows();
    if page.rows.is_empty() {
        ui.label(muted(Label::NoRecords.text(locale)).italics());
        return;
    }

    let page_ids: Vec<RecordId> = page.rows.iter().map(|m| m.id).collect();
    let cols = columns(locale);

    egui::ScrollArea::horizontal().id_salt("movies_table").show(ui, |ui| {
        egui::Grid::new("movies")
            .num_columns(cols.len())
            .striped(true)
            .spacing(egui::vec2(12.0, 6.0))
            .show(ui, |ui| {
                for col in &cols {
                    let caption = match col {
                        Column::Select => {
                            let mut all = model.selection().covers(&page_ids);
                            if ui
                                .checkbox(&mut all, "")
                                .on_hover_text(Label::SelectAllOnPage.text(locale))
                                .clicked()
                            {
                                msgs.push(MoviesMsg::ToggleSelectAllOnPage);
                            }
                            continue;
                        }
                        Column::Id => "ID",
                        Column::Title => match locale {
                            Locale::En => Label::TitleEn.text(locale),
                            Locale::Ar => Label::TitleAr.text(locale),
                        },
                        Column::Duration => Label::Duration.text(locale),
                        Column::Status => Label::Status.text(locale),
                        Column::Featured => Label::Featured.text(locale),
                        Column::Actions => "",
                    };
                    ui.label(egui::RichText::new(caption).strong());
                }
                ui.end_row();

                for movie in &page.rows {
                    render_row(ui, model, movie, &cols, locale, msgs);
                    ui.end_row();
                }
            });
    });
}

fn render_row(
    ui: &mut egui::Ui,
    model: &MoviesModel,
    movie: &MovieRecord,
    cols: &[Column],
    locale: Locale,
    msgs: &mut Vec<MoviesMsg>,
) {
    for col in cols {
        match col {
            Column::Select => {
                let mut checked = model.selection().contains(movie.id);
                if ui.checkbox(&mut checked, "").clicked() {
                    msgs.push(MoviesMsg::ToggleSelection(movie.id));
                }
            }
            Column::Id => {
                ui.label(muted(movie.id.to_string()));
            }
            Column::Title => {
                ui.label(movie.title(locale));
            }
            Column::Duration => {
                ui.label(&movie.draft.duration);
            }
            Column::Status => {
                ui.label(model.status_name(movie.draft.status_id, locale));
            }
            Column::Featured => {
                if movie.draft.featured {
                    ui.label(icons::STAR);
                } else {
                    ui.label("");
                }
            }
            Column::Actions => {
                ui.with_layout(row_layout(locale), |ui| {
                    if ui
                        .button(icons::PENCIL_SIMPLE)
                        .on_hover_text(Label::Edit.text(locale))
                        .clicked()
                    {
                        msgs.push(MoviesMsg::EditMovie(movie.id));
                    }
                    let deleting = model.is_deleting(movie.id);
                    if ui
                        .add_enabled(!deleting, egui::Button::new(icons::TRASH_SIMPLE))
                        .on_hover_text(Label::Delete.text(locale))
                        .clicked()
                    {
                        msgs.push(MoviesMsg::RequestDelete(movie.id));
                    }
                    if deleting {
                        ui.add(egui::Spinner::new().size(12.0));
                    }
                });
            }
        }
    }
}

fn render_footer(ui: &mut egui::Ui, model: &MoviesModel, locale: Locale, msgs: &mut Vec<MoviesMsg>) {
    let page = model.visible_rows();
    let view = model.view_state();

    ui.with_layout(row_layout(locale), |ui| {
        ui.label(muted(Label::PageSize.text(locale)));
        let mut size = view.page_size;
        egui::ComboBox::from_id_salt("movies_page_size")
            .selected_text(size.to_string())
            .width(60.0)
            .show_ui(ui, |ui| {
                for option in PAGE_SIZES {
                    ui.selectable_value(&mut size, option, option.to_string());
                }
            });
        if size != view.page_size {
            msgs.push(MoviesMsg::PageSizeChanged(size));
        }

        ui.separator();
        let (back, forward) = if locale.is_rtl() {
            (icons::CARET_RIGHT, icons::CARET_LEFT)
        } else {
            (icons::CARET_LEFT, icons::CARET_RIGHT)
        };
        if ui.add_enabled(view.page > 1, egui::Button::new(back)).clicked() {
            msgs.push(MoviesMsg::PageChanged(view.page - 1));
        }
        ui.label(format!("{} / {}  ({})", view.page, page.total_pages.max(1), page.total));
        if ui
            .add_enabled(view.page < page.total_pages, egui::Button::new(forward))
            .clicked()
        {
            msgs.push(MoviesMsg::PageChanged(view.page + 1));
        }
    });
}

fn render_form(
    ctx: &egui::Context,
    model: &MoviesModel,
    form: &MovieForm,
    locale: Locale,
    msgs: &mut Vec<MoviesMsg>,
) {
    let title = match form.editing {
        Some(id) => format!("{} #{id}", Label::Edit.text(locale)),
        None => Label::NewMovie.text(locale).to_string(),
    };
    let mut open = true;
    egui::Window::new(title)
        .id(egui::Id::new("movie_form"))
        .open(&mut open)
        .collapsible(false)
        .default_width(640.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(560.0).show(ui, |ui| {
                ui.add_enabled_ui(!form.saving, |ui| {
                    render_text_fields(ui, form, locale, msgs);
                    ui.add_space(6.0);
                    render_choices(ui, model.options(), form, locale, msgs);
                    if model.is_options_loading() {
                        ui.add(egui::Spinner::new().size(14.0));
                    }
                    ui.add_space(6.0);
                    for slot in [ImageSlot::Poster, ImageSlot::Banner] {
                        render_image_slot(ui, form, slot, locale, msgs);
                    }
                });
            });

            ui.separator();
            ui.with_layout(row_layout(locale), |ui| {
                let save = egui::Button::new(format!("{} {}", icons::FLOPPY_DISK, Label::Save.text(locale)));
                if ui.add_enabled(!form.saving, save).clicked() {
                    msgs.push(MoviesMsg::Submit);
                }
                if ui.button(Label::Cancel.text(locale)).clicked() {
                    msgs.push(MoviesMsg::CloseForm);
                }
                if form.saving {
                    ui.add(egui::Spinner::new().size(14.0));
                }
            });
        });
    if !open {
        msgs.push(MoviesMsg::CloseForm);
    }
}

fn render_text_fields(ui: &mut egui::Ui, form: &MovieForm, locale: Locale, msgs: &mut Vec<MoviesMsg>) {
    for field in MovieField::ALL {
        let required = matches!(
            field,
            MovieField::TitleEn | MovieField::TitleAr | MovieField::Duration
        );
        let caption = field.label().text(locale);
        ui.label(muted(if required {
            format!("{caption} *")
        } else {
            caption.to_string()
        }));
        let width = if field == MovieField::Duration { 80.0 } else { 560.0 };
        if let Some(value) = validated_input(
            ui,
            form.draft.text(field),
            form.errors.get(field.key()),
            locale,
            field.arabic(),
            field.multiline(),
            width,
        ) {
            msgs.push(MoviesMsg::FieldChanged { field, value });
        }
    }
}

fn render_choices(
    ui: &mut egui::Ui,
    options: Option<&MovieOptions>,
    form: &MovieForm,
    locale: Locale,
    msgs: &mut Vec<MoviesMsg>,
) {
    let empty = MovieOptions::default();
    let options = options.unwrap_or(&empty);

    ui.with_layout(row_layout(locale), |ui| {
        ui.label(muted(format!("{} *", Label::Status.text(locale))));
        if let Some(id) = single_choice(ui, "movie_status", &options.statuses, form.draft.status_id, locale) {
            msgs.push(MoviesMsg::StatusChosen(id));
        }
        ui.label(muted(Label::MaturityRating.text(locale)));
        if let Some(id) =
            single_choice(ui, "movie_maturity", &options.maturities, form.draft.maturity_id, locale)
        {
            msgs.push(MoviesMsg::MaturityChosen(id));
        }
        ui.label(muted(Label::Featured.text(locale)));
        let mut featured = form.draft.featured;
        if toggle_switch(ui, &mut featured, locale).changed() {
            msgs.push(MoviesMsg::FeaturedToggled(featured));
        }
    });
    if let Some(error) = form.errors.get("status_id") {
        error_label(ui, error, locale);
    }

    for relation in Relation::ALL {
        let items = options.for_relation(relation);
        let chosen = form.draft.related(relation).count();
        let caption = if relation == Relation::Languages {
            format!("{} * ({chosen})", relation.label().text(locale))
        } else {
            format!("{} ({chosen})", relation.label().text(locale))
        };
        egui::CollapsingHeader::new(caption)
            .id_salt(("relation", relation.key()))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for item in items {
                        let mut on = form.draft.is_related(relation, item.id);
                        if ui.checkbox(&mut on, item.name(locale)).changed() {
                            msgs.push(MoviesMsg::RelationToggled {
                                relation,
                                id: item.id,
                            });
                        }
                    }
                });
            });
        if let Some(error) = form.errors.get(relation.key()) {
            error_label(ui, error, locale);
        }
    }
}

/// Combo box over lookup items; returns the new choice when it changed.
fn single_choice(
    ui: &mut egui::Ui,
    id_salt: &str,
    items: &[OptionItem],
    current: Option<RecordId>,
    locale: Locale,
) -> Option<Option<RecordId>> {
    let caption = current
        .and_then(|id| items.iter().find(|i| i.id == id))
        .map(|i| i.name(locale).to_string())
        .unwrap_or_else(|| Label::NoneSelected.text(locale).to_string());
    let mut chosen = current;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(caption)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut chosen, None, Label::NoneSelected.text(locale));
            for item in items {
                ui.selectable_value(&mut chosen, Some(item.id), item.name(locale));
            }
        });
    (chosen != current).then_some(chosen)
}

fn render_image_slot(
    ui: &mut egui::Ui,
    form: &MovieForm,
    slot: ImageSlot,
    locale: Locale,
    msgs: &mut Vec<MoviesMsg>,
) {
    let rule = image_rule(slot);
    let label = match slot {
        ImageSlot::Poster => Label::Poster,
        ImageSlot::Banner => Label::Banner,
    };
    let required = slot == ImageSlot::Poster && form.is_creating();
    let heights = if rule.min_height == rule.max_height {
        rule.min_height.to_string()
    } else {
        format!("{}–{}", rule.min_height, rule.max_height)
    };

    ui.group(|ui| {
        ui.with_layout(row_layout(locale), |ui| {
            ui.label(egui::RichText::new(format!(
                "{}{}",
                label.text(locale),
                if required { " *" } else { "" }
            )));
            ui.label(muted(format!(
                "{}×{heights} px, ≤ {} KB",
                rule.width,
                rule.max_bytes / 1024
            )));
            let picking = form.picking == Some(slot);
            let choose = egui::Button::new(format!("{} {}", icons::IMAGE, Label::ChooseFile.text(locale)));
            if ui.add_enabled(form.picking.is_none(), choose).clicked() {
                msgs.push(MoviesMsg::PickImage(slot));
            }
            if picking {
                ui.add(egui::Spinner::new().size(12.0));
            }
            if form.draft.image(slot).is_some() && ui.button(icons::X).clicked() {
                msgs.push(MoviesMsg::ClearImage(slot));
            }
        });

        if let Some(path) = form.draft.image(slot) {
            ui.label(muted(path.display().to_string()));
            ui.add(
                egui::Image::new(format!("file://{}", path.display()))
                    .max_height(PREVIEW_HEIGHT)
                    .maintain_aspect_ratio(true),
            );
        } else if let Some(url) = match slot {
            ImageSlot::Poster => form.draft.poster_url.as_deref(),
            ImageSlot::Banner => form.draft.banner_url.as_deref(),
        } {
            ui.hyperlink_to(muted(url), url);
        }
        if let Some(error) = form.errors.get(slot.key()) {
            error_label(ui, error, locale);
        }
    });
}

fn render_confirm(ctx: &egui::Context, model: &MoviesModel, locale: Locale, msgs: &mut Vec<MoviesMsg>) {
    let Some(text) = model.confirm_text(locale) else {
        return;
    };
    egui::Window::new(Label::ConfirmTitle.text(locale))
        .id(egui::Id::new("movies_confirm"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(text.render(locale));
            ui.add_space(8.0);
            ui.with_layout(row_layout(locale), |ui| {
                if ui.button(Label::Yes.text(locale)).clicked() {
                    msgs.push(MoviesMsg::ConfirmAccepted);
                }
                if ui.button(Label::No.text(locale)).clicked() {
                    msgs.push(MoviesMsg::ConfirmDeclined);
                }
            });
        });
}
