// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the catalog console.
//! Handles layout, section navigation, preferences, and the worker pool.

pub mod components;

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui_phosphor::regular as icons;
use time::OffsetDateTime;

use crate::i18n::Label;
use crate::logic::export::{ensure_extension, suggested_export_name};
use crate::models::resource::Resource;
use crate::mvu::{self, AppModel, Command, Msg, Section};
use crate::settings::{SettingsEvent, SettingsHub, ThemeChoice};
use crate::store::RecordStore;
use crate::ui::components::widgets::row_layout;
use crate::ui::components::{bulk_editor, movies};

/// Batch requests should overlap even on small machines.
const MIN_WORKERS: usize = 4;

/// Stateful egui application driving the MVU kernel.
pub struct CineDeskApp {
    model: AppModel,
    inbox: Vec<Msg>,
    settings: SettingsHub,
    settings_rx: Receiver<SettingsEvent>,
    cmd_tx: Sender<Command>,
    msg_rx: Receiver<Msg>,
    applied_theme: Option<ThemeChoice>,
}

impl CineDeskApp {
    pub fn new(mut settings: SettingsHub, store: Arc<dyn RecordStore>) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(MIN_WORKERS))
            .unwrap_or(MIN_WORKERS);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(store.as_ref(), cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }
        tracing::info!(threads, "worker pool started");

        let settings_rx = settings.subscribe();
        let model = AppModel::new(settings.settings());
        let inbox = vec![Msg::SectionSelected(model.section)];

        Self {
            model,
            inbox,
            settings,
            settings_rx,
            cmd_tx,
            msg_rx,
            applied_theme: None,
        }
    }
}

impl eframe::App for CineDeskApp {
    // eframe 0.34 requires `ui`; rendering still happens in `update`, which eframe calls first.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);

        while let Ok(event) = self.settings_rx.try_recv() {
            self.inbox.push(Msg::Settings(event));
        }
        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
        self.apply_theme(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_top_bar(ui);
            ui.add_space(4.0);
            self.render_section_tabs(ui);
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| self.render_status(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            let locale = self.model.locale;
            ui.with_layout(row_layout(locale), |ui| {
                ui.heading(self.model.section.title().text(locale));
            });
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| match self.model.section {
                Section::Resource(resource) => {
                    if let Some(editor) = self.model.editor(resource) {
                        let msgs = bulk_editor::view(ui, editor, locale);
                        self.inbox
                            .extend(msgs.into_iter().map(|m| Msg::Editor(resource, m)));
                    }
                }
                Section::Movies => {
                    let msgs = movies::view(ui, &self.model.movies, locale);
                    self.inbox.extend(msgs.into_iter().map(Msg::Movies));
                }
            });
        });

        // Keep polling while workers are busy so completions show up promptly.
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

impl CineDeskApp {
    fn ensure_style(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.model.theme) {
            return;
        }
        let preference = match self.model.theme {
            ThemeChoice::System => egui::ThemePreference::System,
            ThemeChoice::Light => egui::ThemePreference::Light,
            ThemeChoice::Dark => egui::ThemePreference::Dark,
        };
        ctx.set_theme(preference);
        self.applied_theme = Some(self.model.theme);
    }

    /// Title, language switch, theme picker and export button.
    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        let locale = self.model.locale;
        ui.with_layout(row_layout(locale), |ui| {
            ui.heading(Label::AppTitle.text(locale));
            ui.separator();

            if ui
                .button(format!("{} {}", icons::TRANSLATE, Label::SwitchLanguage.text(locale)))
                .clicked()
            {
                self.settings.set_locale(locale.toggled());
            }

            let mut theme = self.model.theme;
            egui::ComboBox::from_id_salt("theme")
                .selected_text(format!("{} {}", icons::PALETTE, theme.label().text(locale)))
                .show_ui(ui, |ui| {
                    for choice in ThemeChoice::ALL {
                        ui.selectable_value(&mut theme, choice, choice.label().text(locale));
                    }
                });
            if theme != self.model.theme {
                self.settings.set_theme(theme);
            }

            ui.separator();
            self.render_export_button(ui);
        });
    }

    fn render_section_tabs(&mut self, ui: &mut egui::Ui) {
        let locale = self.model.locale;
        let sections = Resource::ALL
            .iter()
            .map(|r| Section::Resource(*r))
            .chain(std::iter::once(Section::Movies));
        ui.with_layout(row_layout(locale), |ui| {
            for section in sections {
                let selected = self.model.section == section;
                if ui
                    .selectable_label(selected, section.title().text(locale))
                    .clicked()
                    && !selected
                {
                    self.inbox.push(Msg::SectionSelected(section));
                }
            }
        });
    }

    /// Ask for a target file and queue the export of the current section.
    fn render_export_button(&mut self, ui: &mut egui::Ui) {
        let locale = self.model.locale;
        let button = egui::Button::new(format!(
            "{} {}",
            icons::FILE_XLS,
            Label::Export.text(locale)
        ));
        if ui.add(button).clicked() {
            let default_name =
                suggested_export_name(self.model.section.slug(), OffsetDateTime::now_utc());
            let dialog = rfd::FileDialog::new()
                .set_title(Label::Export.text(locale))
                .add_filter("Excel workbook", &["xlsx"])
                .set_file_name(&default_name);

            if let Some(path) = dialog.save_file() {
                self.inbox
                    .push(Msg::ExportRequested(ensure_extension(path, "xlsx")));
            } else {
                self.inbox.push(Msg::ExportCancelled);
            }
        }
    }

    /// Render a simple modal window for error notices.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        let locale = self.model.locale;
        if let Some(text) = self.model.error.clone() {
            egui::Window::new(Label::ErrorTitle.text(locale))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(text.render(locale));
                    ui.add_space(8.0);
                    if ui.button(Label::Ok.text(locale)).clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status notice and the background task counter.
    fn render_status(&self, ui: &mut egui::Ui) {
        let locale = self.model.locale;
        let pending = self.model.pending_commands;
        ui.with_layout(row_layout(locale), |ui| {
            if let Some(text) = &self.model.status {
                ui.label(
                    egui::RichText::new(text.render(locale)).color(egui::Color32::from_gray(68)),
                );
            }
            if pending > 0 {
                ui.add(egui::Spinner::new().size(14.0))
                    .on_hover_text(format!("{pending} {}", Label::Working.text(locale)));
            }
        });
    }
}
