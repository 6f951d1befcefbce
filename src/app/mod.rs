// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the console.

use std::sync::Arc;

use eframe::egui;
use egui_phosphor::Variant;

use crate::settings::SettingsHub;
use crate::store::RecordStore;
use crate::ui::CineDeskApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(settings: SettingsHub, store: Arc<dyn RecordStore>) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "cinedesk",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            // Poster/banner previews are loaded from local files.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(CineDeskApp::new(settings, store)))
        }),
    )
}
