// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod app;
mod i18n;
mod logic;
mod models;
mod mvu;
mod settings;
mod store;
mod ui;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::settings::{DEFAULT_API_URL, SettingsHub};
use crate::store::HttpStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = SettingsHub::load();
    let store = match HttpStore::new(settings.api_base_url()) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "invalid Store URL, using the default");
            HttpStore::new(DEFAULT_API_URL).context("default Store URL is invalid")?
        }
    };
    tracing::info!(base = %store.base_url(), "using record store");

    app::run(settings, Arc::new(store)).map_err(|err| anyhow::anyhow!("ui failed: {err}"))
}
