// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Process-wide preferences: locale, theme and the Store base URL.
//!
//! [`SettingsHub`] is created once at startup. Mutations go through
//! [`SettingsHub::set_locale`] / [`SettingsHub::set_theme`], which persist the
//! change and notify every subscriber.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::i18n::{Label, Locale};

/// Store base URL used when neither the environment nor the settings file set one.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";
/// Environment variable overriding the Store base URL for this process.
pub const API_URL_ENV: &str = "CINEDESK_API_URL";

const SETTINGS_FILE: &str = "settings.json";

/// Visual theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 3] = [ThemeChoice::System, ThemeChoice::Light, ThemeChoice::Dark];

    pub fn label(self) -> Label {
        match self {
            ThemeChoice::System => Label::ThemeSystem,
            ThemeChoice::Light => Label::ThemeLight,
            ThemeChoice::Dark => Label::ThemeDark,
        }
    }
}

/// Persisted preferences. Unknown or missing keys fall back to defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub locale: Locale,
    pub theme: ThemeChoice,
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            theme: ThemeChoice::System,
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Change notifications delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsEvent {
    LocaleChanged(Locale),
    ThemeChanged(ThemeChoice),
}

/// Owner of the current settings and their subscribers.
pub struct SettingsHub {
    path: Option<PathBuf>,
    settings: Settings,
    api_url_override: Option<String>,
    subscribers: Vec<Sender<SettingsEvent>>,
}

impl SettingsHub {
    /// Read the persisted preferences from the platform config directory,
    /// honouring the `CINEDESK_API_URL` override.
    pub fn load() -> Self {
        let path = ProjectDirs::from("", "cinedesk", "cinedesk")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE));
        if path.is_none() {
            tracing::warn!("no config directory available; preferences will not be saved");
        }
        let mut hub = Self::load_from(path);
        hub.api_url_override = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        hub
    }

    /// Load from an explicit file (or defaults when `None`/unreadable).
    pub fn load_from(path: Option<PathBuf>) -> Self {
        let settings = match path.as_deref() {
            Some(path) if path.exists() => read_settings(path).unwrap_or_else(|err| {
                tracing::warn!(error = %format!("{err:#}"), "ignoring unreadable settings");
                Settings::default()
            }),
            _ => Settings::default(),
        };
        tracing::info!(locale = settings.locale.code(), theme = ?settings.theme, "settings loaded");
        Self {
            path,
            settings,
            api_url_override: None,
            subscribers: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Effective Store base URL (environment override first).
    pub fn api_base_url(&self) -> &str {
        self.api_url_override
            .as_deref()
            .unwrap_or(&self.settings.api_base_url)
    }

    /// Register a new listener for future changes.
    pub fn subscribe(&mut self) -> Receiver<SettingsEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn set_locale(&mut self, locale: Locale) {
        if self.settings.locale == locale {
            return;
        }
        self.settings.locale = locale;
        self.commit(SettingsEvent::LocaleChanged(locale));
    }

    pub fn set_theme(&mut self, theme: ThemeChoice) {
        if self.settings.theme == theme {
            return;
        }
        self.settings.theme = theme;
        self.commit(SettingsEvent::ThemeChanged(theme));
    }

    fn commit(&mut self, event: SettingsEvent) {
        if let Some(path) = &self.path
            && let Err(err) = write_settings(path, &self.settings)
        {
            tracing::warn!(error = %format!("{err:#}"), "failed to persist settings");
        }
        // Drop listeners whose receiver is gone.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid settings file {}", path.display()))
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(path, json).with_context(|| format!("Failed to write settings {}", path.display()))?;
    tracing::debug!(path = %path.display(), "settings saved");
    Ok(())
}
