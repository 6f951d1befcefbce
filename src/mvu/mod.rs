// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::i18n::{Label, Locale, Text};
use crate::logic::export::{SheetPayload, write_xlsx};
use crate::logic::wire::{encode_movie, encode_record};
use crate::models::movie::{MovieOptions, MovieRecord};
use crate::models::record::Record;
use crate::models::resource::Resource;
use crate::models::validation::probe_image;
use crate::settings::{Settings, SettingsEvent, ThemeChoice};
use crate::store::{MOVIES_ENDPOINT, RecordStore, StoreError};
use crate::ui::components::Notice;
use crate::ui::components::bulk_editor::{
    self, BulkEditorCommand, BulkEditorModel, BulkEditorMsg,
};
use crate::ui::components::movies::{self, MoviesCommand, MoviesModel, MoviesMsg};

/// Which table the console is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Resource(Resource),
    Movies,
}

impl Section {
    pub fn title(self) -> Label {
        match self {
            Section::Resource(resource) => resource.schema().title,
            Section::Movies => Label::Movies,
        }
    }

    /// Stem for exported file names.
    pub fn slug(self) -> &'static str {
        match self {
            Section::Resource(resource) => resource.schema().endpoint,
            Section::Movies => MOVIES_ENDPOINT,
        }
    }
}

/// Top-level application state.
pub struct AppModel {
    pub section: Section,
    /// One bulk editor per simple resource.
    pub editors: BTreeMap<Resource, BulkEditorModel>,
    pub movies: MoviesModel,
    pub locale: Locale,
    pub theme: ThemeChoice,
    /// Latest non-error notice, rendered in the current locale.
    pub status: Option<Text>,
    /// Latest error notice, shown in a modal until dismissed.
    pub error: Option<Text>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(settings: &Settings) -> Self {
        Self {
            section: Section::Resource(Resource::Actors),
            editors: Resource::ALL
                .iter()
                .map(|r| (*r, BulkEditorModel::new(r.schema())))
                .collect(),
            movies: MoviesModel::default(),
            locale: settings.locale,
            theme: settings.theme,
            status: None,
            error: None,
            pending_commands: 0,
        }
    }

    pub fn editor(&self, resource: Resource) -> Option<&BulkEditorModel> {
        self.editors.get(&resource)
    }
}

/// Application messages routed through the update function.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    SectionSelected(Section),
    Editor(Resource, BulkEditorMsg),
    Movies(MoviesMsg),
    Settings(SettingsEvent),
    ExportRequested(PathBuf),
    ExportCancelled,
    ExportCompleted(Result<PathBuf, String>),
    DismissError,
}

/// Commands represent side-effects executed on the worker pool.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Editor(Resource, BulkEditorCommand),
    Movies(MoviesCommand),
    Export(SheetPayload),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::SectionSelected(section) => {
            model.section = section;
            load_section_once(model, section, cmds);
        }
        Msg::Editor(resource, m) => {
            let Some(editor) = model.editors.get_mut(&resource) else {
                return;
            };
            let mut editor_cmds = Vec::new();
            let notices = bulk_editor::update(editor, m, &mut editor_cmds);
            cmds.extend(editor_cmds.into_iter().map(|c| Command::Editor(resource, c)));
            for notice in notices {
                surface(model, notice);
            }
        }
        Msg::Movies(m) => {
            let mut movie_cmds = Vec::new();
            let notices = movies::update(&mut model.movies, m, &mut movie_cmds);
            cmds.extend(movie_cmds.into_iter().map(Command::Movies));
            for notice in notices {
                surface(model, notice);
            }
        }
        Msg::Settings(SettingsEvent::LocaleChanged(locale)) => model.locale = locale,
        Msg::Settings(SettingsEvent::ThemeChanged(theme)) => model.theme = theme,
        Msg::ExportRequested(output) => match export_payload(model, output) {
            Some(payload) => cmds.push(Command::Export(payload)),
            None => surface(model, Notice::error(Text::NothingToExport)),
        },
        Msg::ExportCancelled => surface(model, Notice::info(Text::ExportCancelled)),
        Msg::ExportCompleted(result) => match result {
            Ok(path) => surface(model, Notice::info(Text::Exported(path.display().to_string()))),
            Err(err) => surface(model, Notice::error(Text::ExportFailed(err))),
        },
        Msg::DismissError => model.error = None,
    }
}

/// First visit to a section triggers its initial fetch.
fn load_section_once(model: &mut AppModel, section: Section, cmds: &mut Vec<Command>) {
    match section {
        Section::Resource(resource) => {
            if model
                .editor(resource)
                .is_some_and(|e| !e.is_loaded() && !e.is_loading())
            {
                update(model, Msg::Editor(resource, BulkEditorMsg::Refresh), cmds);
            }
        }
        Section::Movies => {
            if !model.movies.is_loaded() && !model.movies.is_loading() {
                update(model, Msg::Movies(MoviesMsg::Refresh), cmds);
            }
        }
    }
}

/// Execute a command against the Store (or the filesystem) and return the resulting message.
pub fn run_command(store: &dyn RecordStore, cmd: Command) -> Msg {
    match cmd {
        Command::Editor(resource, cmd) => Msg::Editor(resource, run_editor_command(store, resource, cmd)),
        Command::Movies(cmd) => Msg::Movies(run_movies_command(store, cmd)),
        Command::Export(payload) => {
            let result = write_xlsx(&payload)
                .map(|_| payload.output.clone())
                .map_err(|err| {
                    let message = format!("{err:#}");
                    tracing::error!(error = %message, "export failed");
                    message
                });
            Msg::ExportCompleted(result)
        }
    }
}

fn run_editor_command(store: &dyn RecordStore, resource: Resource, cmd: BulkEditorCommand) -> BulkEditorMsg {
    let schema = resource.schema();
    let endpoint = schema.endpoint;
    match cmd {
        BulkEditorCommand::Fetch { structural } => BulkEditorMsg::Loaded {
            structural,
            result: store
                .list(endpoint)
                .map(|items| decode_all(endpoint, &items, |raw| Record::from_json(schema, raw))),
        },
        BulkEditorCommand::Create {
            batch,
            index,
            values,
        } => BulkEditorMsg::DraftCreated {
            batch,
            index,
            result: store
                .create(endpoint, &encode_record(schema, &values))
                .map(|_| ())
                .map_err(|err| err.field_errors()),
        },
        BulkEditorCommand::Update { id, values } => BulkEditorMsg::EditSaved {
            id,
            result: store.update(endpoint, id, &encode_record(schema, &values)),
        },
        BulkEditorCommand::Delete { id } => BulkEditorMsg::Deleted {
            id,
            result: store.delete(endpoint, id),
        },
        BulkEditorCommand::DeleteInBatch { batch, id } => BulkEditorMsg::BatchDeleted {
            batch,
            id,
            result: store.delete(endpoint, id),
        },
    }
}

fn run_movies_command(store: &dyn RecordStore, cmd: MoviesCommand) -> MoviesMsg {
    match cmd {
        MoviesCommand::Fetch { structural } => MoviesMsg::Loaded {
            structural,
            result: store
                .list(MOVIES_ENDPOINT)
                .map(|items| decode_all(MOVIES_ENDPOINT, &items, MovieRecord::from_json)),
        },
        MoviesCommand::FetchOptions => MoviesMsg::OptionsLoaded(store.movie_options().and_then(|raw| {
            MovieOptions::from_json(&raw).map_err(|err| StoreError::Decode(err.to_string()))
        })),
        MoviesCommand::PickImage(slot) => {
            let file = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "webp", "gif", "bmp"])
                .pick_file();
            match file {
                Some(path) => {
                    let result = probe_image(&path).map_err(|err| format!("{err:#}"));
                    MoviesMsg::ImagePicked { slot, path, result }
                }
                None => MoviesMsg::ImagePickCancelled(slot),
            }
        }
        MoviesCommand::Create { draft } => MoviesMsg::Saved {
            id: None,
            result: store.create(MOVIES_ENDPOINT, &encode_movie(&draft)).map(|_| ()),
        },
        MoviesCommand::Update { id, draft } => MoviesMsg::Saved {
            id: Some(id),
            result: store.update(MOVIES_ENDPOINT, id, &encode_movie(&draft)),
        },
        MoviesCommand::Delete { id } => MoviesMsg::Deleted {
            id,
            result: store.delete(MOVIES_ENDPOINT, id),
        },
        MoviesCommand::DeleteInBatch { batch, id } => MoviesMsg::BatchDeleted {
            batch,
            id,
            result: store.delete(MOVIES_ENDPOINT, id),
        },
    }
}

/// Decode every item, skipping (and logging) the ones that do not fit.
fn decode_all<T>(endpoint: &str, items: &[Value], decode: impl Fn(&Value) -> anyhow::Result<T>) -> Vec<T> {
    items
        .iter()
        .filter_map(|raw| match decode(raw) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(endpoint, error = %err, "skipping malformed record");
                None
            }
        })
        .collect()
}

/// Route a notice to the status line or the error modal.
///
/// Outcomes and failures land in separate slots so a mixed batch result
/// shows both counts.
fn surface(model: &mut AppModel, notice: Notice) {
    if notice.is_error {
        model.error = Some(notice.text);
    } else {
        model.status = Some(notice.text);
    }
}

/// Capture the current section's filtered rows (all pages) with localized headers.
fn export_payload(model: &AppModel, output: PathBuf) -> Option<SheetPayload> {
    let locale = model.locale;
    let (headers, rows) = match model.section {
        Section::Resource(resource) => {
            let editor = model.editor(resource)?;
            let fields = editor.schema().fields;
            let headers = std::iter::once("ID".to_string())
                .chain(fields.iter().map(|f| f.label.text(locale).to_string()))
                .collect();
            let rows: Vec<Vec<String>> = editor
                .filtered_records()
                .into_iter()
                .map(|record| {
                    std::iter::once(record.id.to_string())
                        .chain(fields.iter().map(|f| record.value(f.key).to_string()))
                        .collect()
                })
                .collect();
            (headers, rows)
        }
        Section::Movies => {
            let headers = [
                "ID",
                Label::TitleEn.text(locale),
                Label::TitleAr.text(locale),
                Label::Duration.text(locale),
                Label::Status.text(locale),
                Label::Featured.text(locale),
                Label::ImdbUrl.text(locale),
            ]
            .map(str::to_string)
            .to_vec();
            let rows: Vec<Vec<String>> = model
                .movies
                .filtered_movies()
                .into_iter()
                .map(|movie| {
                    let draft = &movie.draft;
                    let featured = if draft.featured { Label::Yes } else { Label::No };
                    vec![
                        movie.id.to_string(),
                        draft.title_en.clone(),
                        draft.title_ar.clone(),
                        draft.duration.clone(),
                        model.movies.status_name(draft.status_id, locale),
                        featured.text(locale).to_string(),
                        draft.imdb_url.clone(),
                    ]
                })
                .collect();
            (headers, rows)
        }
    };

    if rows.is_empty() {
        return None;
    }
    Some(SheetPayload {
        output,
        sheet_name: model.section.title().text(locale).to_string(),
        headers,
        rows,
    })
}
