// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Movie catalog editor: searchable table with batch delete plus a
//! create/edit form with lookup options and poster/banner uploads.

mod view;

pub use view::view;

use std::path::PathBuf;

use uuid::Uuid;

use crate::i18n::{Locale, Text};
use crate::logic::deletion::{BatchDeleteResult, DeleteFlow, DeleteRequest};
use crate::logic::pagination::{self, PageSlice, ViewState};
use crate::models::field_errors::{FieldError, FieldErrors};
use crate::models::movie::{
    ImageSlot, MovieDraft, MovieField, MovieOptions, MovieRecord, Relation, validate_movie,
};
use crate::models::record::RecordId;
use crate::models::selection::Selection;
use crate::models::validation::{BANNER_RULE, ImageInfo, ImageRule, POSTER_RULE, check_image};
use crate::store::StoreError;
use crate::ui::components::Notice;

/// Upload constraints for an image slot.
pub fn image_rule(slot: ImageSlot) -> &'static ImageRule {
    match slot {
        ImageSlot::Poster => &POSTER_RULE,
        ImageSlot::Banner => &BANNER_RULE,
    }
}

/// Open create/edit form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieForm {
    /// `None` while creating a new movie.
    pub editing: Option<RecordId>,
    pub draft: MovieDraft,
    pub errors: FieldErrors,
    pub saving: bool,
    /// A file dialog or image probe is running for this slot.
    pub picking: Option<ImageSlot>,
}

impl MovieForm {
    fn new(editing: Option<RecordId>, draft: MovieDraft) -> Self {
        Self {
            editing,
            draft,
            errors: FieldErrors::new(),
            saving: false,
            picking: None,
        }
    }

    pub fn is_creating(&self) -> bool {
        self.editing.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MoviesModel {
    movies: Vec<MovieRecord>,
    loaded: bool,
    loading: bool,
    options: Option<MovieOptions>,
    options_loading: bool,
    form: Option<MovieForm>,
    deletes: DeleteFlow,
    view: ViewState,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MoviesMsg {
    Refresh,
    Loaded {
        structural: bool,
        result: Result<Vec<MovieRecord>, StoreError>,
    },
    OptionsLoaded(Result<MovieOptions, StoreError>),
    NewMovie,
    EditMovie(RecordId),
    CloseForm,
    FieldChanged {
        field: MovieField,
        value: String,
    },
    StatusChosen(Option<RecordId>),
    MaturityChosen(Option<RecordId>),
    FeaturedToggled(bool),
    RelationToggled {
        relation: Relation,
        id: RecordId,
    },
    PickImage(ImageSlot),
    ImagePicked {
        slot: ImageSlot,
        path: PathBuf,
        result: Result<ImageInfo, String>,
    },
    ImagePickCancelled(ImageSlot),
    ClearImage(ImageSlot),
    Submit,
    Saved {
        id: Option<RecordId>,
        result: Result<(), StoreError>,
    },
    RequestDelete(RecordId),
    Deleted {
        id: RecordId,
        result: Result<(), StoreError>,
    },
    ToggleSelection(RecordId),
    ToggleSelectAllOnPage,
    RequestDeleteSelected,
    BatchDeleted {
        batch: Uuid,
        id: RecordId,
        result: Result<(), StoreError>,
    },
    ConfirmAccepted,
    ConfirmDeclined,
    SearchChanged(String),
    PageChanged(usize),
    PageSizeChanged(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoviesCommand {
    Fetch { structural: bool },
    FetchOptions,
    /// Show a file dialog and probe the chosen image.
    PickImage(ImageSlot),
    Create { draft: MovieDraft },
    Update { id: RecordId, draft: MovieDraft },
    Delete { id: RecordId },
    DeleteInBatch { batch: Uuid, id: RecordId },
}

impl MoviesModel {
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn options(&self) -> Option<&MovieOptions> {
        self.options.as_ref()
    }

    pub fn is_options_loading(&self) -> bool {
        self.options_loading
    }

    pub fn form(&self) -> Option<&MovieForm> {
        self.form.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        self.deletes.selection()
    }

    pub fn is_deleting(&self, id: RecordId) -> bool {
        self.deletes.is_deleting(id)
    }

    pub fn is_batch_deleting(&self) -> bool {
        self.deletes.is_batch_deleting()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn confirm_text(&self, locale: Locale) -> Option<Text> {
        self.deletes.confirm_text(|id| {
            self.movie(id)
                .map(|m| m.title(locale).to_string())
                .unwrap_or_else(|| format!("#{id}"))
        })
    }

    /// Status caption for the table, falling back to the raw id.
    pub fn status_name(&self, id: Option<RecordId>, locale: Locale) -> String {
        let Some(id) = id else {
            return String::new();
        };
        self.options
            .as_ref()
            .and_then(|o| o.statuses.iter().find(|s| s.id == id))
            .map(|s| s.name(locale).to_string())
            .unwrap_or_else(|| format!("#{id}"))
    }

    pub fn visible_rows(&self) -> PageSlice<'_, MovieRecord> {
        pagination::visible_rows(&self.movies, &self.view, |m, needle| m.matches(needle))
    }

    pub fn filtered_movies(&self) -> Vec<&MovieRecord> {
        pagination::filtered_rows(&self.movies, &self.view, |m, needle| m.matches(needle))
    }

    fn movie(&self, id: RecordId) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| m.id == id)
    }

    fn fetch(&mut self, structural: bool, cmds: &mut Vec<MoviesCommand>) {
        self.loading = true;
        cmds.push(MoviesCommand::Fetch { structural });
    }

    fn ensure_options(&mut self, cmds: &mut Vec<MoviesCommand>) {
        if self.options.is_none() && !self.options_loading {
            self.options_loading = true;
            cmds.push(MoviesCommand::FetchOptions);
        }
    }

    /// Form that accepts edits (open and not being saved).
    fn editable_form(&mut self) -> Option<&mut MovieForm> {
        self.form.as_mut().filter(|f| !f.saving)
    }
}

pub fn update(
    model: &mut MoviesModel,
    msg: MoviesMsg,
    cmds: &mut Vec<MoviesCommand>,
) -> Vec<Notice> {
    let mut events = Vec::new();
    match msg {
        MoviesMsg::Refresh => {
            model.fetch(false, cmds);
            model.ensure_options(cmds);
        }
        MoviesMsg::Loaded { structural, result } => {
            model.loading = false;
            match result {
                Ok(movies) => apply_loaded(model, movies, structural),
                Err(err) => events.push(Notice::error(Text::LoadFailed(err.to_string()))),
            }
        }
        MoviesMsg::OptionsLoaded(result) => {
            model.options_loading = false;
            match result {
                Ok(options) => model.options = Some(options),
                Err(err) => events.push(Notice::error(Text::OptionsFailed(err.to_string()))),
            }
        }
        MoviesMsg::NewMovie => {
            model.form = Some(MovieForm::new(None, MovieDraft::default()));
            model.ensure_options(cmds);
        }
        MoviesMsg::EditMovie(id) => {
            if let Some(movie) = model.movie(id) {
                model.form = Some(MovieForm::new(Some(id), movie.draft.clone()));
                model.ensure_options(cmds);
            }
        }
        MoviesMsg::CloseForm => model.form = None,
        MoviesMsg::FieldChanged { field, value } => {
            if let Some(form) = model.editable_form() {
                form.draft.set_text(field, value);
                form.errors.clear_field(field.key());
            }
        }
        MoviesMsg::StatusChosen(id) => {
            if let Some(form) = model.editable_form() {
                form.draft.status_id = id;
                form.errors.clear_field("status_id");
            }
        }
        MoviesMsg::MaturityChosen(id) => {
            if let Some(form) = model.editable_form() {
                form.draft.maturity_id = id;
                form.errors.clear_field("maturity_id");
            }
        }
        MoviesMsg::FeaturedToggled(on) => {
            if let Some(form) = model.editable_form() {
                form.draft.featured = on;
            }
        }
        MoviesMsg::RelationToggled { relation, id } => {
            if let Some(form) = model.editable_form() {
                form.draft.toggle_related(relation, id);
                form.errors.clear_field(relation.key());
            }
        }
        MoviesMsg::PickImage(slot) => {
            if let Some(form) = model.editable_form().filter(|f| f.picking.is_none()) {
                form.picking = Some(slot);
                cmds.push(MoviesCommand::PickImage(slot));
            }
        }
        MoviesMsg::ImagePickCancelled(slot) => {
            if let Some(form) = model.form.as_mut().filter(|f| f.picking == Some(slot)) {
                form.picking = None;
            }
        }
        MoviesMsg::ImagePicked { slot, path, result } => {
            let Some(form) = model.form.as_mut().filter(|f| f.picking == Some(slot)) else {
                return events;
            };
            form.picking = None;
            let rejection = match result {
                Ok(info) => check_image(image_rule(slot), &info),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "image could not be probed");
                    Some(FieldError::ImageUnreadable)
                }
            };
            match rejection {
                Some(error) => {
                    form.errors.set(slot.key(), error);
                    events.push(Notice::error(Text::ImageRejected));
                }
                None => {
                    form.errors.clear_field(slot.key());
                    form.draft.set_image(slot, Some(path));
                }
            }
        }
        MoviesMsg::ClearImage(slot) => {
            if let Some(form) = model.editable_form() {
                form.draft.set_image(slot, None);
                form.errors.clear_field(slot.key());
            }
        }
        MoviesMsg::Submit => {
            let Some(form) = model.editable_form() else {
                return events;
            };
            let errors = validate_movie(&form.draft, form.is_creating());
            if !errors.is_empty() {
                form.errors = errors;
                events.push(Notice::error(Text::FixHighlighted));
                return events;
            }
            form.errors = FieldErrors::new();
            form.saving = true;
            let draft = form.draft.clone();
            cmds.push(match form.editing {
                Some(id) => MoviesCommand::Update { id, draft },
                None => MoviesCommand::Create { draft },
            });
        }
        MoviesMsg::Saved { id, result } => {
            // The form may have been closed while the request was in flight;
            // the Store outcome still counts.
            let form = model.form.as_mut().filter(|f| f.saving && f.editing == id);
            let form_open = form.is_some();
            if let Some(form) = form {
                form.saving = false;
            }
            match result {
                Ok(()) => {
                    if form_open {
                        model.form = None;
                    }
                    events.push(Notice::info(Text::MovieSaved));
                    model.fetch(id.is_none(), cmds);
                }
                Err(StoreError::Validation(messages)) if form_open => {
                    if let Some(form) = model.form.as_mut() {
                        form.errors = FieldErrors::from_store(&messages);
                    }
                    events.push(Notice::error(Text::FixHighlighted));
                }
                Err(err) => events.push(Notice::error(Text::MovieSaveFailed(err.to_string()))),
            }
        }
        MoviesMsg::RequestDelete(id) => {
            if model.movie(id).is_some() {
                model.deletes.request_one(id);
            }
        }
        MoviesMsg::Deleted { id, result } => {
            model.deletes.finish_one(id);
            match result {
                Ok(()) => {
                    if model.form.as_ref().is_some_and(|f| f.editing == Some(id)) {
                        model.form = None;
                    }
                    events.push(Notice::info(Text::Deleted));
                    model.fetch(true, cmds);
                }
                Err(err) => events.push(Notice::error(Text::DeleteFailed(err.to_string()))),
            }
        }
        MoviesMsg::ToggleSelection(id) => {
            if model.movie(id).is_some() {
                model.deletes.selection_mut().toggle(id);
            }
        }
        MoviesMsg::ToggleSelectAllOnPage => {
            let ids: Vec<RecordId> = model.visible_rows().rows.iter().map(|m| m.id).collect();
            model.deletes.selection_mut().toggle_page(&ids);
        }
        MoviesMsg::RequestDeleteSelected => {
            if !model.deletes.request_selected() {
                events.push(Notice::error(Text::NothingSelected));
            }
        }
        MoviesMsg::BatchDeleted { batch, id, result } => {
            match model.deletes.record_batch(batch, id, result) {
                Some(outcome @ BatchDeleteResult::AllDeleted(_)) => {
                    events.push(Notice::info(outcome.notice()));
                    model.fetch(true, cmds);
                }
                Some(outcome) => events.push(Notice::error(outcome.notice())),
                None => {}
            }
        }
        MoviesMsg::ConfirmAccepted => {
            cmds.extend(model.deletes.accept().into_iter().map(|request| match request {
                DeleteRequest::One(id) => MoviesCommand::Delete { id },
                DeleteRequest::InBatch { batch, id } => MoviesCommand::DeleteInBatch { batch, id },
            }));
        }
        MoviesMsg::ConfirmDeclined => model.deletes.decline(),
        MoviesMsg::SearchChanged(term) => model.view.set_search(term),
        MoviesMsg::PageChanged(page) => {
            let total_pages = model.visible_rows().total_pages;
            model.view.go_to(page, total_pages);
        }
        MoviesMsg::PageSizeChanged(size) => model.view.set_page_size(size),
    }
    events
}

fn apply_loaded(model: &mut MoviesModel, movies: Vec<MovieRecord>, structural: bool) {
    model.movies = movies;
    model.loaded = true;

    let present: Vec<RecordId> = model.movies.iter().map(|m| m.id).collect();
    let selection = model.deletes.selection_mut();
    if structural {
        selection.clear();
    } else {
        selection.retain_present(|id| present.contains(&id));
    }

    // An edit form whose movie vanished has nothing left to save into.
    if let Some(id) = model.form.as_ref().and_then(|f| f.editing)
        && !present.contains(&id)
    {
        model.form = None;
    }

    let total_pages = model.visible_rows().total_pages;
    model.view.clamp(total_pages);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::movie::OptionItem;

    fn movie(id: RecordId, title: &str) -> MovieRecord {
        let mut draft = MovieDraft {
            title_en: title.into(),
            title_ar: format!("{title} ع"),
            duration: "120".into(),
            status_id: Some(1),
            ..Default::default()
        };
        draft.toggle_related(Relation::Languages, 1);
        MovieRecord { id, draft }
    }

    fn loaded(count: RecordId) -> MoviesModel {
        let mut model = MoviesModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            MoviesMsg::Loaded {
                structural: false,
                result: Ok((1..=count).map(|id| movie(id, &format!("Film {id}"))).collect()),
            },
            &mut cmds,
        );
        model
    }

    fn fill_valid_form(model: &mut MoviesModel) {
        let mut cmds = Vec::new();
        for (field, value) in [
            (MovieField::TitleEn, "Theeb"),
            (MovieField::TitleAr, "ذيب"),
            (MovieField::Duration, "100"),
        ] {
            update(
                model,
                MoviesMsg::FieldChanged {
                    field,
                    value: value.into(),
                },
                &mut cmds,
            );
        }
        update(model, MoviesMsg::StatusChosen(Some(2)), &mut cmds);
        update(
            model,
            MoviesMsg::RelationToggled {
                relation: Relation::Languages,
                id: 1,
            },
            &mut cmds,
        );
    }

    fn attach_poster(model: &mut MoviesModel) {
        let mut cmds = Vec::new();
        update(model, MoviesMsg::PickImage(ImageSlot::Poster), &mut cmds);
        assert_eq!(cmds, vec![MoviesCommand::PickImage(ImageSlot::Poster)]);
        update(
            model,
            MoviesMsg::ImagePicked {
                slot: ImageSlot::Poster,
                path: PathBuf::from("/tmp/poster.png"),
                result: Ok(ImageInfo {
                    width: 500,
                    height: 750,
                    bytes: 200_000,
                }),
            },
            &mut cmds,
        );
    }

    #[test]
    fn opening_the_form_loads_options_once() {
        let mut model = loaded(2);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::NewMovie, &mut cmds);
        update(&mut model, MoviesMsg::CloseForm, &mut cmds);
        update(&mut model, MoviesMsg::EditMovie(2), &mut cmds);

        assert_eq!(cmds, vec![MoviesCommand::FetchOptions]);
        assert!(model.is_options_loading());
        assert_eq!(model.form().map(|f| f.editing), Some(Some(2)));
        assert_eq!(model.form().unwrap().draft.title_en, "Film 2");

        let options = MovieOptions {
            statuses: vec![OptionItem {
                id: 1,
                name_en: "Released".into(),
                name_ar: "صدر".into(),
            }],
            ..Default::default()
        };
        update(&mut model, MoviesMsg::OptionsLoaded(Ok(options)), &mut cmds);
        assert_eq!(model.status_name(Some(1), Locale::Ar), "صدر");
        assert_eq!(model.status_name(Some(7), Locale::En), "#7");
    }

    #[test]
    fn creating_requires_a_poster_and_valid_fields() {
        let mut model = loaded(0);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::NewMovie, &mut cmds);
        cmds.clear();

        let events = update(&mut model, MoviesMsg::Submit, &mut cmds);
        assert_eq!(events, vec![Notice::error(Text::FixHighlighted)]);
        assert!(cmds.is_empty());
        let errors = &model.form().unwrap().errors;
        for field in ["title_en", "title_ar", "duration", "status_id", "languages", "poster"] {
            assert!(errors.get(field).is_some(), "{field} should be flagged");
        }

        fill_valid_form(&mut model);
        attach_poster(&mut model);
        cmds.clear();
        update(&mut model, MoviesMsg::Submit, &mut cmds);

        let [MoviesCommand::Create { draft }] = cmds.as_slice() else {
            panic!("expected a single create, got {cmds:?}");
        };
        assert_eq!(draft.poster, Some(PathBuf::from("/tmp/poster.png")));
        assert!(model.form().unwrap().saving);
    }

    #[test]
    fn rejected_image_is_not_attached() {
        let mut model = loaded(0);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::NewMovie, &mut cmds);
        update(&mut model, MoviesMsg::PickImage(ImageSlot::Banner), &mut cmds);

        let events = update(
            &mut model,
            MoviesMsg::ImagePicked {
                slot: ImageSlot::Banner,
                path: PathBuf::from("/tmp/small.png"),
                result: Ok(ImageInfo {
                    width: 1280,
                    height: 720,
                    bytes: 10_000,
                }),
            },
            &mut cmds,
        );

        let form = model.form().unwrap();
        assert_eq!(events, vec![Notice::error(Text::ImageRejected)]);
        assert!(form.draft.banner.is_none());
        assert_eq!(
            form.errors.get("banner"),
            Some(&FieldError::ImageWidth {
                expected: 1920,
                actual: 1280
            })
        );
        assert!(form.picking.is_none());
    }

    #[test]
    fn unreadable_image_is_flagged() {
        let mut model = loaded(0);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::NewMovie, &mut cmds);
        update(&mut model, MoviesMsg::PickImage(ImageSlot::Poster), &mut cmds);
        update(
            &mut model,
            MoviesMsg::ImagePicked {
                slot: ImageSlot::Poster,
                path: PathBuf::from("/tmp/notes.txt"),
                result: Err("unsupported format".into()),
            },
            &mut cmds,
        );
        assert_eq!(
            model.form().unwrap().errors.get("poster"),
            Some(&FieldError::ImageUnreadable)
        );
    }

    #[test]
    fn store_validation_errors_stay_on_the_form() {
        let mut model = loaded(1);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::EditMovie(1), &mut cmds);
        cmds.clear();
        update(&mut model, MoviesMsg::Submit, &mut cmds);
        assert!(matches!(cmds.as_slice(), [MoviesCommand::Update { id: 1, .. }]));

        let mut messages = BTreeMap::new();
        messages.insert("title_en".to_string(), vec!["The title en has already been taken.".to_string()]);
        let mut follow_up = Vec::new();
        let events = update(
            &mut model,
            MoviesMsg::Saved {
                id: Some(1),
                result: Err(StoreError::Validation(messages)),
            },
            &mut follow_up,
        );

        let form = model.form().unwrap();
        assert!(!form.saving);
        assert_eq!(form.errors.get("title_en"), Some(&FieldError::AlreadyTaken));
        assert_eq!(events, vec![Notice::error(Text::FixHighlighted)]);
        assert!(follow_up.is_empty());
    }

    #[test]
    fn successful_edit_closes_form_and_refetches() {
        let mut model = loaded(1);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::EditMovie(1), &mut cmds);
        update(&mut model, MoviesMsg::FeaturedToggled(true), &mut cmds);
        update(&mut model, MoviesMsg::Submit, &mut cmds);

        let mut follow_up = Vec::new();
        let events = update(
            &mut model,
            MoviesMsg::Saved {
                id: Some(1),
                result: Ok(()),
            },
            &mut follow_up,
        );

        assert!(model.form().is_none());
        assert_eq!(events, vec![Notice::info(Text::MovieSaved)]);
        assert_eq!(follow_up, vec![MoviesCommand::Fetch { structural: false }]);
    }

    #[test]
    fn closing_the_form_mid_save_still_refetches_created_movie() {
        let mut model = loaded(1);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::NewMovie, &mut cmds);
        update(&mut model, MoviesMsg::CloseForm, &mut cmds);
        assert!(model.form().is_none());

        let mut follow_up = Vec::new();
        let events = update(
            &mut model,
            MoviesMsg::Saved {
                id: None,
                result: Ok(()),
            },
            &mut follow_up,
        );

        assert_eq!(events, vec![Notice::info(Text::MovieSaved)]);
        assert_eq!(follow_up, vec![MoviesCommand::Fetch { structural: true }]);
    }

    #[test]
    fn rejected_save_after_close_is_reported_as_a_notice() {
        let mut model = loaded(1);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::EditMovie(1), &mut cmds);
        update(&mut model, MoviesMsg::CloseForm, &mut cmds);

        let mut messages = BTreeMap::new();
        messages.insert("title_en".to_string(), vec!["taken".to_string()]);
        let mut follow_up = Vec::new();
        let events = update(
            &mut model,
            MoviesMsg::Saved {
                id: Some(1),
                result: Err(StoreError::Validation(messages)),
            },
            &mut follow_up,
        );

        assert!(model.form().is_none());
        assert!(matches!(events.as_slice(), [n] if n.is_error && matches!(n.text, Text::MovieSaveFailed(_))));
        assert!(follow_up.is_empty());
    }

    #[test]
    fn form_is_read_only_while_saving() {
        let mut model = loaded(1);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::EditMovie(1), &mut cmds);
        update(&mut model, MoviesMsg::Submit, &mut cmds);
        update(
            &mut model,
            MoviesMsg::FieldChanged {
                field: MovieField::TitleEn,
                value: "Changed".into(),
            },
            &mut cmds,
        );
        cmds.clear();
        update(&mut model, MoviesMsg::Submit, &mut cmds);

        assert_eq!(model.form().unwrap().draft.title_en, "Film 1");
        assert!(cmds.is_empty(), "no duplicate submission");
    }

    #[test]
    fn batch_delete_of_movies_refetches_on_success() {
        let mut model = loaded(3);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::ToggleSelectAllOnPage, &mut cmds);
        update(&mut model, MoviesMsg::RequestDeleteSelected, &mut cmds);
        assert_eq!(model.confirm_text(Locale::En), Some(Text::ConfirmDeleteMany(3)));
        update(&mut model, MoviesMsg::ConfirmAccepted, &mut cmds);
        assert_eq!(cmds.len(), 3);

        let mut follow_up = Vec::new();
        let mut events = Vec::new();
        for cmd in cmds {
            let MoviesCommand::DeleteInBatch { batch, id } = cmd else {
                panic!("unexpected command {cmd:?}");
            };
            events.extend(update(
                &mut model,
                MoviesMsg::BatchDeleted {
                    batch,
                    id,
                    result: Ok(()),
                },
                &mut follow_up,
            ));
        }

        assert_eq!(events, vec![Notice::info(Text::BatchDeleted(3))]);
        assert_eq!(follow_up, vec![MoviesCommand::Fetch { structural: true }]);
        assert!(model.selection().is_empty());
    }

    #[test]
    fn reload_without_edited_movie_closes_form() {
        let mut model = loaded(2);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::EditMovie(2), &mut cmds);
        update(
            &mut model,
            MoviesMsg::Loaded {
                structural: false,
                result: Ok(vec![movie(1, "Film 1")]),
            },
            &mut cmds,
        );
        assert!(model.form().is_none());
    }

    #[test]
    fn search_matches_arabic_titles() {
        let mut model = loaded(12);
        let mut cmds = Vec::new();
        update(&mut model, MoviesMsg::SearchChanged("Film 1 ع".into()), &mut cmds);
        let titles: Vec<_> = model.filtered_movies().iter().map(|m| m.id).collect();
        assert_eq!(titles, vec![1]);
    }
}
