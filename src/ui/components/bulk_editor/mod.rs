// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Table-driven bulk row editor shared by every simple resource.
//!
//! One model instance owns a resource's fetched collection together with the
//! draft rows awaiting creation, the single inline edit buffer, the batch-delete
//! selection and the search/paging state. All Store traffic leaves through
//! [`BulkEditorCommand`] and comes back as [`BulkEditorMsg`].

mod view;

pub use view::view;

use uuid::Uuid;

use crate::i18n::{Locale, Text};
use crate::logic::batch::Batch;
use crate::logic::deletion::{BatchDeleteResult, DeleteFlow, DeleteRequest, PendingConfirm};
use crate::logic::pagination::{self, PageSlice, ViewState};
use crate::models::field_errors::{DraftErrors, FieldErrors};
use crate::models::record::{FieldValues, Record, RecordId, empty_draft};
use crate::models::resource::ResourceSchema;
use crate::models::selection::Selection;
use crate::models::validation::validate_record;
use crate::store::StoreError;
use crate::ui::components::Notice;

/// Upper bound on draft rows open at once.
pub const MAX_DRAFTS: usize = 5;

/// The record currently edited in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditBuffer {
    pub id: RecordId,
    pub values: FieldValues,
    pub errors: FieldErrors,
    /// An update request is in flight.
    pub saving: bool,
}

/// State of one resource editor.
#[derive(Clone, Debug)]
pub struct BulkEditorModel {
    schema: &'static ResourceSchema,
    records: Vec<Record>,
    loaded: bool,
    loading: bool,
    drafts: Vec<FieldValues>,
    draft_errors: DraftErrors,
    pending_create: Option<Batch<usize, Result<(), FieldErrors>>>,
    edit: Option<EditBuffer>,
    deletes: DeleteFlow,
    view: ViewState,
}

/// Inputs of the editor: user intents and Store completions.
#[derive(Clone, Debug, PartialEq)]
pub enum BulkEditorMsg {
    Refresh,
    Loaded {
        structural: bool,
        result: Result<Vec<Record>, StoreError>,
    },
    AddDraftRow,
    RemoveDraftRow(usize),
    DraftFieldChanged {
        index: usize,
        field: String,
        value: String,
    },
    SubmitDrafts,
    DraftCreated {
        batch: Uuid,
        index: usize,
        result: Result<(), FieldErrors>,
    },
    BeginEdit(RecordId),
    EditFieldChanged {
        field: String,
        value: String,
    },
    SubmitEdit,
    EditSaved {
        id: RecordId,
        result: Result<(), StoreError>,
    },
    CancelEdit,
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

/// Store calls requested by the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BulkEditorCommand {
    /// Re-read the whole collection. `structural` refetches follow a create
    /// or delete and reset the selection.
    Fetch { structural: bool },
    Create {
        batch: Uuid,
        index: usize,
        values: FieldValues,
    },
    Update {
        id: RecordId,
        values: FieldValues,
    },
    Delete {
        id: RecordId,
    },
    DeleteInBatch {
        batch: Uuid,
        id: RecordId,
    },
}

impl BulkEditorModel {
    /// Fresh editor with a single empty draft and nothing loaded yet.
    pub fn new(schema: &'static ResourceSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
            loaded: false,
            loading: false,
            drafts: vec![empty_draft(schema)],
            draft_errors: DraftErrors::default(),
            pending_create: None,
            edit: None,
            deletes: DeleteFlow::default(),
            view: ViewState::default(),
        }
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn drafts(&self) -> &[FieldValues] {
        &self.drafts
    }

    pub fn draft_errors(&self) -> &DraftErrors {
        &self.draft_errors
    }

    /// A create batch is in flight; drafts are read-only until it resolves.
    pub fn is_submitting(&self) -> bool {
        self.pending_create.is_some()
    }

    pub fn is_batch_deleting(&self) -> bool {
        self.deletes.is_batch_deleting()
    }

    pub fn is_deleting(&self, id: RecordId) -> bool {
        self.deletes.is_deleting(id)
    }

    pub fn edit(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        self.deletes.selection()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn confirm(&self) -> Option<&PendingConfirm> {
        self.deletes.confirm()
    }

    /// Prompt text for the pending confirmation, naming the record or count.
    pub fn confirm_text(&self, locale: Locale) -> Option<Text> {
        self.deletes.confirm_text(|id| {
            self.record(id)
                .map(|r| self.schema.display_name(r, locale))
                .unwrap_or_else(|| format!("#{id}"))
        })
    }

    fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Current page of the filtered collection.
    pub fn visible_rows(&self) -> PageSlice<'_, Record> {
        pagination::visible_rows(&self.records, &self.view, |r, needle| {
            self.schema.matches(r, needle)
        })
    }

    /// Every row matching the search term, across pages.
    pub fn filtered_records(&self) -> Vec<&Record> {
        pagination::filtered_rows(&self.records, &self.view, |r, needle| {
            self.schema.matches(r, needle)
        })
    }

    fn page_ids(&self) -> Vec<RecordId> {
        self.visible_rows().rows.iter().map(|r| r.id).collect()
    }

    fn fetch(&mut self, structural: bool, cmds: &mut Vec<BulkEditorCommand>) {
        self.loading = true;
        cmds.push(BulkEditorCommand::Fetch { structural });
    }
}

/// Apply a message to the model, queueing Store commands and returning notices.
pub fn update(
    model: &mut BulkEditorModel,
    msg: BulkEditorMsg,
    cmds: &mut Vec<BulkEditorCommand>,
) -> Vec<Notice> {
    let mut events = Vec::new();
    match msg {
        BulkEditorMsg::Refresh => model.fetch(false, cmds),
        BulkEditorMsg::Loaded { structural, result } => {
            model.loading = false;
            match result {
                Ok(records) => apply_loaded(model, records, structural),
                Err(err) => events.push(Notice::error(Text::LoadFailed(err.to_string()))),
            }
        }
        BulkEditorMsg::AddDraftRow => {
            if model.is_submitting() {
                return events;
            }
            if model.drafts.len() >= MAX_DRAFTS {
                events.push(Notice::error(Text::MaxRows(MAX_DRAFTS)));
            } else {
                model.drafts.push(empty_draft(model.schema));
            }
        }
        BulkEditorMsg::RemoveDraftRow(index) => {
            if model.is_submitting() || index >= model.drafts.len() {
                return events;
            }
            model.drafts.remove(index);
            model.draft_errors.remove_row(index);
        }
        BulkEditorMsg::DraftFieldChanged {
            index,
            field,
            value,
        } => {
            if model.is_submitting() {
                return events;
            }
            if let Some(draft) = model.drafts.get_mut(index) {
                draft.insert(field.clone(), value);
                model.draft_errors.clear_field(index, &field);
            }
        }
        BulkEditorMsg::SubmitDrafts => submit_drafts(model, cmds, &mut events),
        BulkEditorMsg::DraftCreated {
            batch,
            index,
            result,
        } => draft_created(model, batch, index, result, cmds, &mut events),
        BulkEditorMsg::BeginEdit(id) => {
            if let Some(record) = model.record(id) {
                model.edit = Some(EditBuffer {
                    id,
                    values: record.values.clone(),
                    errors: FieldErrors::new(),
                    saving: false,
                });
            }
        }
        BulkEditorMsg::EditFieldChanged { field, value } => {
            if let Some(edit) = model.edit.as_mut().filter(|e| !e.saving) {
                edit.errors.clear_field(&field);
                edit.values.insert(field, value);
            }
        }
        BulkEditorMsg::SubmitEdit => {
            let schema = model.schema;
            let Some(edit) = model.edit.as_mut().filter(|e| !e.saving) else {
                return events;
            };
            let errors = validate_record(schema, &edit.values);
            if errors.is_empty() {
                edit.errors = FieldErrors::new();
                edit.saving = true;
                cmds.push(BulkEditorCommand::Update {
                    id: edit.id,
                    values: edit.values.clone(),
                });
            } else {
                edit.errors = errors;
                events.push(Notice::error(Text::FixHighlighted));
            }
        }
        BulkEditorMsg::EditSaved { id, result } => match result {
            Ok(()) => {
                if model.edit.as_ref().is_some_and(|e| e.id == id) {
                    model.edit = None;
                }
                events.push(Notice::info(Text::Updated));
                model.fetch(false, cmds);
            }
            Err(err) => {
                if let Some(edit) = model.edit.as_mut().filter(|e| e.id == id) {
                    edit.saving = false;
                    if let StoreError::Validation(messages) = &err {
                        edit.errors = FieldErrors::from_store(messages);
                        events.push(Notice::error(Text::FixHighlighted));
                        return events;
                    }
                }
                events.push(Notice::error(Text::UpdateFailed(err.to_string())));
            }
        },
        BulkEditorMsg::CancelEdit => model.edit = None,
        BulkEditorMsg::RequestDelete(id) => {
            if model.record(id).is_some() {
                model.deletes.request_one(id);
            }
        }
        BulkEditorMsg::Deleted { id, result } => {
            model.deletes.finish_one(id);
            match result {
                Ok(()) => {
                    if model.edit.as_ref().is_some_and(|e| e.id == id) {
                        model.edit = None;
                    }
                    events.push(Notice::info(Text::Deleted));
                    model.fetch(true, cmds);
                }
                Err(err) => events.push(Notice::error(Text::DeleteFailed(err.to_string()))),
            }
        }
        BulkEditorMsg::ToggleSelection(id) => {
            if model.record(id).is_some() {
                model.deletes.selection_mut().toggle(id);
            }
        }
        BulkEditorMsg::ToggleSelectAllOnPage => {
            let ids = model.page_ids();
            model.deletes.selection_mut().toggle_page(&ids);
        }
        BulkEditorMsg::RequestDeleteSelected => {
            if !model.deletes.request_selected() {
                events.push(Notice::error(Text::NothingSelected));
            }
        }
        BulkEditorMsg::BatchDeleted { batch, id, result } => {
            // Any failure leaves selection and collection untouched until the
            // user refreshes.
            match model.deletes.record_batch(batch, id, result) {
                Some(outcome @ BatchDeleteResult::AllDeleted(_)) => {
                    events.push(Notice::info(outcome.notice()));
                    model.fetch(true, cmds);
                }
                Some(outcome) => events.push(Notice::error(outcome.notice())),
                None => {}
            }
        }
        BulkEditorMsg::ConfirmAccepted => {
            cmds.extend(model.deletes.accept().into_iter().map(|request| match request {
                DeleteRequest::One(id) => BulkEditorCommand::Delete { id },
                DeleteRequest::InBatch { batch, id } => BulkEditorCommand::DeleteInBatch { batch, id },
            }));
        }
        BulkEditorMsg::ConfirmDeclined => model.deletes.decline(),
        BulkEditorMsg::SearchChanged(term) => model.view.set_search(term),
        BulkEditorMsg::PageChanged(page) => {
            let total_pages = model.visible_rows().total_pages;
            model.view.go_to(page, total_pages);
        }
        BulkEditorMsg::PageSizeChanged(size) => model.view.set_page_size(size),
    }
    events
}

fn apply_loaded(model: &mut BulkEditorModel, records: Vec<Record>, structural: bool) {
    model.records = records;
    model.loaded = true;

    let present: Vec<RecordId> = model.records.iter().map(|r| r.id).collect();
    let selection = model.deletes.selection_mut();
    if structural {
        selection.clear();
    } else {
        selection.retain_present(|id| present.contains(&id));
    }
    let edited_gone = model
        .edit
        .as_ref()
        .is_some_and(|edit| model.record(edit.id).is_none());
    if edited_gone {
        model.edit = None;
    }

    let total_pages = model.visible_rows().total_pages;
    model.view.clamp(total_pages);
}

fn submit_drafts(
    model: &mut BulkEditorModel,
    cmds: &mut Vec<BulkEditorCommand>,
    events: &mut Vec<Notice>,
) {
    if model.is_submitting() || model.drafts.is_empty() {
        return;
    }

    let mut invalid = DraftErrors::default();
    for (index, draft) in model.drafts.iter().enumerate() {
        invalid.set(index, validate_record(model.schema, draft));
    }
    if !invalid.is_empty() {
        model.draft_errors = invalid;
        events.push(Notice::error(Text::FixHighlighted));
        return;
    }

    model.draft_errors.clear();
    let batch = Batch::open(0..model.drafts.len());
    for (index, values) in model.drafts.iter().enumerate() {
        cmds.push(BulkEditorCommand::Create {
            batch: batch.id(),
            index,
            values: values.clone(),
        });
    }
    model.pending_create = Some(batch);
}

fn draft_created(
    model: &mut BulkEditorModel,
    batch_id: Uuid,
    index: usize,
    result: Result<(), FieldErrors>,
    cmds: &mut Vec<BulkEditorCommand>,
    events: &mut Vec<Notice>,
) {
    let Some(batch) = model.pending_create.as_mut().filter(|b| b.id() == batch_id) else {
        tracing::debug!(%batch_id, index, "ignoring outcome of a stale create batch");
        return;
    };
    batch.record(index, result);
    if !batch.is_complete() {
        return;
    }
    let Some(batch) = model.pending_create.take() else {
        return;
    };

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for (index, outcome) in batch.into_outcomes() {
        match outcome {
            Ok(()) => succeeded.push(index),
            Err(errors) => failed.push((index, errors)),
        }
    }

    let drafts = std::mem::take(&mut model.drafts);
    model.drafts = drafts
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !succeeded.contains(i))
        .map(|(_, draft)| draft)
        .collect();

    let failed_count = failed.len();
    model.draft_errors = DraftErrors::rekeyed_after_success(failed, &succeeded);

    if !succeeded.is_empty() {
        events.push(Notice::info(Text::Created(succeeded.len())));
        model.fetch(true, cmds);
    }
    if failed_count > 0 {
        events.push(Notice::error(Text::CreateFailed(failed_count)));
    } else {
        model.drafts = vec![empty_draft(model.schema)];
    }
}
