// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Confirmation-gated deletion shared by every table: single deletes and the
//! all-or-nothing batch delete of the current selection.

use uuid::Uuid;

use crate::i18n::Text;
use crate::logic::batch::Batch;
use crate::models::record::RecordId;
use crate::models::selection::Selection;
use crate::store::StoreError;

/// Destructive action awaiting a yes/no answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingConfirm {
    Delete(RecordId),
    DeleteSelected(Vec<RecordId>),
}

/// Store call to issue after a confirmation was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteRequest {
    One(RecordId),
    InBatch { batch: Uuid, id: RecordId },
}

/// Aggregate result of a finished batch delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchDeleteResult {
    AllDeleted(usize),
    Failed { failed: usize, total: usize },
}

impl BatchDeleteResult {
    pub fn notice(self) -> Text {
        match self {
            BatchDeleteResult::AllDeleted(n) => Text::BatchDeleted(n),
            BatchDeleteResult::Failed { failed, total } => Text::BatchDeleteFailed { failed, total },
        }
    }
}

/// Selection plus in-flight deletions of one table.
#[derive(Clone, Debug, Default)]
pub struct DeleteFlow {
    selection: Selection,
    batch: Option<Batch<RecordId, Result<(), StoreError>>>,
    deleting: Vec<RecordId>,
    confirm: Option<PendingConfirm>,
}

impl DeleteFlow {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn confirm(&self) -> Option<&PendingConfirm> {
        self.confirm.as_ref()
    }

    pub fn is_deleting(&self, id: RecordId) -> bool {
        self.deleting.contains(&id)
    }

    pub fn is_batch_deleting(&self) -> bool {
        self.batch.is_some()
    }

    /// Prompt text, naming the record via `name_of` or the selection count.
    pub fn confirm_text(&self, name_of: impl Fn(RecordId) -> String) -> Option<Text> {
        self.confirm.as_ref().map(|confirm| match confirm {
            PendingConfirm::Delete(id) => Text::ConfirmDelete(name_of(*id)),
            PendingConfirm::DeleteSelected(ids) => Text::ConfirmDeleteMany(ids.len()),
        })
    }

    /// Ask to delete one record (ignored while that record is being deleted).
    pub fn request_one(&mut self, id: RecordId) {
        if !self.is_deleting(id) {
            self.confirm = Some(PendingConfirm::Delete(id));
        }
    }

    /// Ask to delete the selection. Returns `false` when nothing is selected.
    pub fn request_selected(&mut self) -> bool {
        if self.is_batch_deleting() {
            return true;
        }
        if self.selection.is_empty() {
            return false;
        }
        self.confirm = Some(PendingConfirm::DeleteSelected(self.selection.ids()));
        true
    }

    pub fn decline(&mut self) {
        self.confirm = None;
    }

    /// Turn the pending confirmation into Store requests; a batch gets a fresh id.
    pub fn accept(&mut self) -> Vec<DeleteRequest> {
        match self.confirm.take() {
            Some(PendingConfirm::Delete(id)) => {
                self.deleting.push(id);
                vec![DeleteRequest::One(id)]
            }
            Some(PendingConfirm::DeleteSelected(ids)) if !ids.is_empty() => {
                let batch = Batch::open(ids.iter().copied());
                let requests = ids
                    .iter()
                    .map(|id| DeleteRequest::InBatch {
                        batch: batch.id(),
                        id: *id,
                    })
                    .collect();
                self.batch = Some(batch);
                requests
            }
            _ => Vec::new(),
        }
    }

    /// A single delete finished (either way).
    pub fn finish_one(&mut self, id: RecordId) {
        self.deleting.retain(|d| *d != id);
    }

    /// Record one batch outcome. Returns the aggregate once every request
    /// has reported; a full success clears the selection. Outcomes for any
    /// other batch id are ignored.
    pub fn record_batch(
        &mut self,
        batch_id: Uuid,
        id: RecordId,
        result: Result<(), StoreError>,
    ) -> Option<BatchDeleteResult> {
        let batch = self.batch.as_mut().filter(|b| b.id() == batch_id)?;
        batch.record(id, result);
        if !batch.is_complete() {
            return None;
        }
        let batch = self.batch.take()?;
        let total = batch.expected();
        let failed = batch
            .into_outcomes()
            .values()
            .filter(|outcome| outcome.is_err())
            .count();

        if failed == 0 {
            self.selection.clear();
            Some(BatchDeleteResult::AllDeleted(total))
        } else {
            Some(BatchDeleteResult::Failed { failed, total })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_of(requests: &[DeleteRequest]) -> Uuid {
        match requests.first() {
            Some(DeleteRequest::InBatch { batch, .. }) => *batch,
            other => panic!("expected a batch request, got {other:?}"),
        }
    }

    #[test]
    fn nothing_happens_before_confirmation() {
        let mut flow = DeleteFlow::default();
        flow.request_one(4);
        assert_eq!(flow.confirm(), Some(&PendingConfirm::Delete(4)));

        flow.decline();
        assert!(flow.confirm().is_none());
        assert!(flow.accept().is_empty());
    }

    #[test]
    fn empty_selection_is_reported() {
        let mut flow = DeleteFlow::default();
        assert!(!flow.request_selected());
        assert!(flow.confirm().is_none());
    }

    #[test]
    fn any_failed_request_fails_the_whole_batch() {
        let mut flow = DeleteFlow::default();
        for id in [1, 2, 3] {
            flow.selection_mut().toggle(id);
        }
        assert!(flow.request_selected());
        let requests = flow.accept();
        assert_eq!(requests.len(), 3);
        let batch = batch_of(&requests);

        assert_eq!(flow.record_batch(batch, 1, Ok(())), None);
        assert_eq!(flow.record_batch(batch, 3, Err(StoreError::Status(403))), None);
        let result = flow.record_batch(batch, 2, Ok(()));

        assert_eq!(result, Some(BatchDeleteResult::Failed { failed: 1, total: 3 }));
        assert_eq!(flow.selection().len(), 3);
        assert!(!flow.is_batch_deleting());
    }

    #[test]
    fn outcomes_of_another_batch_are_ignored() {
        let mut flow = DeleteFlow::default();
        flow.selection_mut().toggle(7);
        flow.request_selected();
        flow.accept();

        assert_eq!(flow.record_batch(Uuid::new_v4(), 7, Ok(())), None);
        assert!(flow.is_batch_deleting());
    }
}
