use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{computed_age, ApplicantId, ApplicantRecord, FieldMap};
use super::documents::{Document, DocumentSet, DocumentSlot};
use super::store::{ApplicantStore, StoreError};

/// Observable phase of the single edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Editing,
    Saving,
}

impl SessionState {
    pub const fn label(self) -> &'static str {
        match self {
            SessionState::Closed => "closed",
            SessionState::Editing => "editing",
            SessionState::Saving => "saving",
        }
    }
}

#[derive(Debug)]
struct EditBuffer {
    applicant_id: ApplicantId,
    fields: FieldMap,
    documents: DocumentSet,
}

/// Drives the edit workflow for one applicant at a time. Field and document
/// changes land in a scratch buffer; the stored record is only touched when
/// `save` submits the buffer through the store's merge update.
pub struct ApplicantEditor<S> {
    store: Arc<S>,
    state: SessionState,
    buffer: Option<EditBuffer>,
    today: NaiveDate,
    last_error: Option<String>,
}

/// Edit-session transition failures.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("an edit session is already open")]
    SessionOpen,
    #[error("no edit session is open")]
    NoSession,
    #[error("applicant {0} not found")]
    ApplicantNotFound(ApplicantId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<S: ApplicantStore> ApplicantEditor<S> {
    /// `today` anchors the derived age recomputation for the editor's
    /// lifetime, keeping it deterministic under test.
    pub fn new(store: Arc<S>, today: NaiveDate) -> Self {
        Self {
            store,
            state: SessionState::Closed,
            buffer: None,
            today,
            last_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Error message retained from the most recent failed save, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Snapshots the record's current fields and documents into the buffer.
    /// Only one session may be open at a time.
    pub fn open(&mut self, id: ApplicantId) -> Result<(), EditorError> {
        if self.state != SessionState::Closed {
            return Err(EditorError::SessionOpen);
        }

        let record = self
            .store
            .fetch(id)?
            .ok_or(EditorError::ApplicantNotFound(id))?;

        self.buffer = Some(EditBuffer {
            applicant_id: record.id,
            fields: record.fields,
            documents: record.documents,
        });
        self.state = SessionState::Editing;
        self.last_error = None;
        Ok(())
    }

    /// Stages one field value. Editing `date_of_birth` recomputes the
    /// derived `age` field from the session's reference date.
    pub fn stage_field(&mut self, field_id: &str, value: &str) -> Result<(), EditorError> {
        let today = self.today;
        let buffer = self.buffer_mut()?;
        buffer.fields.insert(field_id.to_string(), value.to_string());
        if field_id == "date_of_birth" {
            buffer
                .fields
                .insert("age".to_string(), computed_age(value, today));
        }
        Ok(())
    }

    /// Appends a document to a slot's staged list.
    pub fn attach_document(
        &mut self,
        slot: DocumentSlot,
        document: Document,
    ) -> Result<(), EditorError> {
        let buffer = self.buffer_mut()?;
        buffer.documents.entry(slot).or_default().push(document);
        Ok(())
    }

    /// Drops one staged document by position within its slot.
    pub fn remove_document(&mut self, slot: DocumentSlot, index: usize) -> Result<(), EditorError> {
        let buffer = self.buffer_mut()?;
        if let Some(documents) = buffer.documents.get_mut(&slot) {
            if index < documents.len() {
                documents.remove(index);
            }
        }
        Ok(())
    }

    pub fn staged_fields(&self) -> Option<&FieldMap> {
        self.buffer.as_ref().map(|buffer| &buffer.fields)
    }

    pub fn staged_documents(&self) -> Option<&DocumentSet> {
        self.buffer.as_ref().map(|buffer| &buffer.documents)
    }

    /// Submits the buffer through the store. Success discards the buffer and
    /// closes the session; failure keeps the buffer so the user can retry or
    /// cancel, and retains the error message for display.
    pub fn save(&mut self) -> Result<ApplicantRecord, EditorError> {
        let (applicant_id, fields, documents) = match self.buffer.as_ref() {
            Some(buffer) => (
                buffer.applicant_id,
                buffer.fields.clone(),
                buffer.documents.clone(),
            ),
            None => return Err(EditorError::NoSession),
        };
        self.state = SessionState::Saving;

        match self.store.update(applicant_id, fields, Some(documents)) {
            Ok(record) => {
                info!(applicant_id = %record.id, "edit session committed");
                self.buffer = None;
                self.state = SessionState::Closed;
                self.last_error = None;
                Ok(record)
            }
            Err(err) => {
                self.state = SessionState::Editing;
                self.last_error = Some(err.to_string());
                Err(EditorError::Store(err))
            }
        }
    }

    /// Discards the buffer unconditionally. No store interaction.
    pub fn cancel(&mut self) {
        self.buffer = None;
        self.state = SessionState::Closed;
        self.last_error = None;
    }

    fn buffer_mut(&mut self) -> Result<&mut EditBuffer, EditorError> {
        self.buffer.as_mut().ok_or(EditorError::NoSession)
    }
}

/// Blocking yes/no collaborator consulted before destructive actions.
pub trait ConfirmationPrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Result of a confirmed delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(ApplicantRecord),
    Cancelled,
}

/// Deletes an applicant after confirmation. Independent of the edit session;
/// declining the prompt is not an error.
pub fn delete_applicant<S, P>(
    store: &S,
    prompt: &P,
    record: &ApplicantRecord,
) -> Result<DeleteOutcome, StoreError>
where
    S: ApplicantStore,
    P: ConfirmationPrompt,
{
    let message = format!(
        "Are you sure you want to delete {}? This action cannot be undone.",
        record.display_name()
    );
    if !prompt.confirm(&message) {
        return Ok(DeleteOutcome::Cancelled);
    }

    let removed = store.delete(record.id)?;
    info!(applicant_id = %removed.id, "applicant deleted");
    Ok(DeleteOutcome::Deleted(removed))
}
