//! Applicant record store, custom-field registry, list query engine, edit
//! sessions, and the HTTP transport surface.
//!
//! Storage is abstracted behind [`ApplicantStore`] and [`CustomFieldStore`]
//! so the same service and router run against the in-memory stores used in
//! tests and demos or a database-backed implementation.

pub mod domain;
pub mod documents;
pub mod query;
pub mod router;
pub mod service;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    age_on, computed_age, custom_field_id, is_standard_field, standard_field, ApplicantId,
    ApplicantRecord, CustomField, FieldKind, FieldMap, StandardField, STANDARD_FIELDS,
};
pub use documents::{format_size_kb, Document, DocumentSet, DocumentSlot};
pub use query::{select, FieldFilter, ListQuery, SortDirection};
pub use router::{applicant_router, ApiResponse};
pub use service::{ApplicantService, ApplicantServiceError};
pub use session::{
    delete_applicant, ApplicantEditor, ConfirmationPrompt, DeleteOutcome, EditorError,
    SessionState,
};
pub use store::{
    ApplicantStore, CustomFieldStore, IdGenerator, RegistryError, StoreError, ValidationError,
};
