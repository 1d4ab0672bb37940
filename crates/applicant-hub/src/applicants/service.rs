use std::sync::Arc;

use tracing::info;

use super::domain::{
    is_standard_field, ApplicantId, ApplicantRecord, CustomField, FieldKind, FieldMap,
    STANDARD_FIELDS,
};
use super::documents::DocumentSet;
use super::query::{self, ListQuery};
use super::store::{
    ApplicantStore, CustomFieldStore, IdGenerator, RegistryError, StoreError, ValidationError,
};

/// Facade composing the record store and the custom field registry. Owns id
/// assignment and submission validation; everything below the traits is
/// swappable.
pub struct ApplicantService<S, F> {
    store: Arc<S>,
    registry: Arc<F>,
    ids: IdGenerator,
}

impl<S, F> ApplicantService<S, F>
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    pub fn new(store: Arc<S>, registry: Arc<F>) -> Self {
        Self {
            store,
            registry,
            ids: IdGenerator::new(),
        }
    }

    pub fn list(&self) -> Result<Vec<ApplicantRecord>, ApplicantServiceError> {
        Ok(self.store.list()?)
    }

    /// Runs the list query engine over the full record set.
    pub fn select(&self, query: &ListQuery) -> Result<Vec<ApplicantRecord>, ApplicantServiceError> {
        let records = self.store.list()?;
        Ok(query::select(&records, query))
    }

    pub fn get(&self, id: ApplicantId) -> Result<ApplicantRecord, ApplicantServiceError> {
        self.store
            .fetch(id)?
            .ok_or(ApplicantServiceError::Store(StoreError::NotFound(id)))
    }

    /// Validates a registration and inserts it with a freshly assigned id.
    pub fn register(
        &self,
        fields: FieldMap,
        documents: DocumentSet,
    ) -> Result<ApplicantRecord, ApplicantServiceError> {
        self.validate_submission(&fields)?;

        let record = ApplicantRecord {
            id: self.ids.next(),
            fields,
            documents,
        };
        let stored = self.store.create(record)?;
        info!(applicant_id = %stored.id, name = %stored.display_name(), "applicant registered");
        Ok(stored)
    }

    /// Shallow-merge update; unsupplied keys are preserved, so orphaned
    /// custom values survive untouched.
    pub fn update(
        &self,
        id: ApplicantId,
        fields: FieldMap,
        documents: Option<DocumentSet>,
    ) -> Result<ApplicantRecord, ApplicantServiceError> {
        Ok(self.store.update(id, fields, documents)?)
    }

    pub fn remove(&self, id: ApplicantId) -> Result<ApplicantRecord, ApplicantServiceError> {
        let removed = self.store.delete(id)?;
        info!(applicant_id = %removed.id, "applicant removed");
        Ok(removed)
    }

    pub fn custom_fields(&self) -> Result<Vec<CustomField>, ApplicantServiceError> {
        Ok(self.registry.list()?)
    }

    /// Derives the field id from the label and registers the definition.
    /// A blank label is rejected; a colliding derived id is a duplicate.
    pub fn add_custom_field(
        &self,
        label: &str,
        kind: FieldKind,
    ) -> Result<CustomField, ApplicantServiceError> {
        if label.trim().is_empty() {
            return Err(ValidationError::MissingRequired {
                field: "label".to_string(),
            }
            .into());
        }

        let field = self.registry.insert(CustomField::from_label(label, kind))?;
        info!(field_id = %field.id, "custom field added");
        Ok(field)
    }

    /// Removes the definition only; stored applicant values under the id
    /// are retained (observed product behavior).
    pub fn remove_custom_field(&self, id: &str) -> Result<CustomField, ApplicantServiceError> {
        let removed = self.registry.remove(id)?;
        info!(field_id = %removed.id, "custom field removed");
        Ok(removed)
    }

    fn validate_submission(&self, fields: &FieldMap) -> Result<(), ApplicantServiceError> {
        for standard in STANDARD_FIELDS.iter().filter(|entry| entry.required) {
            let blank = fields
                .get(standard.id)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true);
            if blank {
                return Err(ValidationError::MissingRequired {
                    field: standard.id.to_string(),
                }
                .into());
            }
        }

        let defined = self.registry.list()?;
        for key in fields.keys() {
            let known =
                is_standard_field(key) || defined.iter().any(|definition| &definition.id == key);
            if !known {
                return Err(ValidationError::UnknownField { field: key.clone() }.into());
            }
        }

        Ok(())
    }
}

/// Error raised by the applicant service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicantServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
