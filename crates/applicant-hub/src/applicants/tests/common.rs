use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::applicants::domain::{ApplicantId, ApplicantRecord, CustomField, FieldMap};
use crate::applicants::documents::DocumentSet;
use crate::applicants::router::applicant_router;
use crate::applicants::service::ApplicantService;
use crate::applicants::session::ConfirmationPrompt;
use crate::applicants::store::{
    ApplicantStore, CustomFieldStore, RegistryError, StoreError,
};

/// Order-preserving in-memory record store used across the unit tests.
#[derive(Default)]
pub(super) struct MemoryApplicantStore {
    records: Mutex<Vec<ApplicantRecord>>,
}

impl ApplicantStore for MemoryApplicantStore {
    fn list(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.clone())
    }

    fn fetch(&self, id: ApplicantId) -> Result<Option<ApplicantRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| record.id == id).cloned())
    }

    fn create(&self, record: ApplicantRecord) -> Result<ApplicantRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::Conflict(record.id));
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(
        &self,
        id: ApplicantId,
        fields: FieldMap,
        documents: Option<DocumentSet>,
    ) -> Result<ApplicantRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        for (key, value) in fields {
            record.fields.insert(key, value);
        }
        if let Some(documents) = documents {
            record.documents = documents;
        }
        Ok(record.clone())
    }

    fn delete(&self, id: ApplicantId) -> Result<ApplicantRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let index = guard
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(guard.remove(index))
    }
}

/// Declaration-order in-memory custom field registry.
#[derive(Default)]
pub(super) struct MemoryFieldStore {
    fields: Mutex<Vec<CustomField>>,
}

impl CustomFieldStore for MemoryFieldStore {
    fn list(&self) -> Result<Vec<CustomField>, RegistryError> {
        let guard = self.fields.lock().expect("registry mutex poisoned");
        Ok(guard.clone())
    }

    fn insert(&self, field: CustomField) -> Result<CustomField, RegistryError> {
        let mut guard = self.fields.lock().expect("registry mutex poisoned");
        if guard.iter().any(|existing| existing.id == field.id) {
            return Err(RegistryError::Duplicate(field.id));
        }
        guard.push(field.clone());
        Ok(field)
    }

    fn remove(&self, id: &str) -> Result<CustomField, RegistryError> {
        let mut guard = self.fields.lock().expect("registry mutex poisoned");
        let index = guard
            .iter()
            .position(|field| field.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        Ok(guard.remove(index))
    }
}

/// Store double whose every operation fails like an offline database.
pub(super) struct UnavailableStore;

impl ApplicantStore for UnavailableStore {
    fn list(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: ApplicantId) -> Result<Option<ApplicantRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn create(&self, _record: ApplicantRecord) -> Result<ApplicantRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _id: ApplicantId,
        _fields: FieldMap,
        _documents: Option<DocumentSet>,
    ) -> Result<ApplicantRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: ApplicantId) -> Result<ApplicantRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct AcceptAllPrompt;

impl ConfirmationPrompt for AcceptAllPrompt {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

pub(super) struct DeclineAllPrompt;

impl ConfirmationPrompt for DeclineAllPrompt {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

/// Prompt double that records the message it was shown.
#[derive(Default)]
pub(super) struct RecordingPrompt {
    pub(super) messages: Mutex<Vec<String>>,
}

impl ConfirmationPrompt for RecordingPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.messages
            .lock()
            .expect("prompt mutex poisoned")
            .push(message.to_string());
        true
    }
}

/// A submission with every required standard field populated.
pub(super) fn base_fields(first_name: &str, last_name: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    for (key, value) in [
        ("job_applied_for", "Domestic Helper"),
        ("country_of_destination", "Hong Kong"),
        ("first_name", first_name),
        ("last_name", last_name),
        ("gender", "Female"),
        ("date_of_birth", "1990-05-15"),
        ("nationality", "Filipino"),
        ("civil_status", "Single"),
        ("contact_number_1", "+63 917 123 4567"),
        ("email", "applicant@email.com"),
        ("street_address", "123 Main Street"),
        ("barangay", "San Isidro"),
        ("city", "Makati City"),
        ("province", "Metro Manila"),
        ("emergency_contact_name", "Juan Cruz"),
        ("emergency_contact_number", "+63 919 111 2222"),
        ("work_country", "Hong Kong"),
        ("years_of_experience", "2.5"),
        ("job_position", "Domestic Helper"),
    ] {
        fields.insert(key.to_string(), value.to_string());
    }
    fields
}

/// A bare record for query-engine tests; only the supplied pairs are set.
pub(super) fn record(id: i64, pairs: &[(&str, &str)]) -> ApplicantRecord {
    let mut fields = FieldMap::new();
    for (key, value) in pairs {
        fields.insert((*key).to_string(), (*value).to_string());
    }
    ApplicantRecord {
        id: ApplicantId(id),
        fields,
        documents: DocumentSet::new(),
    }
}

pub(super) fn build_service() -> (
    Arc<ApplicantService<MemoryApplicantStore, MemoryFieldStore>>,
    Arc<MemoryApplicantStore>,
    Arc<MemoryFieldStore>,
) {
    let store = Arc::new(MemoryApplicantStore::default());
    let registry = Arc::new(MemoryFieldStore::default());
    let service = Arc::new(ApplicantService::new(store.clone(), registry.clone()));
    (service, store, registry)
}

pub(super) fn router_with_service(
    service: Arc<ApplicantService<MemoryApplicantStore, MemoryFieldStore>>,
) -> axum::Router {
    applicant_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
