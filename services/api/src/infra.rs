use applicant_hub::applicants::{
    ApplicantId, ApplicantRecord, ApplicantStore, CustomField, CustomFieldStore, DocumentSet,
    FieldMap, RegistryError, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Vec-backed record store: `list` returns creation order, `update` is a
/// shallow merge with wholesale document replacement.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicantStore {
    records: Arc<Mutex<Vec<ApplicantRecord>>>,
}

impl ApplicantStore for InMemoryApplicantStore {
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

/// Declaration-order custom field registry with the derived-id duplicate
/// check the transport contract requires.
#[derive(Default, Clone)]
pub(crate) struct InMemoryFieldStore {
    fields: Arc<Mutex<Vec<CustomField>>>,
}

impl CustomFieldStore for InMemoryFieldStore {
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
