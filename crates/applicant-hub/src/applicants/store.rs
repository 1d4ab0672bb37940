use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use super::domain::{ApplicantId, ApplicantRecord, CustomField, FieldMap};
use super::documents::DocumentSet;

/// Storage abstraction over applicant records. Implementations must preserve
/// insertion order in `list` and keep updates shallow: supplied keys
/// overwrite, unsupplied keys survive. A supplied document set replaces the
/// stored one wholesale (the edit page resubmits the full map).
pub trait ApplicantStore: Send + Sync {
    fn list(&self) -> Result<Vec<ApplicantRecord>, StoreError>;
    fn fetch(&self, id: ApplicantId) -> Result<Option<ApplicantRecord>, StoreError>;
    fn create(&self, record: ApplicantRecord) -> Result<ApplicantRecord, StoreError>;
    fn update(
        &self,
        id: ApplicantId,
        fields: FieldMap,
        documents: Option<DocumentSet>,
    ) -> Result<ApplicantRecord, StoreError>;
    fn delete(&self, id: ApplicantId) -> Result<ApplicantRecord, StoreError>;
}

/// Storage abstraction over custom field definitions, in declaration order.
pub trait CustomFieldStore: Send + Sync {
    fn list(&self) -> Result<Vec<CustomField>, RegistryError>;
    fn insert(&self, field: CustomField) -> Result<CustomField, RegistryError>;
    /// Removes a definition. Stored applicant values under the removed id
    /// are deliberately left untouched.
    fn remove(&self, id: &str) -> Result<CustomField, RegistryError>;
}

/// Record store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("applicant {0} not found")]
    NotFound(ApplicantId),
    #[error("applicant {0} already exists")]
    Conflict(ApplicantId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Custom field registry failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("custom field '{0}' not found")]
    NotFound(String),
    #[error("custom field id '{0}' already exists")]
    Duplicate(String),
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// Submission validation failures raised before anything reaches a store.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("required field '{field}' is missing or blank")]
    MissingRequired { field: String },
    #[error("field '{field}' is neither standard nor a defined custom field")]
    UnknownField { field: String },
}

/// Issues applicant ids: Unix milliseconds, bumped past the previous id when
/// two creations land in the same millisecond.
#[derive(Debug)]
pub struct IdGenerator {
    last: Mutex<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(0),
        }
    }

    pub fn next(&self) -> ApplicantId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0);

        let mut last = self.last.lock().expect("id generator mutex poisoned");
        let id = now.max(*last + 1);
        *last = id;
        ApplicantId(id)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
