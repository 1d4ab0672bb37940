use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantId, FieldKind, FieldMap};
use super::documents::DocumentSet;
use super::query::{FieldFilter, ListQuery, SortDirection};
use super::service::{ApplicantService, ApplicantServiceError};
use super::store::{ApplicantStore, CustomFieldStore, RegistryError, StoreError};

/// Transport envelope shared by every endpoint: `success` plus either a
/// payload or a human-readable failure message. `success:false` always
/// carries a message so no failure is silent.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.to_string(),
        }
    }

    fn failure(message: String) -> ApiResponse<serde_json::Value> {
        ApiResponse {
            success: false,
            data: None,
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filter_field: Option<String>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub direction: Option<SortDirection>,
}

impl ListParams {
    fn into_query(self) -> ListQuery {
        let defaults = ListQuery::default();
        ListQuery {
            search: self.search,
            filter_field: self
                .filter_field
                .map(|value| FieldFilter::from_param(&value))
                .unwrap_or(defaults.filter_field),
            sort_field: self.sort_field.unwrap_or(defaults.sort_field),
            direction: self.direction.unwrap_or(defaults.direction),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicantPayload {
    pub fields: FieldMap,
    #[serde(default)]
    pub documents: Option<DocumentSet>,
}

#[derive(Debug, Deserialize)]
pub struct CustomFieldPayload {
    pub label: String,
    #[serde(default = "default_field_kind")]
    pub kind: FieldKind,
}

fn default_field_kind() -> FieldKind {
    FieldKind::Text
}

/// Router builder exposing the applicant and custom-field endpoints.
pub fn applicant_router<S, F>(service: Arc<ApplicantService<S, F>>) -> Router
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/applicants",
            get(list_applicants::<S, F>).post(create_applicant::<S, F>),
        )
        .route(
            "/api/v1/applicants/:id",
            get(get_applicant::<S, F>)
                .put(update_applicant::<S, F>)
                .delete(delete_applicant::<S, F>),
        )
        .route(
            "/api/v1/custom-fields",
            get(list_custom_fields::<S, F>).post(create_custom_field::<S, F>),
        )
        .route(
            "/api/v1/custom-fields/:id",
            delete(delete_custom_field::<S, F>),
        )
        .with_state(service)
}

async fn list_applicants<S, F>(
    State(service): State<Arc<ApplicantService<S, F>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    match service.select(&params.into_query()) {
        Ok(records) => {
            let body = ApiResponse::ok(records, "Applicants fetched successfully");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn create_applicant<S, F>(
    State(service): State<Arc<ApplicantService<S, F>>>,
    Json(payload): Json<ApplicantPayload>,
) -> Response
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    match service.register(payload.fields, payload.documents.unwrap_or_default()) {
        Ok(record) => {
            let body = ApiResponse::ok(record, "Applicant created successfully");
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn get_applicant<S, F>(
    State(service): State<Arc<ApplicantService<S, F>>>,
    Path(id): Path<i64>,
) -> Response
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    match service.get(ApplicantId(id)) {
        Ok(record) => {
            let body = ApiResponse::ok(record, "Applicant fetched successfully");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn update_applicant<S, F>(
    State(service): State<Arc<ApplicantService<S, F>>>,
    Path(id): Path<i64>,
    Json(payload): Json<ApplicantPayload>,
) -> Response
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    match service.update(ApplicantId(id), payload.fields, payload.documents) {
        Ok(record) => {
            let body = ApiResponse::ok(record, "Applicant updated successfully");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn delete_applicant<S, F>(
    State(service): State<Arc<ApplicantService<S, F>>>,
    Path(id): Path<i64>,
) -> Response
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    match service.remove(ApplicantId(id)) {
        Ok(record) => {
            let body = ApiResponse::ok(record, "Applicant deleted successfully");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn list_custom_fields<S, F>(State(service): State<Arc<ApplicantService<S, F>>>) -> Response
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    match service.custom_fields() {
        Ok(fields) => {
            let body = ApiResponse::ok(fields, "Custom fields fetched successfully");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn create_custom_field<S, F>(
    State(service): State<Arc<ApplicantService<S, F>>>,
    Json(payload): Json<CustomFieldPayload>,
) -> Response
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    match service.add_custom_field(&payload.label, payload.kind) {
        Ok(field) => {
            let body = ApiResponse::ok(field, "Custom field created successfully");
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn delete_custom_field<S, F>(
    State(service): State<Arc<ApplicantService<S, F>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ApplicantStore + 'static,
    F: CustomFieldStore + 'static,
{
    match service.remove_custom_field(&id) {
        Ok(field) => {
            let body = ApiResponse::ok(field, "Custom field deleted successfully");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: ApplicantServiceError) -> Response {
    let status = match &err {
        ApplicantServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicantServiceError::Store(StoreError::NotFound(_))
        | ApplicantServiceError::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
        ApplicantServiceError::Store(StoreError::Conflict(_))
        | ApplicantServiceError::Registry(RegistryError::Duplicate(_)) => StatusCode::CONFLICT,
        ApplicantServiceError::Store(StoreError::Unavailable(_))
        | ApplicantServiceError::Registry(RegistryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let body = ApiResponse::<serde_json::Value>::failure(err.to_string());
    (status, Json(body)).into_response()
}
