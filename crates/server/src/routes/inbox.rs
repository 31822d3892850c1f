//! Public submissions (contact, socios, job applications) and their admin triage.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use uuid::Uuid;

use common::types::Page;
use models::partner_application::ApplicationStatus;
use models::{contact_message, job_application, partner_application};
use service::access::Principal;
use service::errors::ServiceError;
use service::inbox_service::{self, JobApplicationView, PartnerReview};

use crate::errors::JsonApiError;
use crate::routes::{auth::ServerState, paginate, PageQuery};

pub const PARTNER_SUBMITTED: &str = "Application submitted successfully";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// matches name, email or message
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// `pending`, `approved` or `rejected`
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReadBody {
    pub read: bool,
}

#[derive(Debug, Serialize)]
pub struct Submitted<T> {
    pub message: &'static str,
    pub data: T,
}

#[utoipa::path(post, path = "/api/contact-messages", tag = "public", request_body = crate::openapi::ContactDoc, responses((status = 201, description = "Received"), (status = 400, description = "Bad Request")))]
pub async fn submit_contact(
    State(state): State<ServerState>,
    Json(input): Json<contact_message::ContactInput>,
) -> Result<(StatusCode, Json<contact_message::Model>), JsonApiError> {
    let created = inbox_service::submit_contact(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin/contact-messages", tag = "inbox", params(ContactQuery), responses((status = 200, description = "Newest first")))]
pub async fn list_contacts(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Query(q): Query<ContactQuery>,
) -> Result<Json<Page<contact_message::Model>>, JsonApiError> {
    let page = paginate(q.page, q.per_page);
    Ok(Json(inbox_service::list_contacts(&state.db, &principal, q.search.as_deref(), page).await?))
}

#[utoipa::path(put, path = "/admin/contact-messages/{id}/read", tag = "inbox", params(("id" = Uuid, Path, description = "Message id")), request_body = crate::openapi::ReadDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn set_contact_read(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(body): Json<ReadBody>,
) -> Result<Json<contact_message::Model>, JsonApiError> {
    Ok(Json(inbox_service::set_contact_read(&state.db, &principal, id, body.read).await?))
}

#[utoipa::path(delete, path = "/admin/contact-messages/{id}", tag = "inbox", params(("id" = Uuid, Path, description = "Message id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_contact(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    inbox_service::delete_contact(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/socios", tag = "public", request_body = crate::openapi::PartnerDoc, responses((status = 201, description = "Submitted"), (status = 400, description = "Invalid or duplicate email")))]
pub async fn submit_partner(
    State(state): State<ServerState>,
    Json(input): Json<partner_application::PartnerInput>,
) -> Result<(StatusCode, Json<Submitted<partner_application::Model>>), JsonApiError> {
    let created = inbox_service::submit_partner(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(Submitted { message: PARTNER_SUBMITTED, data: created })))
}

#[utoipa::path(get, path = "/admin/socios", tag = "inbox", params(StatusQuery), responses((status = 200, description = "Newest first"), (status = 400, description = "Unknown status")))]
pub async fn list_partners(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Query(q): Query<StatusQuery>,
) -> Result<Json<Page<partner_application::Model>>, JsonApiError> {
    let status = q
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<ApplicationStatus>)
        .transpose()
        .map_err(ServiceError::from)?;
    let page = paginate(q.page, q.per_page);
    Ok(Json(inbox_service::list_partners(&state.db, &principal, status, page).await?))
}

#[utoipa::path(get, path = "/admin/socios/{id}", tag = "inbox", params(("id" = Uuid, Path, description = "Application id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_partner(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<partner_application::Model>, JsonApiError> {
    Ok(Json(inbox_service::get_partner(&state.db, &principal, id).await?))
}

#[utoipa::path(put, path = "/admin/socios/{id}", tag = "inbox", params(("id" = Uuid, Path, description = "Application id")), request_body = crate::openapi::PartnerReviewDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn review_partner(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(review): Json<PartnerReview>,
) -> Result<Json<partner_application::Model>, JsonApiError> {
    Ok(Json(inbox_service::review_partner(&state.db, &principal, id, review).await?))
}

#[utoipa::path(delete, path = "/admin/socios/{id}", tag = "inbox", params(("id" = Uuid, Path, description = "Application id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_partner(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    inbox_service::delete_partner(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/job-applications", tag = "public", request_body = crate::openapi::JobApplicationDoc, responses((status = 201, description = "Received"), (status = 400, description = "Invalid CV or fields")))]
pub async fn submit_job_application(
    State(state): State<ServerState>,
    Json(input): Json<job_application::JobApplicationInput>,
) -> Result<(StatusCode, Json<JobApplicationView>), JsonApiError> {
    let created = inbox_service::submit_job_application(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/admin/job-applications", tag = "inbox", params(PageQuery), responses((status = 200, description = "Newest first")))]
pub async fn list_job_applications(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Page<JobApplicationView>>, JsonApiError> {
    Ok(Json(inbox_service::list_job_applications(&state.db, &principal, q.pagination()).await?))
}

#[utoipa::path(get, path = "/admin/job-applications/{id}", tag = "inbox", params(("id" = Uuid, Path, description = "Application id")), responses((status = 200, description = "With cv_download_url"), (status = 404, description = "Not Found")))]
pub async fn get_job_application(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobApplicationView>, JsonApiError> {
    Ok(Json(inbox_service::get_job_application(&state.db, &principal, id).await?))
}

#[utoipa::path(delete, path = "/admin/job-applications/{id}", tag = "inbox", params(("id" = Uuid, Path, description = "Application id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_job_application(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    inbox_service::delete_job_application(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
