//! Service offerings, testimonials, team and news.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use models::{news, service_offering, team_member, testimonial};
use service::access::Principal;
use service::offering_service::{self, OfferingFilter, OfferingView};
use service::testimonial_service::{self, TestimonialView};
use service::content_service;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OfferingQuery {
    pub category_id: Option<Uuid>,
    /// matches title or description
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalBody {
    pub approved: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovalQuery {
    pub approved: Option<bool>,
}

#[utoipa::path(get, path = "/api/services", tag = "public", params(OfferingQuery), responses((status = 200, description = "Active offerings")))]
pub async fn public_offerings(
    State(state): State<ServerState>,
    Query(q): Query<OfferingQuery>,
) -> Result<Json<Vec<OfferingView>>, JsonApiError> {
    let filter = OfferingFilter { category_id: q.category_id, search: q.search };
    Ok(Json(offering_service::list_public(&state.db, &filter).await?))
}

#[utoipa::path(get, path = "/admin/services", tag = "content", responses((status = 200, description = "All offerings"), (status = 403, description = "Forbidden")))]
pub async fn list_offerings(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<OfferingView>>, JsonApiError> {
    Ok(Json(offering_service::list_all(&state.db, &principal).await?))
}

#[utoipa::path(post, path = "/admin/services", tag = "content", request_body = crate::openapi::OfferingDoc, responses((status = 201, description = "Created"), (status = 403, description = "Forbidden")))]
pub async fn create_offering(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<service_offering::OfferingInput>,
) -> Result<(StatusCode, Json<service_offering::Model>), JsonApiError> {
    let created = offering_service::create(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/admin/services/{id}", tag = "content", params(("id" = Uuid, Path, description = "Offering id")), request_body = crate::openapi::OfferingDoc, responses((status = 200, description = "Updated")))]
pub async fn update_offering(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<service_offering::OfferingInput>,
) -> Result<Json<service_offering::Model>, JsonApiError> {
    Ok(Json(offering_service::update(&state.db, &principal, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/services/{id}", tag = "content", params(("id" = Uuid, Path, description = "Offering id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_offering(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    offering_service::delete(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/testimonials", tag = "public", responses((status = 200, description = "Approved testimonials")))]
pub async fn public_testimonials(State(state): State<ServerState>) -> Result<Json<Vec<TestimonialView>>, JsonApiError> {
    Ok(Json(testimonial_service::list_approved(&state.db).await?))
}

#[utoipa::path(post, path = "/api/testimonials", tag = "public", request_body = crate::openapi::TestimonialDoc, responses((status = 201, description = "Submitted for review"), (status = 400, description = "Bad Request")))]
pub async fn submit_testimonial(
    State(state): State<ServerState>,
    Json(input): Json<testimonial::TestimonialInput>,
) -> Result<(StatusCode, Json<testimonial::Model>), JsonApiError> {
    let created = testimonial_service::submit(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin/testimonials", tag = "content", params(ApprovalQuery), responses((status = 200, description = "OK")))]
pub async fn list_testimonials(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Query(q): Query<ApprovalQuery>,
) -> Result<Json<Vec<TestimonialView>>, JsonApiError> {
    Ok(Json(testimonial_service::list_all(&state.db, &principal, q.approved).await?))
}

#[utoipa::path(put, path = "/admin/testimonials/{id}/approval", tag = "content", params(("id" = Uuid, Path, description = "Testimonial id")), request_body = crate::openapi::ApprovalDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn set_testimonial_approval(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(body): Json<ApprovalBody>,
) -> Result<Json<testimonial::Model>, JsonApiError> {
    Ok(Json(testimonial_service::set_approved(&state.db, &principal, id, body.approved).await?))
}

#[utoipa::path(delete, path = "/admin/testimonials/{id}", tag = "content", params(("id" = Uuid, Path, description = "Testimonial id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_testimonial(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    testimonial_service::delete(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/team", tag = "public", responses((status = 200, description = "OK")))]
pub async fn list_team(State(state): State<ServerState>) -> Result<Json<Vec<team_member::Model>>, JsonApiError> {
    Ok(Json(content_service::list_team(&state.db).await?))
}

#[utoipa::path(post, path = "/admin/team", tag = "content", request_body = crate::openapi::TeamMemberDoc, responses((status = 201, description = "Created")))]
pub async fn create_team_member(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<team_member::TeamMemberInput>,
) -> Result<(StatusCode, Json<team_member::Model>), JsonApiError> {
    let created = content_service::create_team_member(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin/team/{id}", tag = "content", params(("id" = Uuid, Path, description = "Member id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_team_member(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<team_member::Model>, JsonApiError> {
    Ok(Json(content_service::get_team_member(&state.db, id).await?))
}

#[utoipa::path(put, path = "/admin/team/{id}", tag = "content", params(("id" = Uuid, Path, description = "Member id")), request_body = crate::openapi::TeamMemberDoc, responses((status = 200, description = "Updated")))]
pub async fn update_team_member(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<team_member::TeamMemberInput>,
) -> Result<Json<team_member::Model>, JsonApiError> {
    Ok(Json(content_service::update_team_member(&state.db, &principal, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/team/{id}", tag = "content", params(("id" = Uuid, Path, description = "Member id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_team_member(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    content_service::delete_team_member(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/news", tag = "public", responses((status = 200, description = "Newest first")))]
pub async fn list_news(State(state): State<ServerState>) -> Result<Json<Vec<news::Model>>, JsonApiError> {
    Ok(Json(content_service::list_news(&state.db).await?))
}

#[utoipa::path(get, path = "/api/news/{id}", tag = "public", params(("id" = Uuid, Path, description = "News id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_news(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<news::Model>, JsonApiError> {
    Ok(Json(content_service::get_news(&state.db, id).await?))
}

#[utoipa::path(post, path = "/admin/news", tag = "content", request_body = crate::openapi::NewsDoc, responses((status = 201, description = "Created")))]
pub async fn create_news(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<news::NewsInput>,
) -> Result<(StatusCode, Json<news::Model>), JsonApiError> {
    let created = content_service::create_news(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/admin/news/{id}", tag = "content", params(("id" = Uuid, Path, description = "News id")), request_body = crate::openapi::NewsDoc, responses((status = 200, description = "Updated")))]
pub async fn update_news(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<news::NewsInput>,
) -> Result<Json<news::Model>, JsonApiError> {
    Ok(Json(content_service::update_news(&state.db, &principal, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/news/{id}", tag = "content", params(("id" = Uuid, Path, description = "News id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_news(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    content_service::delete_news(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
