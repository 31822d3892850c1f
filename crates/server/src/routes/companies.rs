use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use common::types::Page;
use models::{company, company_social_network};
use service::access::Principal;
use service::company_service::{self, CompanyDetail, CompanyFilter};

use crate::errors::JsonApiError;
use crate::routes::{auth::ServerState, paginate};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category_id: Option<Uuid>,
    /// matches name or description
    pub search: Option<String>,
}

impl CompanyQuery {
    fn filter(&self) -> CompanyFilter {
        CompanyFilter { category_id: self.category_id, search: self.search.clone() }
    }
}

#[utoipa::path(get, path = "/api/companies", tag = "public", params(CompanyQuery), responses((status = 200, description = "Active companies")))]
pub async fn public_list(
    State(state): State<ServerState>,
    Query(q): Query<CompanyQuery>,
) -> Result<Json<Page<company::Model>>, JsonApiError> {
    Ok(Json(company_service::list_public(&state.db, &q.filter(), paginate(q.page, q.per_page)).await?))
}

#[utoipa::path(get, path = "/api/companies/{id}", tag = "public", params(("id" = Uuid, Path, description = "Company id")), responses((status = 200, description = "Company with active products and social links"), (status = 404, description = "Not Found")))]
pub async fn public_get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<CompanyDetail>, JsonApiError> {
    Ok(Json(company_service::get_public(&state.db, id).await?))
}

#[utoipa::path(get, path = "/admin/companies", tag = "companies", params(CompanyQuery), responses((status = 200, description = "Companies visible to the caller"), (status = 401, description = "Unauthorized")))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Query(q): Query<CompanyQuery>,
) -> Result<Json<Page<company::Model>>, JsonApiError> {
    let page = paginate(q.page, q.per_page);
    Ok(Json(company_service::list_scoped(&state.db, &principal, &q.filter(), page).await?))
}

#[utoipa::path(post, path = "/admin/companies", tag = "companies", request_body = crate::openapi::CompanyInputDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 403, description = "Forbidden")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<company::CompanyInput>,
) -> Result<(StatusCode, Json<company::Model>), JsonApiError> {
    let created = company_service::create(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin/companies/{id}", tag = "companies", params(("id" = Uuid, Path, description = "Company id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found or out of scope")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyDetail>, JsonApiError> {
    Ok(Json(company_service::detail_scoped(&state.db, &principal, id).await?))
}

#[utoipa::path(put, path = "/admin/companies/{id}", tag = "companies", params(("id" = Uuid, Path, description = "Company id")), request_body = crate::openapi::CompanyInputDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<company::CompanyInput>,
) -> Result<Json<company::Model>, JsonApiError> {
    Ok(Json(company_service::update(&state.db, &principal, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/companies/{id}", tag = "companies", params(("id" = Uuid, Path, description = "Company id")), responses((status = 204, description = "Deleted"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    company_service::delete(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/admin/companies/{id}/social-links", tag = "companies", params(("id" = Uuid, Path, description = "Company id")), request_body = crate::openapi::SocialLinkDoc, responses((status = 201, description = "Linked"), (status = 400, description = "Already linked")))]
pub async fn add_social_link(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<company_social_network::LinkInput>,
) -> Result<(StatusCode, Json<company_social_network::Model>), JsonApiError> {
    let link = company_service::add_social_link(&state.db, &principal, id, input).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

#[utoipa::path(delete, path = "/admin/social-links/{id}", tag = "companies", params(("id" = Uuid, Path, description = "Link id")), responses((status = 204, description = "Removed"), (status = 404, description = "Not Found")))]
pub async fn remove_social_link(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    company_service::remove_social_link(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
