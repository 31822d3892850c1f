use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use models::{category, icon, social_network};
use service::access::Principal;
use service::catalog_service::{self, CategoryView};

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// matches the category name
    pub search: Option<String>,
}

#[utoipa::path(get, path = "/api/categories", tag = "public", params(SearchQuery), responses((status = 200, description = "Categories with product counts")))]
pub async fn list_categories(
    State(state): State<ServerState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<CategoryView>>, JsonApiError> {
    Ok(Json(catalog_service::list_categories(&state.db, q.search.as_deref()).await?))
}

#[utoipa::path(get, path = "/api/categories/{id}", tag = "public", params(("id" = Uuid, Path, description = "Category id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_category(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(catalog_service::get_category(&state.db, id).await?))
}

#[utoipa::path(post, path = "/admin/categories", tag = "catalog", request_body = crate::openapi::CategoryDoc, responses((status = 201, description = "Created"), (status = 400, description = "Duplicate name"), (status = 403, description = "Forbidden")))]
pub async fn create_category(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<category::CategoryInput>,
) -> Result<(StatusCode, Json<category::Model>), JsonApiError> {
    let created = catalog_service::create_category(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/admin/categories/{id}", tag = "catalog", params(("id" = Uuid, Path, description = "Category id")), request_body = crate::openapi::CategoryDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn update_category(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<category::CategoryInput>,
) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(catalog_service::update_category(&state.db, &principal, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/categories/{id}", tag = "catalog", params(("id" = Uuid, Path, description = "Category id")), responses((status = 204, description = "Deleted"), (status = 400, description = "Still in use")))]
pub async fn delete_category(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    catalog_service::delete_category(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/icons", tag = "public", responses((status = 200, description = "OK")))]
pub async fn list_icons(State(state): State<ServerState>) -> Result<Json<Vec<icon::Model>>, JsonApiError> {
    Ok(Json(catalog_service::list_icons(&state.db).await?))
}

#[utoipa::path(post, path = "/admin/icons", tag = "catalog", request_body = crate::openapi::IconDoc, responses((status = 201, description = "Created"), (status = 403, description = "Forbidden")))]
pub async fn create_icon(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<icon::IconInput>,
) -> Result<(StatusCode, Json<icon::Model>), JsonApiError> {
    let created = catalog_service::create_icon(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/admin/icons/{id}", tag = "catalog", params(("id" = Uuid, Path, description = "Icon id")), request_body = crate::openapi::IconDoc, responses((status = 200, description = "Updated")))]
pub async fn update_icon(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<icon::IconInput>,
) -> Result<Json<icon::Model>, JsonApiError> {
    Ok(Json(catalog_service::update_icon(&state.db, &principal, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/icons/{id}", tag = "catalog", params(("id" = Uuid, Path, description = "Icon id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_icon(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    catalog_service::delete_icon(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/social-networks", tag = "public", responses((status = 200, description = "OK")))]
pub async fn list_social_networks(State(state): State<ServerState>) -> Result<Json<Vec<social_network::Model>>, JsonApiError> {
    Ok(Json(catalog_service::list_social_networks(&state.db).await?))
}

#[utoipa::path(post, path = "/admin/social-networks", tag = "catalog", request_body = crate::openapi::SocialNetworkDoc, responses((status = 201, description = "Created")))]
pub async fn create_social_network(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<social_network::SocialNetworkInput>,
) -> Result<(StatusCode, Json<social_network::Model>), JsonApiError> {
    let created = catalog_service::create_social_network(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/admin/social-networks/{id}", tag = "catalog", params(("id" = Uuid, Path, description = "Network id")), request_body = crate::openapi::SocialNetworkDoc, responses((status = 200, description = "Updated")))]
pub async fn update_social_network(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<social_network::SocialNetworkInput>,
) -> Result<Json<social_network::Model>, JsonApiError> {
    Ok(Json(catalog_service::update_social_network(&state.db, &principal, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/social-networks/{id}", tag = "catalog", params(("id" = Uuid, Path, description = "Network id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_social_network(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    catalog_service::delete_social_network(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
