use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use common::types::Page;
use models::{company, product, product_feature};
use service::access::Principal;
use service::product_service::{self, ProductFilter, ProductView};

use crate::errors::JsonApiError;
use crate::routes::{auth::ServerState, paginate};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    /// matches name or description
    pub search: Option<String>,
}

impl ProductQuery {
    fn filter(&self) -> ProductFilter {
        ProductFilter { category_id: self.category_id, company_id: self.company_id, search: self.search.clone() }
    }
}

#[utoipa::path(get, path = "/api/products", tag = "public", params(ProductQuery), responses((status = 200, description = "Active products of active companies")))]
pub async fn public_list(
    State(state): State<ServerState>,
    Query(q): Query<ProductQuery>,
) -> Result<Json<Page<ProductView>>, JsonApiError> {
    Ok(Json(product_service::list_public(&state.db, &q.filter(), paginate(q.page, q.per_page)).await?))
}

#[utoipa::path(get, path = "/api/products/{id}", tag = "public", params(("id" = Uuid, Path, description = "Product id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn public_get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ProductView>, JsonApiError> {
    Ok(Json(product_service::get_public(&state.db, id).await?))
}

#[utoipa::path(get, path = "/admin/products", tag = "products", params(ProductQuery), responses((status = 200, description = "Products visible to the caller"), (status = 401, description = "Unauthorized")))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Query(q): Query<ProductQuery>,
) -> Result<Json<Page<product::Model>>, JsonApiError> {
    let page = paginate(q.page, q.per_page);
    Ok(Json(product_service::list_scoped(&state.db, &principal, &q.filter(), page).await?))
}

#[utoipa::path(get, path = "/admin/products/company-choices", tag = "products", responses((status = 200, description = "Companies the caller may assign products to")))]
pub async fn company_choices(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    Ok(Json(product_service::company_choices(&state.db, &principal).await?))
}

#[utoipa::path(post, path = "/admin/products", tag = "products", request_body = crate::openapi::ProductInputDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 403, description = "Forbidden")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<product::ProductInput>,
) -> Result<(StatusCode, Json<product::Model>), JsonApiError> {
    let created = product_service::create(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin/products/{id}", tag = "products", params(("id" = Uuid, Path, description = "Product id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found or out of scope")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductView>, JsonApiError> {
    Ok(Json(product_service::detail_scoped(&state.db, &principal, id).await?))
}

#[utoipa::path(put, path = "/admin/products/{id}", tag = "products", params(("id" = Uuid, Path, description = "Product id")), request_body = crate::openapi::ProductInputDoc, responses((status = 200, description = "Updated"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<product::ProductInput>,
) -> Result<Json<product::Model>, JsonApiError> {
    Ok(Json(product_service::update(&state.db, &principal, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/products/{id}", tag = "products", params(("id" = Uuid, Path, description = "Product id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    product_service::delete(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/admin/products/{id}/features", tag = "products", params(("id" = Uuid, Path, description = "Product id")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn list_features(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<product_feature::Model>>, JsonApiError> {
    Ok(Json(product_service::list_features(&state.db, &principal, id).await?))
}

#[utoipa::path(post, path = "/admin/products/{id}/features", tag = "products", params(("id" = Uuid, Path, description = "Product id")), request_body = crate::openapi::FeatureDoc, responses((status = 201, description = "Created"), (status = 404, description = "Not Found")))]
pub async fn add_feature(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(input): Json<product_feature::FeatureInput>,
) -> Result<(StatusCode, Json<product_feature::Model>), JsonApiError> {
    let created = product_service::add_feature(&state.db, &principal, id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(delete, path = "/admin/features/{id}", tag = "products", params(("id" = Uuid, Path, description = "Feature id")), responses((status = 204, description = "Removed"), (status = 404, description = "Not Found")))]
pub async fn remove_feature(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    product_service::remove_feature(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
