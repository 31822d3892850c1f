//! User accounts and user↔company bindings. Superuser only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use models::user;
use service::access::domain::Binding;
use service::access::Principal;
use service::auth::domain::{AuthUser, RegisterInput};
use service::user_service::{self, BindingView, UserView};

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct PasswordBody {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ActiveBody {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct BindRequest {
    pub user_id: Uuid,
    pub company_id: Uuid,
}

#[utoipa::path(get, path = "/admin/users", tag = "users", responses((status = 200, description = "Users with their company name or '-'"), (status = 403, description = "Forbidden")))]
pub async fn list_users(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<UserView>>, JsonApiError> {
    Ok(Json(user_service::list_users(&state.db, &principal).await?))
}

#[utoipa::path(post, path = "/admin/users", tag = "users", request_body = crate::openapi::CreateUserDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 403, description = "Forbidden")))]
pub async fn create_user(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<AuthUser>), JsonApiError> {
    let created = user_service::create_user(&state.db, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/admin/users/{id}/password", tag = "users", params(("id" = Uuid, Path, description = "User id")), request_body = crate::openapi::PasswordDoc, responses((status = 204, description = "Password set"), (status = 400, description = "Too short")))]
pub async fn set_password(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(body): Json<PasswordBody>,
) -> Result<StatusCode, JsonApiError> {
    user_service::set_password(&state.db, &principal, id, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(put, path = "/admin/users/{id}/active", tag = "users", params(("id" = Uuid, Path, description = "User id")), request_body = crate::openapi::ActiveDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn set_active(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(body): Json<ActiveBody>,
) -> Result<Json<user::Model>, JsonApiError> {
    Ok(Json(user_service::set_active(&state.db, &principal, id, body.active).await?))
}

#[utoipa::path(delete, path = "/admin/users/{id}", tag = "users", params(("id" = Uuid, Path, description = "User id")), responses((status = 204, description = "Deleted"), (status = 400, description = "Own account")))]
pub async fn delete_user(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    user_service::delete_user(&state.db, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/admin/company-users", tag = "users", responses((status = 200, description = "Bindings, newest first"), (status = 403, description = "Forbidden")))]
pub async fn list_bindings(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<BindingView>>, JsonApiError> {
    let bindings = state.access.list(&principal).await?;
    Ok(Json(user_service::describe_bindings(&state.db, bindings).await?))
}

#[utoipa::path(post, path = "/admin/company-users", tag = "users", request_body = crate::openapi::BindRequestDoc, responses((status = 201, description = "Bound"), (status = 400, description = "User or company already assigned"), (status = 403, description = "Forbidden")))]
pub async fn bind(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<BindRequest>,
) -> Result<(StatusCode, Json<Binding>), JsonApiError> {
    let binding = state.access.bind(&principal, body.user_id, body.company_id).await?;
    Ok((StatusCode::CREATED, Json(binding)))
}

#[utoipa::path(delete, path = "/admin/company-users/{id}", tag = "users", params(("id" = Uuid, Path, description = "Binding id")), responses((status = 204, description = "Unbound"), (status = 404, description = "Not Found")))]
pub async fn unbind(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    state.access.unbind(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
