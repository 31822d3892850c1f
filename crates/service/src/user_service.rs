use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use models::{company, company_user, user};
use crate::access::domain::Binding;
use crate::access::service::require_superuser;
use crate::access::Principal;
use crate::auth::domain::{AuthUser, RegisterInput};
use crate::auth::errors::AuthError;
use crate::auth::repo::seaorm::SeaOrmAuthRepository;
use crate::auth::service::{AuthConfig, AuthService};
use crate::errors::ServiceError;

/// Shown in place of a company name for users without an assignment.
pub const NO_COMPANY: &str = "-";

/// A user row as listed in the admin, with the company they manage.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub company_id: Option<Uuid>,
    pub company_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BindingView {
    #[serde(flatten)]
    pub binding: Binding,
    pub username: Option<String>,
    pub company_name: Option<String>,
}

fn auth_error(e: AuthError) -> ServiceError {
    match e {
        AuthError::Validation(m) => ServiceError::Validation(m),
        AuthError::Conflict => ServiceError::Validation("a user with this username already exists".into()),
        AuthError::NotFound => ServiceError::not_found("user"),
        other => ServiceError::Db(other.to_string()),
    }
}

/// Create a user with a password.
pub async fn create_user(db: &DatabaseConnection, principal: &Principal, input: RegisterInput) -> Result<AuthUser, ServiceError> {
    require_superuser(principal)?;
    let auth = AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), AuthConfig::default());
    auth.register(input).await.map_err(auth_error)
}

pub async fn set_password(db: &DatabaseConnection, principal: &Principal, id: Uuid, password: &str) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let auth = AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), AuthConfig::default());
    auth.set_password(id, password).await.map_err(auth_error)
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    let found = user::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// All users by username, each with the name of their assigned company or `-`.
pub async fn list_users(db: &DatabaseConnection, principal: &Principal) -> Result<Vec<UserView>, ServiceError> {
    require_superuser(principal)?;
    let users = user::Entity::find().order_by_asc(user::Column::Username).all(db).await?;
    let bindings = company_user::Entity::find().all(db).await?;
    let company_ids: Vec<Uuid> = bindings.iter().map(|b| b.company_id).collect();
    let names: HashMap<Uuid, String> = company::Entity::find()
        .filter(company::Column::Id.is_in(company_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let by_user: HashMap<Uuid, Uuid> = bindings.into_iter().map(|b| (b.user_id, b.company_id)).collect();

    Ok(users
        .into_iter()
        .map(|u| {
            let company_id = by_user.get(&u.id).copied();
            let company_name = company_id
                .and_then(|c| names.get(&c).cloned())
                .unwrap_or_else(|| NO_COMPANY.to_string());
            UserView {
                id: u.id,
                username: u.username,
                email: u.email,
                is_active: u.is_active,
                is_staff: u.is_staff,
                is_superuser: u.is_superuser,
                company_id,
                company_name,
            }
        })
        .collect())
}

pub async fn set_active(db: &DatabaseConnection, principal: &Principal, id: Uuid, active: bool) -> Result<user::Model, ServiceError> {
    require_superuser(principal)?;
    get_user(db, id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
    Ok(user::set_active(db, id, active).await?)
}

/// Hard-delete a user; credentials and binding go with it.
pub async fn delete_user(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    if principal.user_id() == Some(id) {
        return Err(ServiceError::Validation("you cannot delete your own account".into()));
    }
    get_user(db, id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
    user::hard_delete(db, id).await?;
    Ok(())
}

/// Attach usernames and company names to bindings for display.
pub async fn describe_bindings(db: &DatabaseConnection, bindings: Vec<Binding>) -> Result<Vec<BindingView>, ServiceError> {
    let users: HashMap<Uuid, String> = user::Entity::find()
        .filter(user::Column::Id.is_in(bindings.iter().map(|b| b.user_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();
    let companies: HashMap<Uuid, String> = company::Entity::find()
        .filter(company::Column::Id.is_in(bindings.iter().map(|b| b.company_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    Ok(bindings
        .into_iter()
        .map(|b| BindingView {
            username: users.get(&b.user_id).cloned(),
            company_name: companies.get(&b.company_id).cloned(),
            binding: b,
        })
        .collect())
}
