use sea_orm::{entity::prelude::*, ConnectionTrait, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    validate::required("username", username, 150)?;
    if !username.chars().all(|c| c.is_alphanumeric() || "@.+-_".contains(c)) {
        return Err(errors::ModelError::Validation("username may only contain letters, digits and @/./+/-/_".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    validate::email("email", email)
}

/// Insert a user. Accepts a transaction so credentials can be stored in the same unit.
pub async fn create<C: ConnectionTrait>(db: &C, input: &NewUser) -> Result<Model, errors::ModelError> {
    validate_username(&input.username)?;
    validate_email(&input.email)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(input.username.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        // 超级用户总是拥有后台访问权限
        is_staff: Set(input.is_staff || input.is_superuser),
        is_superuser: Set(input.is_superuser),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}

pub async fn set_active(db: &DatabaseConnection, id: Uuid, active: bool) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id).one(db).await.map_err(errors::ModelError::from)?.ok_or_else(|| errors::ModelError::Validation("user not found".into()))?.into();
    found.is_active = Set(active);
    found.updated_at = Set(Utc::now().into());
    found.update(db).await.map_err(errors::ModelError::from)
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(errors::ModelError::from)?;
    Ok(())
}
