use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTimeWithTimeZone,
    pub read: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Public contact form. Only these four fields are accepted from visitors.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("name", &self.name, 100)?;
        validate::email("email", &self.email)?;
        validate::required("subject", &self.subject, 200)?;
        validate::required("message", &self.message, usize::MAX)
    }
}

pub async fn create(db: &DatabaseConnection, input: ContactInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        subject: Set(input.subject.trim().to_string()),
        message: Set(input.message),
        created_at: Set(Utc::now().into()),
        read: Set(false),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
