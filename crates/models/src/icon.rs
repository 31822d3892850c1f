use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "icon")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Front-end icon class, e.g. `fa-solid fa-truck`.
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize)]
pub struct IconInput {
    pub name: String,
    pub code: String,
}

impl IconInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("name", &self.name, 50)?;
        validate::required("code", &self.code, 50)
    }
}

pub async fn create(db: &DatabaseConnection, input: IconInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        code: Set(input.code.trim().to_string()),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
