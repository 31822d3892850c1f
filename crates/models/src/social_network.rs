use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, icon, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "social_network")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub base_url: String,
    pub icon_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Icon }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Icon => Entity::belongs_to(icon::Entity).from(Column::IconId).to(icon::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize)]
pub struct SocialNetworkInput {
    pub name: String,
    pub base_url: String,
    pub icon_id: Uuid,
}

impl SocialNetworkInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("name", &self.name, 50)?;
        validate::url("base_url", &self.base_url)
    }
}

pub async fn create(db: &DatabaseConnection, input: SocialNetworkInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        base_url: Set(input.base_url),
        icon_id: Set(input.icon_id),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
