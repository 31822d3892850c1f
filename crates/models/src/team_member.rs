use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize)]
pub struct TeamMemberInput {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TeamMemberInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("name", &self.name, 100)?;
        validate::required("position", &self.position, 100)?;
        validate::optional_url("image_url", self.image_url.as_deref())
    }

    pub fn apply(self, am: &mut ActiveModel) {
        am.name = Set(self.name.trim().to_string());
        am.position = Set(self.position.trim().to_string());
        am.image_url = Set(validate::blank_to_none(self.image_url));
        am.description = Set(validate::blank_to_none(self.description));
    }
}

pub async fn create(db: &DatabaseConnection, input: TeamMemberInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let mut am = ActiveModel { id: Set(Uuid::new_v4()), ..Default::default() };
    input.apply(&mut am);
    am.insert(db).await.map_err(errors::ModelError::from)
}
