use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{category, errors, icon, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_offering")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon_id: Uuid,
    pub category_id: Uuid,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Icon, Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Icon => Entity::belongs_to(icon::Entity).from(Column::IconId).to(icon::Column::Id).into(),
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn default_active() -> bool { true }

#[derive(Clone, Debug, Deserialize)]
pub struct OfferingInput {
    pub title: String,
    pub description: String,
    pub icon_id: Uuid,
    pub category_id: Uuid,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl OfferingInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("title", &self.title, 100)?;
        validate::required("description", &self.description, usize::MAX)
    }

    pub fn apply(self, am: &mut ActiveModel) {
        am.title = Set(self.title.trim().to_string());
        am.description = Set(self.description);
        am.icon_id = Set(self.icon_id);
        am.category_id = Set(self.category_id);
        am.active = Set(self.active);
    }
}

pub async fn create(db: &DatabaseConnection, input: OfferingInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let mut am = ActiveModel { id: Set(Uuid::new_v4()), ..Default::default() };
    input.apply(&mut am);
    am.insert(db).await.map_err(errors::ModelError::from)
}
