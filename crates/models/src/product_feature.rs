use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, product, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_feature")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::belongs_to(product::Entity).from(Column::ProductId).to(product::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FeatureInput {
    pub name: String,
    pub value: String,
}

pub async fn create(db: &DatabaseConnection, product_id: Uuid, input: FeatureInput) -> Result<Model, errors::ModelError> {
    validate::required("name", &input.name, 100)?;
    validate::required("value", &input.value, 255)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        name: Set(input.name.trim().to_string()),
        value: Set(input.value.trim().to_string()),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
