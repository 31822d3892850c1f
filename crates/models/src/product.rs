use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use rust_decimal::Decimal;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{category, company, errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub company_id: Uuid,
    pub category_id: Uuid,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company, Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn default_active() -> bool { true }

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub company_id: Uuid,
    pub category_id: Uuid,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// numeric(10, 2): non-negative, two decimals, eight integer digits.
pub fn validate_price(price: Decimal) -> Result<(), errors::ModelError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(errors::ModelError::Validation("price must not be negative".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(errors::ModelError::Validation("price allows at most 2 decimal places".into()));
    }
    if price.trunc() >= Decimal::from(100_000_000i64) {
        return Err(errors::ModelError::Validation("price allows at most 10 digits".into()));
    }
    Ok(())
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("name", &self.name, 100)?;
        validate::required("description", &self.description, usize::MAX)?;
        validate_price(self.price)?;
        validate::optional_url("image_url", self.image_url.as_deref())
    }

    pub fn apply(self, am: &mut ActiveModel) {
        am.name = Set(self.name.trim().to_string());
        am.company_id = Set(self.company_id);
        am.category_id = Set(self.category_id);
        am.description = Set(self.description);
        am.price = Set(self.price.round_dp(2));
        am.image_url = Set(validate::blank_to_none(self.image_url));
        am.active = Set(self.active);
    }
}

pub async fn create(db: &DatabaseConnection, input: ProductInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let mut am = ActiveModel { id: Set(Uuid::new_v4()), ..Default::default() };
    input.apply(&mut am);
    am.insert(db).await.map_err(errors::ModelError::from)
}
