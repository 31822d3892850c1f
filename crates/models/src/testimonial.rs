use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{company, errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonial")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub company_id: Uuid,
    pub comment: String,
    pub created_on: Date,
    pub approved: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize)]
pub struct TestimonialInput {
    pub name: String,
    pub position: String,
    pub company_id: Uuid,
    pub comment: String,
}

impl TestimonialInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("name", &self.name, 100)?;
        validate::required("position", &self.position, 100)?;
        validate::required("comment", &self.comment, usize::MAX)
    }
}

/// New testimonials always start unapproved, whoever submits them.
pub async fn create(db: &DatabaseConnection, input: TestimonialInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name.trim().to_string()),
        position: Set(input.position.trim().to_string()),
        company_id: Set(input.company_id),
        comment: Set(input.comment),
        created_on: Set(Utc::now().date_naive()),
        approved: Set(false),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
