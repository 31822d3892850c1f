use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{company, errors, social_network, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_social_network")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub social_network_id: Uuid,
    pub username: String,
    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company, SocialNetwork }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
            Relation::SocialNetwork => Entity::belongs_to(social_network::Entity).from(Column::SocialNetworkId).to(social_network::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize)]
pub struct LinkInput {
    pub social_network_id: Uuid,
    pub username: String,
    pub url: String,
}

impl LinkInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("username", &self.username, 100)?;
        validate::url("url", &self.url)
    }
}

pub async fn create(db: &DatabaseConnection, company_id: Uuid, input: LinkInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id),
        social_network_id: Set(input.social_network_id),
        username: Set(input.username.trim().to_string()),
        url: Set(input.url),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
