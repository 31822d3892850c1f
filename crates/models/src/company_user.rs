use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{company, user};

/// Assignment of a user to the single company they manage.
///
/// `user_id` and `company_id` are each unique (`uq_company_user_user_id`,
/// `uq_company_user_company_id`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub company_id: Uuid,
    pub assigned_at: DateTimeWithTimeZone,
}

pub const USER_UNIQUE_INDEX: &str = "uq_company_user_user_id";
pub const COMPANY_UNIQUE_INDEX: &str = "uq_company_user_company_id";

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Company }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
