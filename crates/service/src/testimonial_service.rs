//! Testimonials: anyone may submit, only approved ones are published.

use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::{company, testimonial};

use crate::access::service::require_superuser;
use crate::access::Principal;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialView {
    #[serde(flatten)]
    pub testimonial: testimonial::Model,
    pub company_name: Option<String>,
}

async fn with_company_names(db: &DatabaseConnection, rows: Vec<testimonial::Model>) -> Result<Vec<TestimonialView>, ServiceError> {
    let names: HashMap<Uuid, String> = company::Entity::find()
        .filter(company::Column::Id.is_in(rows.iter().map(|r| r.company_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    Ok(rows
        .into_iter()
        .map(|t| TestimonialView { company_name: names.get(&t.company_id).cloned(), testimonial: t })
        .collect())
}

pub async fn list_approved(db: &DatabaseConnection) -> Result<Vec<TestimonialView>, ServiceError> {
    let rows = testimonial::Entity::find()
        .filter(testimonial::Column::Approved.eq(true))
        .order_by_desc(testimonial::Column::CreatedOn)
        .all(db)
        .await?;
    with_company_names(db, rows).await
}

/// Submissions are stored unapproved regardless of who sends them.
#[instrument(skip(db, input), fields(company_id = %input.company_id))]
pub async fn submit(db: &DatabaseConnection, input: testimonial::TestimonialInput) -> Result<testimonial::Model, ServiceError> {
    company::Entity::find_by_id(input.company_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::Validation("unknown company".into()))?;
    let created = testimonial::create(db, input).await?;
    info!(testimonial_id = %created.id, "testimonial_submitted");
    Ok(created)
}

pub async fn list_all(db: &DatabaseConnection, principal: &Principal, approved: Option<bool>) -> Result<Vec<TestimonialView>, ServiceError> {
    require_superuser(principal)?;
    let mut select = testimonial::Entity::find().order_by_desc(testimonial::Column::CreatedOn);
    if let Some(flag) = approved {
        select = select.filter(testimonial::Column::Approved.eq(flag));
    }
    with_company_names(db, select.all(db).await?).await
}

pub async fn set_approved(db: &DatabaseConnection, principal: &Principal, id: Uuid, approved: bool) -> Result<testimonial::Model, ServiceError> {
    require_superuser(principal)?;
    let mut am: testimonial::ActiveModel = testimonial::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("testimonial"))?
        .into();
    am.approved = Set(approved);
    Ok(am.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let res = testimonial::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("testimonial"));
    }
    Ok(())
}
