//! Service offerings shown on the public site.

use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use models::{category, icon, service_offering};

use crate::access::service::require_superuser;
use crate::access::Principal;
use crate::errors::{db_in_use_as_validation, ServiceError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferingFilter {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferingView {
    #[serde(flatten)]
    pub offering: service_offering::Model,
    pub icon_name: Option<String>,
    pub icon_code: Option<String>,
    pub category_name: Option<String>,
}

async fn with_names(db: &DatabaseConnection, rows: Vec<service_offering::Model>) -> Result<Vec<OfferingView>, ServiceError> {
    let icons: HashMap<Uuid, icon::Model> = icon::Entity::find()
        .filter(icon::Column::Id.is_in(rows.iter().map(|r| r.icon_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|i| (i.id, i))
        .collect();
    let categories: HashMap<Uuid, String> = category::Entity::find()
        .filter(category::Column::Id.is_in(rows.iter().map(|r| r.category_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    Ok(rows
        .into_iter()
        .map(|offering| {
            let icon = icons.get(&offering.icon_id);
            OfferingView {
                icon_name: icon.map(|i| i.name.clone()),
                icon_code: icon.map(|i| i.code.clone()),
                category_name: categories.get(&offering.category_id).cloned(),
                offering,
            }
        })
        .collect())
}

#[instrument(skip(db))]
pub async fn list_public(db: &DatabaseConnection, filter: &OfferingFilter) -> Result<Vec<OfferingView>, ServiceError> {
    let mut select = service_offering::Entity::find().filter(service_offering::Column::Active.eq(true));
    if let Some(cat) = filter.category_id {
        select = select.filter(service_offering::Column::CategoryId.eq(cat));
    }
    if let Some(q) = filter.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(service_offering::Column::Title.contains(q))
                .add(service_offering::Column::Description.contains(q)),
        );
    }
    let rows = select.order_by_asc(service_offering::Column::Title).all(db).await?;
    with_names(db, rows).await
}

pub async fn list_all(db: &DatabaseConnection, principal: &Principal) -> Result<Vec<OfferingView>, ServiceError> {
    require_superuser(principal)?;
    let rows = service_offering::Entity::find().order_by_asc(service_offering::Column::Title).all(db).await?;
    with_names(db, rows).await
}

async fn find(db: &DatabaseConnection, id: Uuid) -> Result<service_offering::Model, ServiceError> {
    service_offering::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("service"))
}

pub async fn create(db: &DatabaseConnection, principal: &Principal, input: service_offering::OfferingInput) -> Result<service_offering::Model, ServiceError> {
    require_superuser(principal)?;
    Ok(service_offering::create(db, input).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    principal: &Principal,
    id: Uuid,
    input: service_offering::OfferingInput,
) -> Result<service_offering::Model, ServiceError> {
    require_superuser(principal)?;
    input.validate()?;
    let mut am: service_offering::ActiveModel = find(db, id).await?.into();
    input.apply(&mut am);
    Ok(am.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let existing = find(db, id).await?;
    service_offering::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| db_in_use_as_validation(e, "service is still referenced"))?;
    Ok(())
}
