//! Categories, icons and social networks. Public reads, superuser writes.

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::{category, icon, product, social_network, validate};

use crate::access::service::require_superuser;
use crate::access::Principal;
use crate::errors::{db_in_use_as_validation, db_unique_as_validation, unique_as_validation, ServiceError};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: category::Model,
    pub product_count: i64,
}

#[instrument(skip(db))]
pub async fn list_categories(db: &DatabaseConnection, search: Option<&str>) -> Result<Vec<CategoryView>, ServiceError> {
    let mut select = category::Entity::find().order_by_asc(category::Column::Name);
    if let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) {
        select = select.filter(category::Column::Name.contains(q));
    }
    let categories = select.all(db).await?;

    let counts: HashMap<Uuid, i64> = product::Entity::find()
        .select_only()
        .column(product::Column::CategoryId)
        .column_as(Expr::col(product::Column::Id).count(), "product_count")
        .group_by(product::Column::CategoryId)
        .into_tuple::<(Uuid, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    Ok(categories
        .into_iter()
        .map(|c| CategoryView { product_count: counts.get(&c.id).copied().unwrap_or(0), category: c })
        .collect())
}

pub async fn get_category(db: &DatabaseConnection, id: Uuid) -> Result<category::Model, ServiceError> {
    category::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("category"))
}

#[instrument(skip(db, principal, input), fields(name = %input.name))]
pub async fn create_category(db: &DatabaseConnection, principal: &Principal, input: category::CategoryInput) -> Result<category::Model, ServiceError> {
    require_superuser(principal)?;
    let created = category::create(db, input)
        .await
        .map_err(|e| unique_as_validation(e, "a category with this name already exists"))?;
    info!(category_id = %created.id, "category_created");
    Ok(created)
}

pub async fn update_category(
    db: &DatabaseConnection,
    principal: &Principal,
    id: Uuid,
    input: category::CategoryInput,
) -> Result<category::Model, ServiceError> {
    require_superuser(principal)?;
    input.validate()?;
    let mut am: category::ActiveModel = get_category(db, id).await?.into();
    am.name = Set(input.name.trim().to_string());
    am.description = Set(validate::blank_to_none(input.description));
    am.update(db)
        .await
        .map_err(|e| db_unique_as_validation(e, "a category with this name already exists"))
}

pub async fn delete_category(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let res = category::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| db_in_use_as_validation(e, "category is still used by companies, products or services"))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("category"));
    }
    Ok(())
}

pub async fn list_icons(db: &DatabaseConnection) -> Result<Vec<icon::Model>, ServiceError> {
    Ok(icon::Entity::find().order_by_asc(icon::Column::Name).all(db).await?)
}

pub async fn create_icon(db: &DatabaseConnection, principal: &Principal, input: icon::IconInput) -> Result<icon::Model, ServiceError> {
    require_superuser(principal)?;
    icon::create(db, input)
        .await
        .map_err(|e| unique_as_validation(e, "an icon with this name already exists"))
}

pub async fn update_icon(db: &DatabaseConnection, principal: &Principal, id: Uuid, input: icon::IconInput) -> Result<icon::Model, ServiceError> {
    require_superuser(principal)?;
    input.validate()?;
    let mut am: icon::ActiveModel = icon::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("icon"))?
        .into();
    am.name = Set(input.name.trim().to_string());
    am.code = Set(input.code.trim().to_string());
    am.update(db)
        .await
        .map_err(|e| db_unique_as_validation(e, "an icon with this name already exists"))
}

pub async fn delete_icon(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let res = icon::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| db_in_use_as_validation(e, "icon is still used"))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("icon"));
    }
    Ok(())
}

pub async fn list_social_networks(db: &DatabaseConnection) -> Result<Vec<social_network::Model>, ServiceError> {
    Ok(social_network::Entity::find().order_by_asc(social_network::Column::Name).all(db).await?)
}

pub async fn create_social_network(
    db: &DatabaseConnection,
    principal: &Principal,
    input: social_network::SocialNetworkInput,
) -> Result<social_network::Model, ServiceError> {
    require_superuser(principal)?;
    social_network::create(db, input)
        .await
        .map_err(|e| unique_as_validation(e, "a social network with this name already exists"))
}

pub async fn update_social_network(
    db: &DatabaseConnection,
    principal: &Principal,
    id: Uuid,
    input: social_network::SocialNetworkInput,
) -> Result<social_network::Model, ServiceError> {
    require_superuser(principal)?;
    input.validate()?;
    let mut am: social_network::ActiveModel = social_network::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("social network"))?
        .into();
    am.name = Set(input.name.trim().to_string());
    am.base_url = Set(input.base_url.trim().to_string());
    am.icon_id = Set(input.icon_id);
    am.update(db)
        .await
        .map_err(|e| db_unique_as_validation(e, "a social network with this name already exists"))
}

pub async fn delete_social_network(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let res = social_network::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("social network"));
    }
    Ok(())
}
