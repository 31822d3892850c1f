//! Companies: public directory reads and scoped administration.

use std::collections::HashMap;

use common::types::Page;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{category, company, company_social_network, product, social_network};

use crate::access::{self, Principal};
use crate::errors::{unique_as_validation, ServiceError};
use crate::pagination::{fetch_page, Pagination};
use crate::product_service::{self, ProductView};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyFilter {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
}

impl CompanyFilter {
    fn apply(&self, mut select: sea_orm::Select<company::Entity>) -> sea_orm::Select<company::Entity> {
        if let Some(cat) = self.category_id {
            select = select.filter(company::Column::CategoryId.eq(cat));
        }
        if let Some(q) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(company::Column::Name.contains(q))
                    .add(company::Column::Description.contains(q)),
            );
        }
        select.order_by_asc(company::Column::Name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLinkView {
    #[serde(flatten)]
    pub link: company_social_network::Model,
    pub network_name: Option<String>,
}

/// A company with its products and social-network links.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: company::Model,
    pub category_name: Option<String>,
    pub products: Vec<ProductView>,
    pub social_networks: Vec<SocialLinkView>,
}

#[instrument(skip(db))]
pub async fn list_public(db: &DatabaseConnection, filter: &CompanyFilter, page: Pagination) -> Result<Page<company::Model>, ServiceError> {
    let select = filter.apply(company::Entity::find().filter(company::Column::Active.eq(true)));
    Ok(fetch_page(db, select, page).await?)
}

/// Active company with only its active products.
#[instrument(skip(db))]
pub async fn get_public(db: &DatabaseConnection, id: Uuid) -> Result<CompanyDetail, ServiceError> {
    let found = company::Entity::find_by_id(id)
        .filter(company::Column::Active.eq(true))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("company"))?;
    detail(db, found, true).await
}

#[instrument(skip(db, principal))]
pub async fn list_scoped(
    db: &DatabaseConnection,
    principal: &Principal,
    filter: &CompanyFilter,
    page: Pagination,
) -> Result<Page<company::Model>, ServiceError> {
    match access::visible_scope(principal).restrict(company::Entity::find()) {
        Some(select) => Ok(fetch_page(db, filter.apply(select), page).await?),
        None => Ok(page.empty()),
    }
}

/// Rows outside the principal's scope are reported as missing.
pub async fn get_scoped(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<company::Model, ServiceError> {
    let select = access::visible_scope(principal)
        .restrict(company::Entity::find_by_id(id))
        .ok_or_else(|| ServiceError::not_found("company"))?;
    select.one(db).await?.ok_or_else(|| ServiceError::not_found("company"))
}

pub async fn detail_scoped(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<CompanyDetail, ServiceError> {
    let found = get_scoped(db, principal, id).await?;
    detail(db, found, false).await
}

#[instrument(skip(db, principal, input), fields(name = %input.name))]
pub async fn create(db: &DatabaseConnection, principal: &Principal, input: company::CompanyInput) -> Result<company::Model, ServiceError> {
    if !access::can_write::<company::Model>(principal, None) {
        return Err(ServiceError::forbidden("create companies"));
    }
    let created = company::create(db, input).await?;
    info!(company_id = %created.id, "company_created");
    Ok(created)
}

#[instrument(skip(db, principal, input))]
pub async fn update(
    db: &DatabaseConnection,
    principal: &Principal,
    id: Uuid,
    input: company::CompanyInput,
) -> Result<company::Model, ServiceError> {
    let existing = get_scoped(db, principal, id).await?;
    if !access::can_write(principal, Some(&existing)) {
        return Err(ServiceError::forbidden("edit this company"));
    }
    input.validate()?;
    let mut am: company::ActiveModel = existing.into();
    input.apply(&mut am);
    Ok(am.update(db).await?)
}

#[instrument(skip(db, principal))]
pub async fn delete(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    let existing = get_scoped(db, principal, id).await?;
    if !access::can_delete(principal, &existing) {
        return Err(ServiceError::forbidden("delete this company"));
    }
    company::Entity::delete_by_id(existing.id).exec(db).await?;
    info!(company_id = %id, "company_deleted");
    Ok(())
}

pub async fn add_social_link(
    db: &DatabaseConnection,
    principal: &Principal,
    company_id: Uuid,
    input: company_social_network::LinkInput,
) -> Result<company_social_network::Model, ServiceError> {
    let owner = get_scoped(db, principal, company_id).await?;
    if !access::can_write(principal, Some(&owner)) {
        return Err(ServiceError::forbidden("edit this company"));
    }
    company_social_network::create(db, owner.id, input)
        .await
        .map_err(|e| unique_as_validation(e, "this company already links that social network"))
}

pub async fn remove_social_link(db: &DatabaseConnection, principal: &Principal, link_id: Uuid) -> Result<(), ServiceError> {
    let link = company_social_network::Entity::find_by_id(link_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("social link"))?;
    let owner = get_scoped(db, principal, link.company_id).await?;
    if !access::can_write(principal, Some(&owner)) {
        return Err(ServiceError::forbidden("edit this company"));
    }
    company_social_network::Entity::delete_by_id(link.id).exec(db).await?;
    Ok(())
}

async fn detail(db: &DatabaseConnection, company: company::Model, active_products_only: bool) -> Result<CompanyDetail, ServiceError> {
    let category_name = category::Entity::find_by_id(company.category_id).one(db).await?.map(|c| c.name);

    let mut products = product::Entity::find().filter(product::Column::CompanyId.eq(company.id));
    if active_products_only {
        products = products.filter(product::Column::Active.eq(true));
    }
    let products = products.order_by_asc(product::Column::Name).all(db).await?;
    let products = product_service::with_details(db, products).await?;

    let links = company_social_network::Entity::find()
        .filter(company_social_network::Column::CompanyId.eq(company.id))
        .all(db)
        .await?;
    let network_ids: Vec<Uuid> = links.iter().map(|l| l.social_network_id).collect();
    let names: HashMap<Uuid, String> = social_network::Entity::find()
        .filter(social_network::Column::Id.is_in(network_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|n| (n.id, n.name))
        .collect();
    let social_networks = links
        .into_iter()
        .map(|link| SocialLinkView { network_name: names.get(&link.social_network_id).cloned(), link })
        .collect();

    Ok(CompanyDetail { company, category_name, products, social_networks })
}

