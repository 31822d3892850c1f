//! Products and their features. Admin paths are scoped to the principal's company.

use std::collections::HashMap;

use common::types::Page;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::{category, company, product, product_feature};

use crate::access::{self, Principal};
use crate::errors::ServiceError;
use crate::pagination::{fetch_page, Pagination};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub search: Option<String>,
}

impl ProductFilter {
    fn apply(&self, mut select: Select<product::Entity>) -> Select<product::Entity> {
        if let Some(cat) = self.category_id {
            select = select.filter(product::Column::CategoryId.eq(cat));
        }
        if let Some(owner) = self.company_id {
            select = select.filter(product::Column::CompanyId.eq(owner));
        }
        if let Some(q) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(product::Column::Name.contains(q))
                    .add(product::Column::Description.contains(q)),
            );
        }
        select.order_by_asc(product::Column::Name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureView {
    pub id: Uuid,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: product::Model,
    pub category_name: Option<String>,
    pub features: Vec<FeatureView>,
}

/// Attach category names and features with two extra queries, whatever the row count.
pub async fn with_details(db: &DatabaseConnection, products: Vec<product::Model>) -> Result<Vec<ProductView>, ServiceError> {
    if products.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    let category_ids: Vec<Uuid> = products.iter().map(|p| p.category_id).collect();

    let mut features: HashMap<Uuid, Vec<FeatureView>> = HashMap::new();
    for f in product_feature::Entity::find()
        .filter(product_feature::Column::ProductId.is_in(ids))
        .order_by_asc(product_feature::Column::Name)
        .all(db)
        .await?
    {
        features.entry(f.product_id).or_default().push(FeatureView { id: f.id, name: f.name, value: f.value });
    }
    let names: HashMap<Uuid, String> = category::Entity::find()
        .filter(category::Column::Id.is_in(category_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    Ok(products
        .into_iter()
        .map(|p| ProductView {
            category_name: names.get(&p.category_id).cloned(),
            features: features.remove(&p.id).unwrap_or_default(),
            product: p,
        })
        .collect())
}

#[instrument(skip(db))]
pub async fn list_public(db: &DatabaseConnection, filter: &ProductFilter, page: Pagination) -> Result<Page<ProductView>, ServiceError> {
    let select = filter.apply(product::Entity::find().filter(product::Column::Active.eq(true)));
    let Page { items, page, per_page, total } = fetch_page(db, select, page).await?;
    let items = with_details(db, items).await?;
    Ok(Page { items, page, per_page, total })
}

#[instrument(skip(db))]
pub async fn get_public(db: &DatabaseConnection, id: Uuid) -> Result<ProductView, ServiceError> {
    let found = product::Entity::find_by_id(id)
        .filter(product::Column::Active.eq(true))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("product"))?;
    let mut views = with_details(db, vec![found]).await?;
    views.pop().ok_or_else(|| ServiceError::not_found("product"))
}

#[instrument(skip(db, principal))]
pub async fn list_scoped(
    db: &DatabaseConnection,
    principal: &Principal,
    filter: &ProductFilter,
    page: Pagination,
) -> Result<Page<product::Model>, ServiceError> {
    match access::visible_scope(principal).restrict(product::Entity::find()) {
        Some(select) => Ok(fetch_page(db, filter.apply(select), page).await?),
        None => Ok(page.empty()),
    }
}

pub async fn get_scoped(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<product::Model, ServiceError> {
    let select = access::visible_scope(principal)
        .restrict(product::Entity::find_by_id(id))
        .ok_or_else(|| ServiceError::not_found("product"))?;
    select.one(db).await?.ok_or_else(|| ServiceError::not_found("product"))
}

pub async fn detail_scoped(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<ProductView, ServiceError> {
    let found = get_scoped(db, principal, id).await?;
    let mut views = with_details(db, vec![found]).await?;
    views.pop().ok_or_else(|| ServiceError::not_found("product"))
}

/// Companies the principal may pick when creating or moving a product.
pub async fn company_choices(db: &DatabaseConnection, principal: &Principal) -> Result<Vec<company::Model>, ServiceError> {
    match access::allowed_company_choices(principal).restrict(company::Entity::find()) {
        Some(select) => Ok(select.order_by_asc(company::Column::Name).all(db).await?),
        None => Ok(Vec::new()),
    }
}

fn ensure_company_allowed(principal: &Principal, company_id: Uuid) -> Result<(), ServiceError> {
    if access::allowed_company_choices(principal).admits(company_id) {
        Ok(())
    } else {
        warn!(company_id = %company_id, "product_company_not_allowed");
        Err(ServiceError::forbidden("assign products to this company"))
    }
}

#[instrument(skip(db, principal, input), fields(company_id = %input.company_id))]
pub async fn create(db: &DatabaseConnection, principal: &Principal, input: product::ProductInput) -> Result<product::Model, ServiceError> {
    if !access::can_write::<product::Model>(principal, None) {
        return Err(ServiceError::forbidden("create products"));
    }
    ensure_company_allowed(principal, input.company_id)?;
    let created = product::create(db, input).await?;
    info!(product_id = %created.id, "product_created");
    Ok(created)
}

#[instrument(skip(db, principal, input))]
pub async fn update(
    db: &DatabaseConnection,
    principal: &Principal,
    id: Uuid,
    input: product::ProductInput,
) -> Result<product::Model, ServiceError> {
    let existing = get_scoped(db, principal, id).await?;
    if !access::can_write(principal, Some(&existing)) {
        return Err(ServiceError::forbidden("edit this product"));
    }
    ensure_company_allowed(principal, input.company_id)?;
    input.validate()?;
    let mut am: product::ActiveModel = existing.into();
    input.apply(&mut am);
    Ok(am.update(db).await?)
}

#[instrument(skip(db, principal))]
pub async fn delete(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    let existing = get_scoped(db, principal, id).await?;
    if !access::can_delete(principal, &existing) {
        return Err(ServiceError::forbidden("delete this product"));
    }
    product::Entity::delete_by_id(existing.id).exec(db).await?;
    info!(product_id = %id, "product_deleted");
    Ok(())
}

pub async fn list_features(db: &DatabaseConnection, principal: &Principal, product_id: Uuid) -> Result<Vec<product_feature::Model>, ServiceError> {
    let owner = get_scoped(db, principal, product_id).await?;
    Ok(product_feature::Entity::find()
        .filter(product_feature::Column::ProductId.eq(owner.id))
        .order_by_asc(product_feature::Column::Name)
        .all(db)
        .await?)
}

pub async fn add_feature(
    db: &DatabaseConnection,
    principal: &Principal,
    product_id: Uuid,
    input: product_feature::FeatureInput,
) -> Result<product_feature::Model, ServiceError> {
    let owner = get_scoped(db, principal, product_id).await?;
    if !access::can_write(principal, Some(&owner)) {
        return Err(ServiceError::forbidden("edit this product"));
    }
    Ok(product_feature::create(db, owner.id, input).await?)
}

pub async fn remove_feature(db: &DatabaseConnection, principal: &Principal, feature_id: Uuid) -> Result<(), ServiceError> {
    let feature = product_feature::Entity::find_by_id(feature_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("feature"))?;
    let owner = get_scoped(db, principal, feature.product_id).await?;
    if !access::can_write(principal, Some(&owner)) {
        return Err(ServiceError::forbidden("edit this product"));
    }
    product_feature::Entity::delete_by_id(feature.id).exec(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use crate::test_support::{get_db, superuser, unique};
    use crate::company_service;

    async fn seed_company(db: &DatabaseConnection, category_id: Uuid) -> Result<company::Model, anyhow::Error> {
        let input: company::CompanyInput = serde_json::from_value(serde_json::json!({
            "name": unique("co"),
            "category_id": category_id,
            "description": "seeded",
            "phone": "022000000",
            "address": "Quito"
        }))?;
        Ok(company_service::create(db, &superuser(), input).await?)
    }

    fn product_input(company_id: Uuid, category_id: Uuid) -> product::ProductInput {
        product::ProductInput {
            name: unique("prod"),
            company_id,
            category_id,
            description: "seeded".into(),
            price: Decimal::new(1999, 2),
            image_url: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn company_user_sees_and_edits_only_own_products() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let cat = category::create(&db, category::CategoryInput { name: unique("cat"), description: None }).await?;
        let five = seed_company(&db, cat.id).await?;
        let seven = seed_company(&db, cat.id).await?;
        let admin = superuser();
        create(&db, &admin, product_input(five.id, cat.id)).await?;
        create(&db, &admin, product_input(five.id, cat.id)).await?;
        let foreign = create(&db, &admin, product_input(seven.id, cat.id)).await?;

        let owner = Principal::CompanyUser { user_id: Uuid::new_v4(), company_id: five.id };
        let page = list_scoped(&db, &owner, &ProductFilter::default(), Pagination::default()).await?;
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|p| p.company_id == five.id));

        // Out-of-scope rows look missing
        assert!(matches!(get_scoped(&db, &owner, foreign.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(create(&db, &owner, product_input(seven.id, cat.id)).await, Err(ServiceError::Forbidden(_))));

        let mine = create(&db, &owner, product_input(five.id, cat.id)).await?;
        let moved = update(&db, &owner, mine.id, product_input(seven.id, cat.id)).await;
        assert!(matches!(moved, Err(ServiceError::Forbidden(_))));
        delete(&db, &owner, mine.id).await?;

        let choices = company_choices(&db, &owner).await?;
        assert_eq!(choices.iter().map(|c| c.id).collect::<Vec<_>>(), vec![five.id]);

        assert!(matches!(
            company_service::delete(&db, &owner, five.id).await,
            Err(ServiceError::Forbidden(_))
        ));
        let anon = list_scoped(&db, &Principal::Anonymous, &ProductFilter::default(), Pagination::default()).await?;
        assert_eq!(anon.total, 0);

        company_service::delete(&db, &admin, five.id).await?;
        company_service::delete(&db, &admin, seven.id).await?;
        category::Entity::delete_by_id(cat.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn public_listing_hides_inactive_products() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let cat = category::create(&db, category::CategoryInput { name: unique("cat"), description: None }).await?;
        let co = seed_company(&db, cat.id).await?;
        let admin = superuser();
        let shown = create(&db, &admin, product_input(co.id, cat.id)).await?;
        let mut hidden_input = product_input(co.id, cat.id);
        hidden_input.active = false;
        let hidden = create(&db, &admin, hidden_input).await?;
        add_feature(&db, &admin, shown.id, product_feature::FeatureInput { name: "Color".into(), value: "Red".into() }).await?;

        let filter = ProductFilter { company_id: Some(co.id), ..Default::default() };
        let page = list_public(&db, &filter, Pagination::default()).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].product.id, shown.id);
        assert_eq!(page.items[0].features.len(), 1);
        assert!(matches!(get_public(&db, hidden.id).await, Err(ServiceError::NotFound(_))));

        company_service::delete(&db, &admin, co.id).await?;
        category::Entity::delete_by_id(cat.id).exec(&db).await?;
        Ok(())
    }
}
