use std::str::FromStr;

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use super::setup_test_db;
use crate::errors::ModelError;
use crate::{category, company, company_user, partner_application, product, testimonial, user};

fn unique(prefix: &str) -> String {
    format!("{prefix}_{}", &Uuid::new_v4().simple().to_string()[..8])
}

async fn seed_company(db: &sea_orm::DatabaseConnection) -> Result<(category::Model, company::Model)> {
    let cat = category::create(db, category::CategoryInput { name: unique("cat"), description: None }).await?;
    let input: company::CompanyInput = serde_json::from_value(serde_json::json!({
        "name": unique("company"),
        "category_id": cat.id,
        "description": "test company",
        "phone": "022000000",
        "address": "Quito"
    }))?;
    let comp = company::create(db, input).await?;
    Ok((cat, comp))
}

#[tokio::test]
async fn test_company_and_product_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let (cat, comp) = seed_company(&db).await?;
    assert_eq!(comp.ruc.as_deref(), Some(company::DEFAULT_RUC));
    assert!(comp.active);

    let prod = product::create(&db, product::ProductInput {
        name: "Hammer".into(),
        company_id: comp.id,
        category_id: cat.id,
        description: "steel".into(),
        price: Decimal::from_str("12.50")?,
        image_url: Some(String::new()),
        active: true,
    }).await?;
    assert_eq!(prod.price, Decimal::from_str("12.50")?);
    assert_eq!(prod.image_url, None);

    let found = product::Entity::find()
        .filter(product::Column::CompanyId.eq(comp.id))
        .all(&db)
        .await?;
    assert_eq!(found.len(), 1);

    company::set_active(&db, comp.id, false).await?;
    let reloaded = company::Entity::find_by_id(comp.id).one(&db).await?.expect("company");
    assert!(!reloaded.active);

    // Product rows cascade with the company
    company::Entity::delete_by_id(comp.id).exec(&db).await?;
    assert!(product::Entity::find_by_id(prod.id).one(&db).await?.is_none());
    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_testimonial_starts_unapproved() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let (cat, comp) = seed_company(&db).await?;
    let t = testimonial::create(&db, testimonial::TestimonialInput {
        name: "Ana".into(),
        position: "CEO".into(),
        company_id: comp.id,
        comment: "great".into(),
    }).await?;
    assert!(!t.approved);
    assert_eq!(t.created_on, Utc::now().date_naive());

    company::Entity::delete_by_id(comp.id).exec(&db).await?;
    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_company_user_is_one_to_one() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let (cat, comp) = seed_company(&db).await?;
    let first = user::create(&db, &user::NewUser {
        username: unique("owner"),
        email: "owner@example.com".into(),
        is_staff: false,
        is_superuser: false,
    }).await?;
    let second = user::create(&db, &user::NewUser {
        username: unique("other"),
        email: "other@example.com".into(),
        is_staff: false,
        is_superuser: false,
    }).await?;

    let bind = |user_id: Uuid| company_user::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        company_id: Set(comp.id),
        assigned_at: Set(Utc::now().into()),
    };
    bind(first.id).insert(&db).await?;
    let err = bind(second.id).insert(&db).await.expect_err("company already bound");
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            assert!(msg.contains(company_user::COMPANY_UNIQUE_INDEX), "{msg}")
        }
        other => panic!("unexpected error: {other:?}"),
    }

    user::hard_delete(&db, first.id).await?;
    user::hard_delete(&db, second.id).await?;
    company::Entity::delete_by_id(comp.id).exec(&db).await?;
    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_partner_application_defaults_to_pending() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let email = format!("{}@example.com", unique("partner"));
    let app = partner_application::create(&db, partner_application::PartnerInput {
        first_name: "Luis".into(),
        last_name: "Mora".into(),
        national_id: Some(String::new()),
        email: email.clone(),
        phone: "0999".into(),
        company: "Mora SA".into(),
        position: "Owner".into(),
        address: "Cuenca".into(),
        city: "Cuenca".into(),
        company_description: "Textiles".into(),
        reason: "Visibility".into(),
    }).await?;
    assert_eq!(app.status, partner_application::ApplicationStatus::Pending.as_str());
    assert_eq!(app.national_id, None);

    partner_application::Entity::delete_by_id(app.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_partner_duplicates_report_their_constraint() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let national_id = Uuid::new_v4().simple().to_string()[..12].to_string();
    let input = |email: String| partner_application::PartnerInput {
        first_name: "Rosa".into(),
        last_name: "Vera".into(),
        national_id: Some(format!(" {national_id} ")),
        email,
        phone: "0977".into(),
        company: "Vera Cia".into(),
        position: "Manager".into(),
        address: "Loja".into(),
        city: "Loja".into(),
        company_description: "Coffee".into(),
        reason: "Partnership".into(),
    };
    let first_email = format!("{}@example.com", unique("vera"));
    let first = partner_application::create(&db, input(first_email.clone())).await?;
    assert_eq!(first.national_id.as_deref(), Some(national_id.as_str()));

    let same_id = partner_application::create(&db, input(format!("{}@example.com", unique("vera")))).await;
    assert!(matches!(&same_id, Err(ModelError::Duplicate(c)) if c == partner_application::NATIONAL_ID_KEY), "{same_id:?}");

    let same_email = partner_application::create(&db, partner_application::PartnerInput {
        national_id: None,
        ..input(first_email)
    }).await;
    assert!(matches!(&same_email, Err(ModelError::Duplicate(c)) if c == partner_application::EMAIL_KEY), "{same_email:?}");

    partner_application::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}
