use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{category, errors, validate};

pub const DEFAULT_RUC: &str = "1234567890001";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Ecuadorian taxpayer number (13 digits).
    pub ruc: Option<String>,
    pub name: String,
    pub category_id: Uuid,
    pub description: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: String,
    pub registered_at: DateTimeWithTimeZone,
    pub active: bool,
    pub logo_url: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn default_ruc() -> Option<String> { Some(DEFAULT_RUC.into()) }
fn default_active() -> bool { true }
fn default_facebook() -> Option<String> { Some("https://www.facebook.com/".into()) }
fn default_twitter() -> Option<String> { Some("https://www.twitter.com/".into()) }
fn default_instagram() -> Option<String> { Some("https://www.instagram.com/".into()) }
fn default_tiktok() -> Option<String> { Some("https://www.tiktok.com/".into()) }
fn default_linkedin() -> Option<String> { Some("https://www.linkedin.com/".into()) }

/// Full set of writable company fields. Social profile links default to the network home page.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CompanyInput {
    #[serde(default = "default_ruc")]
    pub ruc: Option<String>,
    pub name: String,
    pub category_id: Uuid,
    pub description: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub address: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default = "default_facebook")]
    pub facebook: Option<String>,
    #[serde(default = "default_twitter")]
    pub twitter: Option<String>,
    #[serde(default = "default_instagram")]
    pub instagram: Option<String>,
    #[serde(default = "default_tiktok")]
    pub tiktok: Option<String>,
    #[serde(default = "default_linkedin")]
    pub linkedin: Option<String>,
}

pub fn validate_ruc(ruc: Option<&str>) -> Result<(), errors::ModelError> {
    match ruc {
        Some(r) if !r.is_empty() && (r.len() > 13 || !r.chars().all(|c| c.is_ascii_digit())) => {
            Err(errors::ModelError::Validation("ruc must be up to 13 digits".into()))
        }
        _ => Ok(()),
    }
}

impl CompanyInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_ruc(self.ruc.as_deref())?;
        validate::required("name", &self.name, 100)?;
        validate::required("description", &self.description, usize::MAX)?;
        validate::required("phone", &self.phone, 20)?;
        validate::required("address", &self.address, 200)?;
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            validate::email("email", email)?;
        }
        validate::optional_url("website", self.website.as_deref())?;
        for (field, value) in [
            ("facebook", &self.facebook),
            ("twitter", &self.twitter),
            ("instagram", &self.instagram),
            ("tiktok", &self.tiktok),
            ("linkedin", &self.linkedin),
        ] {
            validate::optional(field, value.as_deref(), 100)?;
        }
        Ok(())
    }

    /// Copy every writable field onto an active model, leaving id and registration time untouched.
    pub fn apply(self, am: &mut ActiveModel) {
        am.ruc = Set(validate::blank_to_none(self.ruc));
        am.name = Set(self.name.trim().to_string());
        am.category_id = Set(self.category_id);
        am.description = Set(self.description);
        am.phone = Set(self.phone.trim().to_string());
        am.email = Set(validate::blank_to_none(self.email));
        am.website = Set(validate::blank_to_none(self.website));
        am.address = Set(self.address);
        am.active = Set(self.active);
        am.logo_url = Set(validate::blank_to_none(self.logo_url));
        am.facebook = Set(validate::blank_to_none(self.facebook));
        am.twitter = Set(validate::blank_to_none(self.twitter));
        am.instagram = Set(validate::blank_to_none(self.instagram));
        am.tiktok = Set(validate::blank_to_none(self.tiktok));
        am.linkedin = Set(validate::blank_to_none(self.linkedin));
    }
}

pub async fn create(db: &DatabaseConnection, input: CompanyInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let mut am = ActiveModel {
        id: Set(Uuid::new_v4()),
        registered_at: Set(Utc::now().into()),
        ..Default::default()
    };
    input.apply(&mut am);
    am.insert(db).await.map_err(errors::ModelError::from)
}

pub async fn set_active(db: &DatabaseConnection, id: Uuid, active: bool) -> Result<(), errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(errors::ModelError::from)?
        .ok_or_else(|| errors::ModelError::Validation("company not found".into()))?
        .into();
    found.active = Set(active);
    found.update(db).await.map_err(errors::ModelError::from)?;
    Ok(())
}
