use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partner_application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    pub address: String,
    pub city: String,
    pub company_description: String,
    pub reason: String,
    pub submitted_at: DateTimeWithTimeZone,
    pub status: String,
    pub admin_notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Review state of a partnership request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ApplicationStatus {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(errors::ModelError::Validation(format!("unknown status: {other}"))),
        }
    }
}

/// Public submission. `status` and `submitted_at` are not accepted from the client.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PartnerInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub national_id: Option<String>,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    pub address: String,
    pub city: String,
    pub company_description: String,
    pub reason: String,
}

impl PartnerInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("first_name", &self.first_name, 100)?;
        validate::required("last_name", &self.last_name, 100)?;
        validate::optional("national_id", self.national_id.as_deref(), 20)?;
        validate::email("email", &self.email)?;
        validate::required("phone", &self.phone, 20)?;
        validate::required("company", &self.company, 200)?;
        validate::required("position", &self.position, 100)?;
        validate::required("address", &self.address, usize::MAX)?;
        validate::required("city", &self.city, 100)?;
        validate::required("company_description", &self.company_description, usize::MAX)?;
        validate::required("reason", &self.reason, usize::MAX)
    }
}

/// Postgres names for the two unique columns.
pub const EMAIL_KEY: &str = "partner_application_email_key";
pub const NATIONAL_ID_KEY: &str = "partner_application_national_id_key";

/// Trimmed national ID, `None` when blank.
pub fn normalized_national_id(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub async fn create(db: &DatabaseConnection, input: PartnerInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(input.first_name.trim().to_string()),
        last_name: Set(input.last_name.trim().to_string()),
        national_id: Set(normalized_national_id(input.national_id.as_deref())),
        email: Set(input.email.trim().to_ascii_lowercase()),
        phone: Set(input.phone.trim().to_string()),
        company: Set(input.company.trim().to_string()),
        position: Set(input.position.trim().to_string()),
        address: Set(input.address),
        city: Set(input.city.trim().to_string()),
        company_description: Set(input.company_description),
        reason: Set(input.reason),
        submitted_at: Set(Utc::now().into()),
        status: Set(ApplicationStatus::Pending.as_str().to_string()),
        admin_notes: Set(None),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
