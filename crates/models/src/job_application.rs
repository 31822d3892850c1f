use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

/// Upper bound for an uploaded CV.
pub const MAX_CV_BYTES: i64 = 5 * 1024 * 1024;
pub const CV_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub desired_position: String,
    pub relevant_experience: String,
    pub cover_letter: String,
    pub cv_url: String,
    pub cv_file_name: String,
    pub cv_size_bytes: i64,
    pub applied_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn cv_download_url(&self) -> Option<String> {
        cv_download_url(&self.cv_url)
    }
}

/// Rewrite a media-service URL so the browser downloads the file instead of previewing it.
pub fn cv_download_url(url: &str) -> Option<String> {
    if url.trim().is_empty() {
        return None;
    }
    Some(url.replace("/upload/", "/upload/fl_attachment/"))
}

pub fn validate_cv(file_name: &str, size_bytes: i64) -> Result<(), errors::ModelError> {
    if size_bytes > MAX_CV_BYTES {
        return Err(errors::ModelError::Validation("CV file must not exceed 5MB".into()));
    }
    if size_bytes <= 0 {
        return Err(errors::ModelError::Validation("CV file is empty".into()));
    }
    let ext = file_name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    if !file_name.contains('.') || !CV_EXTENSIONS.contains(&ext.as_str()) {
        return Err(errors::ModelError::Validation("only PDF or Word files are allowed".into()));
    }
    Ok(())
}

/// Submission with the CV already uploaded to the media service.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct JobApplicationInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub desired_position: String,
    pub relevant_experience: String,
    pub cover_letter: String,
    pub cv_url: String,
    pub cv_file_name: String,
    pub cv_size_bytes: i64,
}

impl JobApplicationInput {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate::required("full_name", &self.full_name, 200)?;
        validate::email("email", &self.email)?;
        validate::required("phone", &self.phone, 20)?;
        validate::required("desired_position", &self.desired_position, 100)?;
        validate::required("relevant_experience", &self.relevant_experience, usize::MAX)?;
        validate::required("cover_letter", &self.cover_letter, usize::MAX)?;
        validate::url("cv_url", &self.cv_url)?;
        validate_cv(&self.cv_file_name, self.cv_size_bytes)
    }
}

pub async fn create(db: &DatabaseConnection, input: JobApplicationInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set(input.full_name.trim().to_string()),
        email: Set(input.email.trim().to_string()),
        phone: Set(input.phone.trim().to_string()),
        desired_position: Set(input.desired_position.trim().to_string()),
        relevant_experience: Set(input.relevant_experience),
        cover_letter: Set(input.cover_letter),
        cv_url: Set(input.cv_url),
        cv_file_name: Set(input.cv_file_name),
        cv_size_bytes: Set(input.cv_size_bytes),
        applied_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
