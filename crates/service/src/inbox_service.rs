//! Public submissions: contact messages, partner applications and job applications.
//!
//! Submitting is open to anyone; reading and triage are superuser only. All
//! listings are newest first.

use common::types::Page;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::partner_application::ApplicationStatus;
use models::{contact_message, job_application, partner_application, validate};

use crate::access::service::require_superuser;
use crate::access::Principal;
use crate::errors::{unique_by_constraint, ServiceError};
use crate::pagination::{fetch_page, Pagination};

pub const DUPLICATE_PARTNER_EMAIL: &str = "an application with this email already exists";
pub const DUPLICATE_PARTNER_NATIONAL_ID: &str = "an application with this national ID already exists";

#[instrument(skip(db, input))]
pub async fn submit_contact(db: &DatabaseConnection, input: contact_message::ContactInput) -> Result<contact_message::Model, ServiceError> {
    let created = contact_message::create(db, input).await?;
    info!(message_id = %created.id, "contact_message_received");
    Ok(created)
}

pub async fn list_contacts(
    db: &DatabaseConnection,
    principal: &Principal,
    search: Option<&str>,
    page: Pagination,
) -> Result<Page<contact_message::Model>, ServiceError> {
    require_superuser(principal)?;
    let mut select = contact_message::Entity::find().order_by_desc(contact_message::Column::CreatedAt);
    if let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(contact_message::Column::Name.contains(q))
                .add(contact_message::Column::Email.contains(q))
                .add(contact_message::Column::Message.contains(q)),
        );
    }
    Ok(fetch_page(db, select, page).await?)
}

pub async fn set_contact_read(db: &DatabaseConnection, principal: &Principal, id: Uuid, read: bool) -> Result<contact_message::Model, ServiceError> {
    require_superuser(principal)?;
    let mut am: contact_message::ActiveModel = contact_message::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("message"))?
        .into();
    am.read = Set(read);
    Ok(am.update(db).await?)
}

pub async fn delete_contact(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let res = contact_message::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("message"));
    }
    Ok(())
}

#[instrument(skip(db, input))]
pub async fn submit_partner(db: &DatabaseConnection, input: partner_application::PartnerInput) -> Result<partner_application::Model, ServiceError> {
    input.validate()?;
    let email = input.email.trim().to_ascii_lowercase();
    let email_taken = partner_application::Entity::find()
        .filter(partner_application::Column::Email.eq(email))
        .one(db)
        .await?
        .is_some();
    if email_taken {
        warn!("partner_application_duplicate_email");
        return Err(ServiceError::Validation(DUPLICATE_PARTNER_EMAIL.into()));
    }
    if let Some(national_id) = partner_application::normalized_national_id(input.national_id.as_deref()) {
        let id_taken = partner_application::Entity::find()
            .filter(partner_application::Column::NationalId.eq(national_id))
            .one(db)
            .await?
            .is_some();
        if id_taken {
            warn!("partner_application_duplicate_national_id");
            return Err(ServiceError::Validation(DUPLICATE_PARTNER_NATIONAL_ID.into()));
        }
    }
    // The unique indexes still catch a concurrent duplicate.
    let created = partner_application::create(db, input).await.map_err(|e| {
        unique_by_constraint(
            e,
            &[
                (partner_application::EMAIL_KEY, DUPLICATE_PARTNER_EMAIL),
                (partner_application::NATIONAL_ID_KEY, DUPLICATE_PARTNER_NATIONAL_ID),
            ],
        )
    })?;
    info!(application_id = %created.id, "partner_application_received");
    Ok(created)
}

pub async fn list_partners(
    db: &DatabaseConnection,
    principal: &Principal,
    status: Option<ApplicationStatus>,
    page: Pagination,
) -> Result<Page<partner_application::Model>, ServiceError> {
    require_superuser(principal)?;
    let mut select = partner_application::Entity::find().order_by_desc(partner_application::Column::SubmittedAt);
    if let Some(s) = status {
        select = select.filter(partner_application::Column::Status.eq(s.as_str()));
    }
    Ok(fetch_page(db, select, page).await?)
}

pub async fn get_partner(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<partner_application::Model, ServiceError> {
    require_superuser(principal)?;
    partner_application::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("application"))
}

/// Triage fields. The applicant's own data, email included, is not editable.
#[derive(Debug, Clone, Deserialize)]
pub struct PartnerReview {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

#[instrument(skip(db, principal, review), fields(status = %review.status))]
pub async fn review_partner(
    db: &DatabaseConnection,
    principal: &Principal,
    id: Uuid,
    review: PartnerReview,
) -> Result<partner_application::Model, ServiceError> {
    let mut am: partner_application::ActiveModel = get_partner(db, principal, id).await?.into();
    am.status = Set(review.status.as_str().to_string());
    am.admin_notes = Set(validate::blank_to_none(review.admin_notes));
    Ok(am.update(db).await?)
}

pub async fn delete_partner(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    let existing = get_partner(db, principal, id).await?;
    partner_application::Entity::delete_by_id(existing.id).exec(db).await?;
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct JobApplicationView {
    #[serde(flatten)]
    pub application: job_application::Model,
    pub cv_download_url: Option<String>,
}

impl From<job_application::Model> for JobApplicationView {
    fn from(m: job_application::Model) -> Self {
        Self { cv_download_url: m.cv_download_url(), application: m }
    }
}

#[instrument(skip(db, input), fields(file = %input.cv_file_name, size = input.cv_size_bytes))]
pub async fn submit_job_application(
    db: &DatabaseConnection,
    input: job_application::JobApplicationInput,
) -> Result<job_application::Model, ServiceError> {
    let created = job_application::create(db, input).await?;
    info!(application_id = %created.id, "job_application_received");
    Ok(created)
}

pub async fn list_job_applications(
    db: &DatabaseConnection,
    principal: &Principal,
    page: Pagination,
) -> Result<Page<JobApplicationView>, ServiceError> {
    require_superuser(principal)?;
    let select = job_application::Entity::find().order_by_desc(job_application::Column::AppliedAt);
    let Page { items, page, per_page, total } = fetch_page(db, select, page).await?;
    Ok(Page { items: items.into_iter().map(JobApplicationView::from).collect(), page, per_page, total })
}

pub async fn get_job_application(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<JobApplicationView, ServiceError> {
    require_superuser(principal)?;
    job_application::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(JobApplicationView::from)
        .ok_or_else(|| ServiceError::not_found("application"))
}

pub async fn delete_job_application(db: &DatabaseConnection, principal: &Principal, id: Uuid) -> Result<(), ServiceError> {
    require_superuser(principal)?;
    let res = job_application::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("application"));
    }
    Ok(())
}
