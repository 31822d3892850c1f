//! Create the public submission tables: `contact_message`, `partner_application`, `job_application`.
//!
//! CV files live in the external media service; only the URL and metadata are stored.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactMessage::Table)
                    .if_not_exists()
                    .col(uuid(ContactMessage::Id).primary_key())
                    .col(string_len(ContactMessage::Name, 100).not_null())
                    .col(string_len(ContactMessage::Email, 254).not_null())
                    .col(string_len(ContactMessage::Subject, 200).not_null())
                    .col(text(ContactMessage::Message).not_null())
                    .col(timestamp_with_time_zone(ContactMessage::CreatedAt).not_null())
                    .col(boolean(ContactMessage::Read).not_null().default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PartnerApplication::Table)
                    .if_not_exists()
                    .col(uuid(PartnerApplication::Id).primary_key())
                    .col(string_len(PartnerApplication::FirstName, 100).not_null())
                    .col(string_len(PartnerApplication::LastName, 100).not_null())
                    .col(string_len_null(PartnerApplication::NationalId, 20).unique_key())
                    .col(string_len(PartnerApplication::Email, 254).unique_key().not_null())
                    .col(string_len(PartnerApplication::Phone, 20).not_null())
                    .col(string_len(PartnerApplication::Company, 200).not_null())
                    .col(string_len(PartnerApplication::Position, 100).not_null())
                    .col(text(PartnerApplication::Address).not_null())
                    .col(string_len(PartnerApplication::City, 100).not_null())
                    .col(text(PartnerApplication::CompanyDescription).not_null())
                    .col(text(PartnerApplication::Reason).not_null())
                    .col(timestamp_with_time_zone(PartnerApplication::SubmittedAt).not_null())
                    .col(string_len(PartnerApplication::Status, 20).not_null().default("pending"))
                    .col(text_null(PartnerApplication::AdminNotes))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobApplication::Table)
                    .if_not_exists()
                    .col(uuid(JobApplication::Id).primary_key())
                    .col(string_len(JobApplication::FullName, 200).not_null())
                    .col(string_len(JobApplication::Email, 254).not_null())
                    .col(string_len(JobApplication::Phone, 20).not_null())
                    .col(string_len(JobApplication::DesiredPosition, 100).not_null())
                    .col(text(JobApplication::RelevantExperience).not_null())
                    .col(text(JobApplication::CoverLetter).not_null())
                    .col(string_len(JobApplication::CvUrl, 500).not_null())
                    .col(string_len(JobApplication::CvFileName, 255).not_null())
                    .col(big_integer(JobApplication::CvSizeBytes).not_null())
                    .col(timestamp_with_time_zone(JobApplication::AppliedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(JobApplication::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(PartnerApplication::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ContactMessage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ContactMessage { Table, Id, Name, Email, Subject, Message, CreatedAt, Read }

#[derive(DeriveIden)]
enum PartnerApplication {
    Table,
    Id,
    FirstName,
    LastName,
    NationalId,
    Email,
    Phone,
    Company,
    Position,
    Address,
    City,
    CompanyDescription,
    Reason,
    SubmittedAt,
    Status,
    AdminNotes,
}

#[derive(DeriveIden)]
enum JobApplication {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    DesiredPosition,
    RelevantExperience,
    CoverLetter,
    CvUrl,
    CvFileName,
    CvSizeBytes,
    AppliedAt,
}
