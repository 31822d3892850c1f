//! Create `company_user`: the one-to-one assignment of a user to a company.
//!
//! Both sides carry their own unique index so that concurrent assignments of
//! the same user or the same company cannot both commit.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyUser::Table)
                    .if_not_exists()
                    .col(uuid(CompanyUser::Id).primary_key())
                    .col(uuid(CompanyUser::UserId).not_null())
                    .col(uuid(CompanyUser::CompanyId).not_null())
                    .col(timestamp_with_time_zone(CompanyUser::AssignedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_user_user")
                            .from(CompanyUser::Table, CompanyUser::UserId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_user_company")
                            .from(CompanyUser::Table, CompanyUser::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Constraint names are matched by the binding repository to tell the two conflicts apart
        manager
            .create_index(
                Index::create()
                    .name("uq_company_user_user_id")
                    .table(CompanyUser::Table)
                    .col(CompanyUser::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_company_user_company_id")
                    .table(CompanyUser::Table)
                    .col(CompanyUser::CompanyId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CompanyUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CompanyUser { Table, Id, UserId, CompanyId, AssignedAt }

#[derive(DeriveIden)]
enum AppUser { Table, Id }

#[derive(DeriveIden)]
enum Company { Table, Id }
