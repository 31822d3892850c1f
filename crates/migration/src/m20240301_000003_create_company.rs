//! Create `company` and `company_social_network` tables.
//!
//! A company is the ownership root for products; links to social networks are unique per pair.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(uuid(Company::Id).primary_key())
                    .col(string_len_null(Company::Ruc, 13))
                    .col(string_len(Company::Name, 100).not_null())
                    .col(uuid(Company::CategoryId).not_null())
                    .col(text(Company::Description).not_null())
                    .col(string_len(Company::Phone, 20).not_null())
                    .col(string_len_null(Company::Email, 254))
                    .col(string_len_null(Company::Website, 200))
                    .col(string_len(Company::Address, 200).not_null())
                    .col(timestamp_with_time_zone(Company::RegisteredAt).not_null())
                    .col(boolean(Company::Active).not_null().default(true))
                    .col(string_len_null(Company::LogoUrl, 500))
                    .col(string_len_null(Company::Facebook, 100))
                    .col(string_len_null(Company::Twitter, 100))
                    .col(string_len_null(Company::Instagram, 100))
                    .col(string_len_null(Company::Tiktok, 100))
                    .col(string_len_null(Company::Linkedin, 100))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_category")
                            .from(Company::Table, Company::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanySocialNetwork::Table)
                    .if_not_exists()
                    .col(uuid(CompanySocialNetwork::Id).primary_key())
                    .col(uuid(CompanySocialNetwork::CompanyId).not_null())
                    .col(uuid(CompanySocialNetwork::SocialNetworkId).not_null())
                    .col(string_len(CompanySocialNetwork::Username, 100).not_null())
                    .col(string_len(CompanySocialNetwork::Url, 200).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_social_network_company")
                            .from(CompanySocialNetwork::Table, CompanySocialNetwork::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_social_network_network")
                            .from(CompanySocialNetwork::Table, CompanySocialNetwork::SocialNetworkId)
                            .to(SocialNetwork::Table, SocialNetwork::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One link per (company, network)
        manager
            .create_index(
                Index::create()
                    .name("uniq_company_social_network")
                    .table(CompanySocialNetwork::Table)
                    .col(CompanySocialNetwork::CompanyId)
                    .col(CompanySocialNetwork::SocialNetworkId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CompanySocialNetwork::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Company {
    Table,
    Id,
    Ruc,
    Name,
    CategoryId,
    Description,
    Phone,
    Email,
    Website,
    Address,
    RegisteredAt,
    Active,
    LogoUrl,
    Facebook,
    Twitter,
    Instagram,
    Tiktok,
    Linkedin,
}

#[derive(DeriveIden)]
enum CompanySocialNetwork { Table, Id, CompanyId, SocialNetworkId, Username, Url }

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum SocialNetwork { Table, Id }
