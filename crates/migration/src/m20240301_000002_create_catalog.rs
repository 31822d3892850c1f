//! Create lookup tables: `category`, `icon`, `social_network`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(uuid(Category::Id).primary_key())
                    .col(string_len(Category::Name, 50).unique_key().not_null())
                    .col(text_null(Category::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Icon::Table)
                    .if_not_exists()
                    .col(uuid(Icon::Id).primary_key())
                    .col(string_len(Icon::Name, 50).unique_key().not_null())
                    .col(string_len(Icon::Code, 50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SocialNetwork::Table)
                    .if_not_exists()
                    .col(uuid(SocialNetwork::Id).primary_key())
                    .col(string_len(SocialNetwork::Name, 50).unique_key().not_null())
                    .col(string_len(SocialNetwork::BaseUrl, 200).not_null())
                    .col(uuid(SocialNetwork::IconId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_social_network_icon")
                            .from(SocialNetwork::Table, SocialNetwork::IconId)
                            .to(Icon::Table, Icon::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SocialNetwork::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Icon::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Category { Table, Id, Name, Description }

#[derive(DeriveIden)]
enum Icon { Table, Id, Name, Code }

#[derive(DeriveIden)]
enum SocialNetwork { Table, Id, Name, BaseUrl, IconId }
