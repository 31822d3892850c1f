//! Create `team_member` and `news` tables (site content, no ownership).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMember::Table)
                    .if_not_exists()
                    .col(uuid(TeamMember::Id).primary_key())
                    .col(string_len(TeamMember::Name, 100).not_null())
                    .col(string_len(TeamMember::Position, 100).not_null())
                    .col(string_len_null(TeamMember::ImageUrl, 500))
                    .col(text_null(TeamMember::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(uuid(News::Id).primary_key())
                    .col(string_len(News::Title, 200).not_null())
                    .col(text(News::Content).not_null())
                    .col(date(News::PublishedOn).not_null())
                    .col(string_len_null(News::Link, 200))
                    .col(string_len_null(News::PhotoUrl, 500))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(News::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(TeamMember::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TeamMember { Table, Id, Name, Position, ImageUrl, Description }

#[derive(DeriveIden)]
enum News { Table, Id, Title, Content, PublishedOn, Link, PhotoUrl }
