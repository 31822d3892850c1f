//! Create `service_offering` and `testimonial` tables.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceOffering::Table)
                    .if_not_exists()
                    .col(uuid(ServiceOffering::Id).primary_key())
                    .col(string_len(ServiceOffering::Title, 100).not_null())
                    .col(text(ServiceOffering::Description).not_null())
                    .col(uuid(ServiceOffering::IconId).not_null())
                    .col(uuid(ServiceOffering::CategoryId).not_null())
                    .col(boolean(ServiceOffering::Active).not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_offering_icon")
                            .from(ServiceOffering::Table, ServiceOffering::IconId)
                            .to(Icon::Table, Icon::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_offering_category")
                            .from(ServiceOffering::Table, ServiceOffering::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Testimonial::Table)
                    .if_not_exists()
                    .col(uuid(Testimonial::Id).primary_key())
                    .col(string_len(Testimonial::Name, 100).not_null())
                    .col(string_len(Testimonial::Position, 100).not_null())
                    .col(uuid(Testimonial::CompanyId).not_null())
                    .col(text(Testimonial::Comment).not_null())
                    .col(date(Testimonial::CreatedOn).not_null())
                    .col(boolean(Testimonial::Approved).not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_testimonial_company")
                            .from(Testimonial::Table, Testimonial::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Testimonial::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ServiceOffering::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceOffering { Table, Id, Title, Description, IconId, CategoryId, Active }

#[derive(DeriveIden)]
enum Testimonial { Table, Id, Name, Position, CompanyId, Comment, CreatedOn, Approved }

#[derive(DeriveIden)]
enum Icon { Table, Id }

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum Company { Table, Id }
