//! Create `product` and `product_feature` tables with FK to `company`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(uuid(Product::Id).primary_key())
                    .col(string_len(Product::Name, 100).not_null())
                    .col(uuid(Product::CompanyId).not_null())
                    .col(uuid(Product::CategoryId).not_null())
                    .col(text(Product::Description).not_null())
                    .col(decimal_len(Product::Price, 10, 2).not_null())
                    .col(string_len_null(Product::ImageUrl, 500))
                    .col(boolean(Product::Active).not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_company")
                            .from(Product::Table, Product::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_category")
                            .from(Product::Table, Product::CategoryId)
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
                    .table(ProductFeature::Table)
                    .if_not_exists()
                    .col(uuid(ProductFeature::Id).primary_key())
                    .col(uuid(ProductFeature::ProductId).not_null())
                    .col(string_len(ProductFeature::Name, 100).not_null())
                    .col(string_len(ProductFeature::Value, 255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_feature_product")
                            .from(ProductFeature::Table, ProductFeature::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductFeature::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Id, Name, CompanyId, CategoryId, Description, Price, ImageUrl, Active }

#[derive(DeriveIden)]
enum ProductFeature { Table, Id, ProductId, Name, Value }

#[derive(DeriveIden)]
enum Company { Table, Id }

#[derive(DeriveIden)]
enum Category { Table, Id }
