use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Product: scoped listings filter by company, public ones by active + category
        manager
            .create_index(
                Index::create()
                    .name("idx_product_company")
                    .table(Product::Table)
                    .col(Product::CompanyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_product_active_category")
                    .table(Product::Table)
                    .col(Product::Active)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Company: public listing by active + category
        manager
            .create_index(
                Index::create()
                    .name("idx_company_active_category")
                    .table(Company::Table)
                    .col(Company::Active)
                    .col(Company::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ProductFeature: index on product_id
        manager
            .create_index(
                Index::create()
                    .name("idx_product_feature_product")
                    .table(ProductFeature::Table)
                    .col(ProductFeature::ProductId)
                    .to_owned(),
            )
            .await?;

        // Testimonial: public listing shows approved only
        manager
            .create_index(
                Index::create()
                    .name("idx_testimonial_approved")
                    .table(Testimonial::Table)
                    .col(Testimonial::Approved)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_company").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_active_category").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_company_active_category").table(Company::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_feature_product").table(ProductFeature::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_testimonial_approved").table(Testimonial::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product { Table, CompanyId, Active, CategoryId }

#[derive(DeriveIden)]
enum Company { Table, Active, CategoryId }

#[derive(DeriveIden)]
enum ProductFeature { Table, ProductId }

#[derive(DeriveIden)]
enum Testimonial { Table, Approved }
