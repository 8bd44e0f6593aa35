use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    // No foreign key: reviews outlive deleted requests
                    .col(
                        ColumnDef::new(Reviews::RequestId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Reviews::Username).text().not_null())
                    .col(ColumnDef::new(Reviews::ProjectName).text().not_null())
                    .col(ColumnDef::new(Reviews::ServiceType).text().not_null())
                    .col(ColumnDef::new(Reviews::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::Title).text().not_null())
                    .col(ColumnDef::new(Reviews::Review).text().not_null())
                    .col(ColumnDef::new(Reviews::Avatar).text().null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE reviews
                ADD CONSTRAINT chk_reviews_rating
                CHECK (rating BETWEEN 1 AND 5);

                CREATE INDEX IF NOT EXISTS idx_reviews_created_at
                ON reviews (created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_reviews_created_at;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    RequestId,
    Username,
    ProjectName,
    ServiceType,
    Rating,
    Title,
    Review,
    Avatar,
    CreatedAt,
}
