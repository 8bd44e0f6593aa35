use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // Owner's username, kept as free text
                    .col(ColumnDef::new(ServiceRequests::Username).text().not_null())
                    .col(
                        ColumnDef::new(ServiceRequests::ProjectName)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::ServiceType)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceRequests::Timeline).text().null())
                    .col(ColumnDef::new(ServiceRequests::Budget).text().null())
                    .col(ColumnDef::new(ServiceRequests::AdditionalNotes).text().null())
                    .col(
                        ColumnDef::new(ServiceRequests::ReferenceLinks)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(ServiceRequests::Progress).small_integer().null())
                    .col(ColumnDef::new(ServiceRequests::InvoiceUrl).text().null())
                    .col(
                        ColumnDef::new(ServiceRequests::InvoiceUrls)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::InvoiceId)
                            .text()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::Paid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::PaymentDetails)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::Reviewed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ServiceRequests::Review).json_binary().null())
                    .col(
                        ColumnDef::new(ServiceRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Status values mirror the domain enum
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE service_requests
                ADD CONSTRAINT chk_service_requests_status
                CHECK (status IN ('Pending', 'Accepted', 'Declined', 'Completed'));

                ALTER TABLE service_requests
                ADD CONSTRAINT chk_service_requests_progress
                CHECK (progress IS NULL OR progress BETWEEN 0 AND 100);
                "#,
            )
            .await?;

        // Per-owner listing, newest first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_service_requests_username_created
                ON service_requests (username, created_at DESC);
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
                DROP INDEX IF EXISTS idx_service_requests_username_created;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ServiceRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceRequests {
    Table,
    Id,
    Username,
    ProjectName,
    ServiceType,
    Description,
    Timeline,
    Budget,
    AdditionalNotes,
    ReferenceLinks,
    Status,
    Progress,
    InvoiceUrl,
    InvoiceUrls,
    InvoiceId,
    Paid,
    PaidAt,
    PaymentDetails,
    Reviewed,
    Review,
    CreatedAt,
    UpdatedAt,
}
