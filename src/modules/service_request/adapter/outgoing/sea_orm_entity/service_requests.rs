use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Uuid")]
    pub id: Uuid,

    // Free text, not a foreign key
    #[sea_orm(column_type = "Text")]
    pub username: String,

    #[sea_orm(column_type = "Text")]
    pub project_name: String,

    #[sea_orm(column_type = "Text")]
    pub service_type: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub timeline: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub budget: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub additional_notes: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub reference_links: Json,

    #[sea_orm(column_type = "Text", string_len = 16)]
    pub status: String,

    pub progress: Option<i16>,

    #[sea_orm(column_type = "Text", nullable)]
    pub invoice_url: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub invoice_urls: Json,

    #[sea_orm(column_type = "Text", nullable, unique)]
    pub invoice_id: Option<String>,

    pub paid: bool,

    #[sea_orm(column_type = "TimestampWithTimeZone", nullable)]
    pub paid_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub payment_details: Option<Json>,

    pub reviewed: bool,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub review: Option<Json>,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
