pub mod contact_message_postgres;
pub mod sea_orm_entity;
