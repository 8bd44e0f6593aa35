pub mod paypal;
pub mod sea_orm_entity;
pub mod service_request_query_postgres;
pub mod service_request_repository_postgres;
