pub mod contact_message_query;
pub mod contact_message_repository;

pub use contact_message_query::{ContactMessageQuery, ContactMessageQueryError};
pub use contact_message_repository::{ContactMessageRepository, ContactMessageRepositoryError};
