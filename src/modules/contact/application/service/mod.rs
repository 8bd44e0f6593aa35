mod list_contact_messages_service;
mod mark_contact_message_read_service;
mod submit_contact_message_service;

pub use list_contact_messages_service::ListContactMessagesService;
pub use mark_contact_message_read_service::MarkContactMessageReadService;
pub use submit_contact_message_service::SubmitContactMessageService;
