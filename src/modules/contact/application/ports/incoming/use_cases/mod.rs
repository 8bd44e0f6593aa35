mod list_contact_messages;
mod mark_contact_message_read;
mod submit_contact_message;

pub use list_contact_messages::{ListContactMessagesError, ListContactMessagesUseCase};
pub use mark_contact_message_read::{MarkContactMessageReadError, MarkContactMessageReadUseCase};
pub use submit_contact_message::{SubmitContactMessageError, SubmitContactMessageUseCase};
