mod list_contact_messages;
mod mark_contact_message_read;
mod submit_contact_message;

pub use list_contact_messages::list_contact_messages_handler;
pub use mark_contact_message_read::mark_contact_message_read_handler;
pub use submit_contact_message::{submit_contact_message_handler, ContactMessageDto};

// Referenced by `paths(...)` in the OpenAPI document
pub use list_contact_messages::__path_list_contact_messages_handler;
pub use mark_contact_message_read::__path_mark_contact_message_read_handler;
pub use submit_contact_message::__path_submit_contact_message_handler;
