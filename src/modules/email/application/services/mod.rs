pub mod reset_email_service;

pub use reset_email_service::ResetEmailService;
