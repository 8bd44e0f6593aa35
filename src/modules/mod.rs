pub mod auth;
pub mod contact;
pub mod email;
pub mod review;
pub mod service_request;
