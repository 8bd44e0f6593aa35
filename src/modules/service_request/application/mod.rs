pub mod domain;
pub mod ports;
pub mod service;
pub mod service_request_use_cases;
