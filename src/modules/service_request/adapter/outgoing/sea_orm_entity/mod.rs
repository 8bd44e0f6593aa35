pub mod service_requests;
