mod create_service_request_service;
mod delete_service_request_service;
mod get_service_request_service;
mod issue_invoice_service;
mod list_service_requests_service;
mod patch_service_request_service;
mod record_invoice_payment_service;

pub use create_service_request_service::CreateServiceRequestService;
pub use delete_service_request_service::DeleteServiceRequestService;
pub use get_service_request_service::GetServiceRequestService;
pub use issue_invoice_service::IssueInvoiceService;
pub use list_service_requests_service::ListServiceRequestsService;
pub use patch_service_request_service::PatchServiceRequestService;
pub use record_invoice_payment_service::RecordInvoicePaymentService;
