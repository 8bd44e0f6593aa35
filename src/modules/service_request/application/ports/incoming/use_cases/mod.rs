mod create_service_request;
mod delete_service_request;
mod get_service_request;
mod issue_invoice;
mod list_service_requests;
mod patch_service_request;
mod record_invoice_payment;

pub use create_service_request::{CreateServiceRequestError, CreateServiceRequestUseCase};
pub use delete_service_request::{DeleteServiceRequestError, DeleteServiceRequestUseCase};
pub use get_service_request::{GetServiceRequestError, GetServiceRequestUseCase};
pub use issue_invoice::{
    InvoiceRequest, InvoiceRequestError, IssueInvoiceError, IssueInvoiceUseCase,
    DEFAULT_CURRENCY,
};
pub use list_service_requests::{ListServiceRequestsError, ListServiceRequestsUseCase};
pub use patch_service_request::{
    PatchServiceRequestError, PatchServiceRequestUseCase, ServiceRequestPatch,
};
pub use record_invoice_payment::{
    PaymentEvent, PaymentOutcome, RecordInvoicePaymentError, RecordInvoicePaymentUseCase,
    INVOICE_PAID_EVENT,
};
