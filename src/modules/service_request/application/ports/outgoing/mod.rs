pub mod invoice_issuer;
pub mod service_request_query;
pub mod service_request_repository;

pub use invoice_issuer::{InvoiceDraft, InvoiceIssuer, InvoiceIssuerError, IssuedInvoice};
pub use service_request_query::{
    ServiceRequestFilter, ServiceRequestQuery, ServiceRequestQueryError,
};
pub use service_request_repository::{
    NewServiceRequest, ServiceRequestChanges, ServiceRequestRepository,
    ServiceRequestRepositoryError,
};
