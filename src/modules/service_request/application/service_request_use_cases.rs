use std::sync::Arc;

use crate::service_request::application::ports::incoming::use_cases::{
    CreateServiceRequestUseCase, DeleteServiceRequestUseCase, GetServiceRequestUseCase,
    IssueInvoiceUseCase, ListServiceRequestsUseCase, PatchServiceRequestUseCase,
    RecordInvoicePaymentUseCase,
};

#[derive(Clone)]
pub struct ServiceRequestUseCases {
    pub create: Arc<dyn CreateServiceRequestUseCase + Send + Sync>,
    pub list: Arc<dyn ListServiceRequestsUseCase + Send + Sync>,
    pub get: Arc<dyn GetServiceRequestUseCase + Send + Sync>,
    pub patch: Arc<dyn PatchServiceRequestUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteServiceRequestUseCase + Send + Sync>,
    pub issue_invoice: Arc<dyn IssueInvoiceUseCase + Send + Sync>,
    pub record_payment: Arc<dyn RecordInvoicePaymentUseCase + Send + Sync>,
}
