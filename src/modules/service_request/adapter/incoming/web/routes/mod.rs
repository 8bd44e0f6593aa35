mod create_service_request;
mod delete_service_request;
mod get_service_request;
mod issue_invoice;
mod list_service_requests;
mod patch_service_request;
mod paypal_webhook;

use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::service_request::application::domain::entities::Actor;

pub use create_service_request::{create_service_request_handler, CreateServiceRequestDto};
pub use delete_service_request::{delete_service_request_handler, DeletedServiceRequest};
pub use get_service_request::get_service_request_handler;
pub use issue_invoice::{issue_invoice_handler, IssueInvoiceDto};
pub use list_service_requests::{list_service_requests_handler, ListServiceRequestsQuery};
pub use patch_service_request::{patch_service_request_handler, PatchServiceRequestDto};
pub use paypal_webhook::{paypal_webhook_handler, WebhookAck};

// Referenced by `paths(...)` in the OpenAPI document
pub use create_service_request::__path_create_service_request_handler;
pub use delete_service_request::__path_delete_service_request_handler;
pub use get_service_request::__path_get_service_request_handler;
pub use issue_invoice::__path_issue_invoice_handler;
pub use list_service_requests::__path_list_service_requests_handler;
pub use patch_service_request::__path_patch_service_request_handler;
pub use paypal_webhook::__path_paypal_webhook_handler;

impl From<&AuthenticatedUser> for Actor {
    fn from(user: &AuthenticatedUser) -> Self {
        Actor::new(user.username.clone(), user.role)
    }
}
