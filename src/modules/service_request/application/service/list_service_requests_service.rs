use async_trait::async_trait;

use crate::service_request::application::domain::entities::{Actor, ServiceRequest};
use crate::service_request::application::ports::incoming::use_cases::{
    ListServiceRequestsError, ListServiceRequestsUseCase,
};
use crate::service_request::application::ports::outgoing::{
    ServiceRequestFilter, ServiceRequestQuery,
};

pub struct ListServiceRequestsService<Q>
where
    Q: ServiceRequestQuery,
{
    query: Q,
}

impl<Q> ListServiceRequestsService<Q>
where
    Q: ServiceRequestQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListServiceRequestsUseCase for ListServiceRequestsService<Q>
where
    Q: ServiceRequestQuery + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        username: Option<String>,
    ) -> Result<Vec<ServiceRequest>, ListServiceRequestsError> {
        let username = if actor.is_admin() {
            username.filter(|u| !u.trim().is_empty())
        } else {
            Some(actor.username)
        };

        self.query
            .list(ServiceRequestFilter { username })
            .await
            .map_err(|e| ListServiceRequestsError::QueryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_request::application::domain::entities::RequestStatus;
    use crate::tests::support::fakes::InMemoryServiceRequests;
    use crate::tests::support::fixtures::{admin, client, sample_request};

    fn seeded() -> InMemoryServiceRequests {
        let store = InMemoryServiceRequests::default();
        store.seed(sample_request("alice", RequestStatus::Pending, 30));
        store.seed(sample_request("bob", RequestStatus::Accepted, 20));
        store.seed(sample_request("alice", RequestStatus::Completed, 10));
        store
    }

    #[tokio::test]
    async fn test_admin_lists_everything_newest_first() {
        let service = ListServiceRequestsService::new(seeded());

        let list = service.execute(admin(), None).await.unwrap();

        assert_eq!(list.len(), 3);
        assert!(list
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_admin_filters_by_exact_username() {
        let service = ListServiceRequestsService::new(seeded());

        let list = service
            .execute(admin(), Some("bob".into()))
            .await
            .unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].username, "bob");
    }

    #[tokio::test]
    async fn test_client_only_sees_own_requests() {
        let service = ListServiceRequestsService::new(seeded());

        let list = service
            .execute(client("alice"), Some("bob".into()))
            .await
            .unwrap();

        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|r| r.username == "alice"));
    }

    #[tokio::test]
    async fn test_list_maps_query_error() {
        let service = ListServiceRequestsService::new(InMemoryServiceRequests::failing());

        let err = service.execute(admin(), None).await.unwrap_err();
        assert!(matches!(err, ListServiceRequestsError::QueryError(_)));
    }
}
