use homeservice_api_types::{Customer, Id, Page};

use super::AdminApi;
use crate::api::{QueryParams, Resource};
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

const RESOURCE: Resource = Resource::Customers;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Matches name or phone.
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CustomerFilter {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .set_opt("search", self.search.as_deref().filter(|s| !s.is_empty()))
            .set_opt("page", self.page)
            .set_opt("limit", self.limit)
    }
}

/// Customers are created by the booking flow; the back-office only reads and
/// removes them.
pub struct Customers<'a> {
    api: &'a AdminApi,
}

impl<'a> Customers<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    pub fn list(&self, filter: &CustomerFilter) -> Query<Page<Customer>> {
        self.api
            .page_query(AdminApi::list_path(RESOURCE, &filter.to_params()))
    }

    pub fn detail(&self, id: Option<&Id>) -> Query<Customer> {
        self.api.detail_query(RESOURCE, id)
    }

    pub async fn delete(&self, id: &Id) -> Result<(), ApiError> {
        let path = RESOURCE.delete_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Deleted(id.clone()),
                "customer deleted",
                self.api.client().post_empty(&path),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::admin_api;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn list_and_detail_are_cached_separately() {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/admin/customers/list")
                    .query_param("search", "kim");
                then.status(200).json_body(json!({
                    "data": {
                        "items": [{
                            "id": "c1",
                            "name": "Kim",
                            "phone": "01011112222",
                            "totalReservations": 3,
                            "averageRating": 4.5,
                            "createdAt": "2024-01-01T00:00:00Z",
                            "updatedAt": "2024-01-02T00:00:00Z"
                        }],
                        "total": 1
                    }
                }));
            })
            .await;
        let (api, _) = admin_api(&server);

        let filter = CustomerFilter {
            search: Some("kim".into()),
            ..Default::default()
        };
        let query = api.customers().list(&filter);
        let (a, b) = tokio::join!(api.fetch(&query), api.fetch(&query));
        let page = a.expect("a").expect("enabled");
        assert_eq!(page.items[0].total_reservations, 3);
        assert!(b.expect("b").is_some());
        list.assert_calls_async(1).await;
    }

    #[tokio::test]
    async fn delete_posts_to_the_item_path_and_notifies() {
        let server = MockServer::start_async().await;
        let delete = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/customers/c1/delete");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;
        let (api, notifier) = admin_api(&server);

        api.customers().delete(&Id::from("c1")).await.expect("delete");

        delete.assert_async().await;
        assert_eq!(notifier.toasts()[0].text, "customer deleted");
    }
}
