use homeservice_api_types::{Id, Promotion, PromotionInput, ReorderRequest, Validate};

use super::AdminApi;
use crate::api::Resource;
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

const RESOURCE: Resource = Resource::Promotions;

pub struct Promotions<'a> {
    api: &'a AdminApi,
}

impl<'a> Promotions<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    pub fn list(&self) -> Query<Vec<Promotion>> {
        self.api.get_query(RESOURCE.list_path())
    }

    pub fn detail(&self, id: Option<&Id>) -> Query<Promotion> {
        self.api.detail_query(RESOURCE, id)
    }

    pub async fn create(&self, input: &PromotionInput) -> Result<Promotion, ApiError> {
        input.validate()?;
        let path = RESOURCE.create_path();
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Created,
                "promotion created",
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn update(&self, id: &Id, input: &PromotionInput) -> Result<Promotion, ApiError> {
        input.validate()?;
        let path = RESOURCE.update_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Updated(id.clone()),
                "promotion updated",
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn toggle(&self, id: &Id) -> Result<(), ApiError> {
        let path = RESOURCE.toggle_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Toggled(id.clone()),
                "promotion status updated",
                self.api.client().post_empty(&path),
            )
            .await
    }

    /// Saves a new display order. Each promotion's cached detail carries its
    /// order too, so every listed id is marked stale along with the list.
    pub async fn reorder(&self, ids: &[Id]) -> Result<(), ApiError> {
        let body = ReorderRequest::from_ids(ids);
        body.validate()?;
        let path = RESOURCE.reorder_path();
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Reordered(ids.to_vec()),
                "promotion order saved",
                self.api.client().post_unit(&path, &body),
            )
            .await
    }

    pub async fn delete(&self, id: &Id) -> Result<(), ApiError> {
        let path = RESOURCE.delete_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Deleted(id.clone()),
                "promotion deleted",
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

    fn promotion(id: u32, order: u32) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Spring sale {id}"),
            "displayOrder": order,
            "isActive": true,
            "detail": {"discount": 10}
        })
    }

    #[tokio::test]
    async fn reorder_marks_list_and_each_detail_stale() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/admin/promotions/list");
                then.status(200)
                    .json_body(json!({"data": [promotion(1, 1), promotion(2, 2)]}));
            })
            .await;
        for id in [1, 2, 3] {
            server
                .mock_async(move |when, then| {
                    when.method(GET).path(format!("/api/admin/promotions/{id}"));
                    then.status(200).json_body(json!({"data": promotion(id, id)}));
                })
                .await;
        }
        let reorder = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/promotions/reorder");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;
        let (api, _) = admin_api(&server);
        let promotions = api.promotions();
        let list = promotions.list();
        let first = promotions.detail(Some(&Id::from(1)));
        let second = promotions.detail(Some(&Id::from(2)));
        let untouched = promotions.detail(Some(&Id::from(3)));
        for query in [&first, &second, &untouched] {
            api.fetch(query).await.expect("detail");
        }
        api.fetch(&list).await.expect("list");

        promotions
            .reorder(&[Id::from(2), Id::from(1)])
            .await
            .expect("reorder");

        reorder.assert_async().await;
        let cache = api.cache();
        assert_eq!(cache.is_invalidated(list.key()), Some(true));
        assert_eq!(cache.is_invalidated(first.key()), Some(true));
        assert_eq!(cache.is_invalidated(second.key()), Some(true));
        assert_eq!(cache.is_invalidated(untouched.key()), Some(false));
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected_before_sending() {
        let server = MockServer::start_async().await;
        let reorder = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/promotions/reorder");
                then.status(200);
            })
            .await;
        let (api, notifier) = admin_api(&server);

        let err = api
            .promotions()
            .reorder(&[Id::from(1), Id::from(1)])
            .await
            .expect_err("duplicates");
        assert!(err.field_errors().and_then(|f| f.get("items")).is_some());
        reorder.assert_calls_async(0).await;
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn update_returns_the_stored_promotion() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/admin/promotions/4/update")
                    .json_body_includes(r#"{"title": "Winter", "isActive": false}"#);
                then.status(200).json_body(json!({
                    "data": {"id": 4, "title": "Winter", "displayOrder": 3, "isActive": false}
                }));
            })
            .await;
        let (api, notifier) = admin_api(&server);

        let input = PromotionInput {
            title: "Winter".to_string(),
            is_active: false,
            detail: json!({}),
        };
        let updated = api
            .promotions()
            .update(&Id::from(4), &input)
            .await
            .expect("update");
        assert_eq!(updated.display_order, 3);
        assert!(updated.detail.is_null());
        assert_eq!(notifier.toasts()[0].text, "promotion updated");
    }
}
