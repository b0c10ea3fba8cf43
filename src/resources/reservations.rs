use homeservice_api_types::{
    CancelReservationRequest, Id, Page, Reservation, ReservationStatus, ReservationStatusRequest,
    Validate,
};
use time::Date;

use super::AdminApi;
use crate::api::{QueryParams, Resource};
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

const RESOURCE: Resource = Resource::Reservations;

/// Filters accepted by the reservation list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub search: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ReservationFilter {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .set_opt("status", self.status.map(ReservationStatus::as_str))
            .set_opt("search", self.search.as_deref().filter(|s| !s.is_empty()))
            .set_opt("startDate", self.start_date.map(|d| d.to_string()))
            .set_opt("endDate", self.end_date.map(|d| d.to_string()))
            .set_opt("page", self.page)
            .set_opt("limit", self.limit)
    }
}

pub struct Reservations<'a> {
    api: &'a AdminApi,
}

impl<'a> Reservations<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    pub fn list(&self, filter: &ReservationFilter) -> Query<Page<Reservation>> {
        self.api
            .page_query(AdminApi::list_path(RESOURCE, &filter.to_params()))
    }

    pub fn detail(&self, id: Option<&Id>) -> Query<Reservation> {
        self.api.detail_query(RESOURCE, id)
    }

    /// Moves a reservation to `pending`, `confirmed` or `completed`;
    /// cancellation goes through [`cancel`](Self::cancel).
    pub async fn update_status(&self, id: &Id, status: ReservationStatus) -> Result<(), ApiError> {
        let body = ReservationStatusRequest { status };
        body.validate()?;
        let path = RESOURCE.status_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::StatusChanged(id.clone()),
                format!("reservation marked {status}"),
                self.api.client().post_unit(&path, &body),
            )
            .await
    }

    pub async fn cancel(&self, id: &Id, reason: impl Into<String>) -> Result<(), ApiError> {
        let body = CancelReservationRequest {
            cancel_reason: reason.into(),
        };
        body.validate()?;
        let path = RESOURCE.cancel_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Cancelled(id.clone()),
                "reservation cancelled",
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
                "reservation deleted",
                self.api.client().post_empty(&path),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QueryKey;
    use crate::cache::ToastKind;
    use crate::resources::test_support::admin_api;
    use httpmock::prelude::*;
    use serde_json::json;
    use time::macros::date;

    fn reservation(id: u32, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "number": format!("R-{id:04}"),
            "customerName": "Kim",
            "customerPhone": "01012345678",
            "service": {"id": 3, "title": "Film"},
            "estimateDate": "2024-05-01",
            "estimateTime": "10:00",
            "constructionDate": null,
            "constructionTime": null,
            "address": "Seoul",
            "status": status,
            "cancelReason": null,
            "createdAt": "2024-04-01T09:00:00Z",
            "updatedAt": "2024-04-01T09:00:00Z"
        })
    }

    #[test]
    fn filter_keys_are_canonical() {
        let filter = ReservationFilter {
            status: Some(ReservationStatus::Pending),
            search: Some(String::new()),
            start_date: Some(date!(2024 - 05 - 01)),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(
            filter.to_params().to_string(),
            "?page=2&startDate=2024-05-01&status=pending"
        );
    }

    #[tokio::test]
    async fn list_parses_paginated_envelope() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/admin/reservations/list")
                    .query_param("status", "pending");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": [reservation(1, "pending")],
                    "pagination": {"total": 1, "page": 1, "limit": 20, "totalPages": 1}
                }));
            })
            .await;
        let (api, _) = admin_api(&server);

        let filter = ReservationFilter {
            status: Some(ReservationStatus::Pending),
            ..Default::default()
        };
        let query = api.reservations().list(&filter);
        assert_eq!(
            query.key(),
            &QueryKey::from_url("/api/admin/reservations/list?status=pending")
        );
        let page = api.fetch(&query).await.expect("list").expect("enabled");
        assert_eq!(page.items[0].number, "R-0001");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn detail_without_id_issues_no_request() {
        let server = MockServer::start_async().await;
        let any = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;
        let (api, _) = admin_api(&server);

        let query = api.reservations().detail(None);
        let list = api.reservations().list(&ReservationFilter::default());
        assert!(!list.key().starts_with(query.key()));
        assert!(api.fetch(&query).await.expect("disabled").is_none());
        let forced = query.run().await.expect_err("missing id");
        assert!(matches!(forced, ApiError::MissingPrecondition("id")));
        any.assert_calls_async(0).await;
    }

    #[tokio::test]
    async fn cancel_invalidates_only_the_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/admin/reservations/list");
                then.status(200).json_body(json!({"data": [reservation(5, "confirmed")]}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/admin/reservations/5");
                then.status(200).json_body(json!({"data": reservation(5, "confirmed")}));
            })
            .await;
        let cancel = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/admin/reservations/5/cancel")
                    .json_body_includes(r#"{"cancelReason": "customer request"}"#);
                then.status(200).json_body(json!({"success": true}));
            })
            .await;
        let (api, notifier) = admin_api(&server);
        let reservations = api.reservations();
        let list = reservations.list(&ReservationFilter::default());
        let detail = reservations.detail(Some(&Id::from(5)));
        api.fetch(&list).await.expect("list");
        api.fetch(&detail).await.expect("detail");

        reservations
            .cancel(&Id::from(5), "customer request")
            .await
            .expect("cancel");

        cancel.assert_async().await;
        assert_eq!(api.cache().is_invalidated(list.key()), Some(true));
        assert_eq!(api.cache().is_invalidated(detail.key()), Some(false));
        assert_eq!(notifier.toasts()[0].kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn cancelled_status_is_rejected_locally() {
        let server = MockServer::start_async().await;
        let (api, notifier) = admin_api(&server);

        let err = api
            .reservations()
            .update_status(&Id::from(1), ReservationStatus::Cancelled)
            .await
            .expect_err("validation");
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(notifier.toasts().is_empty());
    }
}
