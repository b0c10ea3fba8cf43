use homeservice_api_types::{Id, Page, Review};

use super::AdminApi;
use crate::api::{QueryParams, Resource};
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

const RESOURCE: Resource = Resource::Reviews;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub rating: Option<u8>,
    pub is_visible: Option<bool>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ReviewFilter {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .set_opt("rating", self.rating)
            .set_opt("isVisible", self.is_visible)
            .set_opt("search", self.search.as_deref().filter(|s| !s.is_empty()))
            .set_opt("page", self.page)
            .set_opt("limit", self.limit)
    }
}

pub struct Reviews<'a> {
    api: &'a AdminApi,
}

impl<'a> Reviews<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    pub fn list(&self, filter: &ReviewFilter) -> Query<Page<Review>> {
        self.api
            .page_query(AdminApi::list_path(RESOURCE, &filter.to_params()))
    }

    pub fn detail(&self, id: Option<&Id>) -> Query<Review> {
        self.api.detail_query(RESOURCE, id)
    }

    /// Flips public visibility of a review.
    pub async fn toggle_visibility(&self, id: &Id) -> Result<(), ApiError> {
        let path = RESOURCE.toggle_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Toggled(id.clone()),
                "review visibility updated",
                self.api.client().post_empty(&path),
            )
            .await
    }

    pub async fn delete(&self, id: &Id) -> Result<(), ApiError> {
        let path = RESOURCE.delete_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Deleted(id.clone()),
                "review deleted",
                self.api.client().post_empty(&path),
            )
            .await
    }
}
