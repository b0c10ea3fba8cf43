use homeservice_api_types::{Id, Page, Portfolio, PortfolioInput, Validate};

use super::AdminApi;
use crate::api::{QueryParams, Resource};
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

const RESOURCE: Resource = Resource::Portfolios;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioFilter {
    pub service_id: Option<Id>,
    pub is_visible: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PortfolioFilter {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .set_opt("serviceId", self.service_id.as_ref().map(Id::as_str))
            .set_opt("isVisible", self.is_visible)
            .set_opt("page", self.page)
            .set_opt("limit", self.limit)
    }
}

pub struct Portfolios<'a> {
    api: &'a AdminApi,
}

impl<'a> Portfolios<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    pub fn list(&self, filter: &PortfolioFilter) -> Query<Page<Portfolio>> {
        self.api
            .page_query(AdminApi::list_path(RESOURCE, &filter.to_params()))
    }

    pub fn detail(&self, id: Option<&Id>) -> Query<Portfolio> {
        self.api.detail_query(RESOURCE, id)
    }

    pub async fn create(&self, input: &PortfolioInput) -> Result<Portfolio, ApiError> {
        input.validate()?;
        let path = RESOURCE.create_path();
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Created,
                "portfolio created",
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn update(&self, id: &Id, input: &PortfolioInput) -> Result<Portfolio, ApiError> {
        input.validate()?;
        let path = RESOURCE.update_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Updated(id.clone()),
                "portfolio updated",
                self.api.client().post(&path, input),
            )
            .await
    }

    /// Shows or hides a portfolio on the public site.
    pub async fn toggle_visibility(&self, id: &Id) -> Result<(), ApiError> {
        let path = RESOURCE.toggle_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Toggled(id.clone()),
                "portfolio visibility updated",
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
                "portfolio deleted",
                self.api.client().post_empty(&path),
            )
            .await
    }
}
