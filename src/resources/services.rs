use homeservice_api_types::{Id, ReorderRequest, Service, ServiceInput, Validate};

use super::AdminApi;
use crate::api::Resource;
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

const RESOURCE: Resource = Resource::Services;

pub struct Services<'a> {
    api: &'a AdminApi,
}

impl<'a> Services<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    /// Every service, active or not, in display order.
    pub fn list(&self) -> Query<Vec<Service>> {
        self.api.get_query(RESOURCE.list_path())
    }

    pub fn detail(&self, id: Option<&Id>) -> Query<Service> {
        self.api.detail_query(RESOURCE, id)
    }

    pub async fn create(&self, input: &ServiceInput) -> Result<Service, ApiError> {
        input.validate()?;
        let path = RESOURCE.create_path();
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Created,
                format!("service \"{}\" created", input.title),
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn update(&self, id: &Id, input: &ServiceInput) -> Result<Service, ApiError> {
        input.validate()?;
        let path = RESOURCE.update_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Updated(id.clone()),
                format!("service \"{}\" updated", input.title),
                self.api.client().post(&path, input),
            )
            .await
    }

    /// Activates or deactivates a service.
    pub async fn toggle(&self, id: &Id) -> Result<(), ApiError> {
        let path = RESOURCE.toggle_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Toggled(id.clone()),
                "service status updated",
                self.api.client().post_empty(&path),
            )
            .await
    }

    /// Persists a new display order; `ids` lists every service front to back.
    pub async fn reorder(&self, ids: &[Id]) -> Result<(), ApiError> {
        let body = ReorderRequest::from_ids(ids);
        body.validate()?;
        let path = RESOURCE.reorder_path();
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Reordered(ids.to_vec()),
                "service order saved",
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
                "service deleted",
                self.api.client().post_empty(&path),
            )
            .await
    }
}
