use homeservice_api_types::{Icon, IconInput, IconType, Id, Validate};

use super::AdminApi;
use crate::api::{QueryParams, Resource};
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

const RESOURCE: Resource = Resource::Icons;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconFilter {
    pub icon_type: Option<IconType>,
    pub search: Option<String>,
}

impl IconFilter {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .set_opt("type", self.icon_type.map(IconType::as_str))
            .set_opt("search", self.search.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Icon library used by service cards. Icons have no detail read; every
/// write only refreshes the list.
pub struct Icons<'a> {
    api: &'a AdminApi,
}

impl<'a> Icons<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    pub fn list(&self, filter: &IconFilter) -> Query<Vec<Icon>> {
        self.api
            .get_query(AdminApi::list_path(RESOURCE, &filter.to_params()))
    }

    pub async fn create(&self, input: &IconInput) -> Result<Icon, ApiError> {
        input.validate()?;
        let path = RESOURCE.create_path();
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Created,
                format!("icon `{}` added", input.name),
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn update(&self, id: &Id, input: &IconInput) -> Result<Icon, ApiError> {
        input.validate()?;
        let path = RESOURCE.update_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Updated(id.clone()),
                format!("icon `{}` updated", input.name),
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn delete(&self, id: &Id) -> Result<(), ApiError> {
        let path = RESOURCE.delete_path(id);
        self.api
            .mutate(
                RESOURCE,
                MutationKind::Deleted(id.clone()),
                "icon deleted",
                self.api.client().post_empty(&path),
            )
            .await
    }
}
