use homeservice_api_types::{Film, FilmInput, FilmProject, FilmProjectInput, Id, Validate};

use super::AdminApi;
use crate::api::Resource;
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

/// Film-optimizer bookkeeping: projects and the film stock they cut from.
/// The cutting layout itself is computed server-side.
pub struct FilmOptimizer<'a> {
    api: &'a AdminApi,
}

impl<'a> FilmOptimizer<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    pub fn projects(&self) -> Query<Vec<FilmProject>> {
        self.api.get_query(Resource::FilmProjects.list_path())
    }

    pub async fn create_project(&self, input: &FilmProjectInput) -> Result<FilmProject, ApiError> {
        input.validate()?;
        let path = Resource::FilmProjects.create_path();
        self.api
            .mutate(
                Resource::FilmProjects,
                MutationKind::Created,
                format!("project \"{}\" created", input.name),
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn delete_project(&self, id: &Id) -> Result<(), ApiError> {
        let path = Resource::FilmProjects.delete_path(id);
        self.api
            .mutate(
                Resource::FilmProjects,
                MutationKind::Deleted(id.clone()),
                "project deleted",
                self.api.client().post_empty(&path),
            )
            .await
    }

    pub fn films(&self) -> Query<Vec<Film>> {
        self.api.get_query(Resource::Films.list_path())
    }

    pub async fn create_film(&self, input: &FilmInput) -> Result<Film, ApiError> {
        input.validate()?;
        let path = Resource::Films.create_path();
        self.api
            .mutate(
                Resource::Films,
                MutationKind::Created,
                format!("film \"{}\" registered", input.name),
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn delete_film(&self, id: &Id) -> Result<(), ApiError> {
        let path = Resource::Films.delete_path(id);
        self.api
            .mutate(
                Resource::Films,
                MutationKind::Deleted(id.clone()),
                "film deleted",
                self.api.client().post_empty(&path),
            )
            .await
    }
}
