use homeservice_api_types::{Holiday, HolidayInput, Id, OperatingHours, Validate};

use super::AdminApi;
use crate::api::{QueryParams, Resource};
use crate::cache::{MutationKind, Query};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HolidayFilter {
    pub year: Option<i32>,
}

impl HolidayFilter {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new().set_opt("year", self.year)
    }
}

/// Weekly opening hours and the holiday calendar.
pub struct OperatingSettings<'a> {
    api: &'a AdminApi,
}

impl<'a> OperatingSettings<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    pub fn hours(&self) -> Query<OperatingHours> {
        self.api.get_query(Resource::OperatingHours.list_path())
    }

    /// Replaces the whole week in one request.
    pub async fn update_hours(&self, hours: &OperatingHours) -> Result<(), ApiError> {
        hours.validate()?;
        let path = Resource::OperatingHours.collection_path();
        self.api
            .mutate(
                Resource::OperatingHours,
                MutationKind::Replaced,
                "operating hours saved",
                self.api.client().post_unit(path, hours),
            )
            .await
    }

    pub fn holidays(&self, filter: &HolidayFilter) -> Query<Vec<Holiday>> {
        self.api
            .get_query(AdminApi::list_path(Resource::Holidays, &filter.to_params()))
    }

    pub async fn add_holiday(&self, input: &HolidayInput) -> Result<Holiday, ApiError> {
        input.validate()?;
        let path = Resource::Holidays.create_path();
        self.api
            .mutate(
                Resource::Holidays,
                MutationKind::Created,
                format!("holiday {} added", input.date),
                self.api.client().post(&path, input),
            )
            .await
    }

    pub async fn delete_holiday(&self, id: &Id) -> Result<(), ApiError> {
        let path = Resource::Holidays.delete_path(id);
        self.api
            .mutate(
                Resource::Holidays,
                MutationKind::Deleted(id.clone()),
                "holiday removed",
                self.api.client().post_empty(&path),
            )
            .await
    }
}
