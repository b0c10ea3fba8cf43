use homeservice_api_types::DashboardStats;

use super::AdminApi;
use crate::api::endpoints::DASHBOARD_STATS_PATH;
use crate::cache::{Observer, Query};

pub struct Dashboard<'a> {
    api: &'a AdminApi,
}

impl<'a> Dashboard<'a> {
    pub(super) fn new(api: &'a AdminApi) -> Self {
        Self { api }
    }

    /// Headline counters, polled at the configured dashboard interval while
    /// observed.
    pub fn stats(&self) -> Query<DashboardStats> {
        let interval = self.api.cache().config().dashboard_refetch();
        self.api
            .get_query(DASHBOARD_STATS_PATH.to_string())
            .refetch_interval(interval)
    }

    /// Keeps the statistics current until the returned observer is dropped.
    pub fn observe(&self) -> Observer<DashboardStats> {
        Observer::new(self.api.cache().clone(), self.stats())
    }
}
