//! Per-entity reads and writes.
//!
//! Every read is a [`Query`] keyed by the endpoint it calls; every write is a
//! [`Mutation`] whose invalidation plan follows the policy in
//! [`InvalidationPlan`](crate::cache::InvalidationPlan). Request payloads are
//! validated before anything is sent.

mod customers;
mod dashboard;
mod film;
mod icons;
mod portfolios;
mod promotions;
mod reservations;
mod reviews;
mod services;
mod settings;

use std::sync::Arc;

use homeservice_api_types::{Id, Page};
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, QueryKey, QueryParams, Resource};
use crate::auth::AuthGate;
use crate::cache::{Mutation, MutationEvent, MutationKind, Notifier, Query, QueryCache};
use crate::error::ApiError;

pub use customers::{CustomerFilter, Customers};
pub use dashboard::Dashboard;
pub use film::FilmOptimizer;
pub use icons::{IconFilter, Icons};
pub use portfolios::{PortfolioFilter, Portfolios};
pub use promotions::Promotions;
pub use reservations::{ReservationFilter, Reservations};
pub use reviews::{ReviewFilter, Reviews};
pub use services::Services;
pub use settings::{HolidayFilter, OperatingSettings};

/// Entry point bundling the transport, the shared cache, the notifier and
/// the auth gate.
#[derive(Clone)]
pub struct AdminApi {
    client: ApiClient,
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
    gate: Arc<AuthGate>,
}

impl std::fmt::Debug for AdminApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApi")
            .field("client", &self.client)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl AdminApi {
    pub fn new(
        client: ApiClient,
        cache: QueryCache,
        notifier: Arc<dyn Notifier>,
        sign_in_path: impl Into<String>,
    ) -> Self {
        let gate = Arc::new(AuthGate::new(client.cookies().clone(), sign_in_path));
        Self {
            client,
            cache,
            notifier,
            gate,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn reservations(&self) -> Reservations<'_> {
        Reservations::new(self)
    }

    pub fn customers(&self) -> Customers<'_> {
        Customers::new(self)
    }

    pub fn reviews(&self) -> Reviews<'_> {
        Reviews::new(self)
    }

    pub fn services(&self) -> Services<'_> {
        Services::new(self)
    }

    pub fn promotions(&self) -> Promotions<'_> {
        Promotions::new(self)
    }

    pub fn portfolios(&self) -> Portfolios<'_> {
        Portfolios::new(self)
    }

    pub fn icons(&self) -> Icons<'_> {
        Icons::new(self)
    }

    pub fn settings(&self) -> OperatingSettings<'_> {
        OperatingSettings::new(self)
    }

    pub fn film(&self) -> FilmOptimizer<'_> {
        FilmOptimizer::new(self)
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(self)
    }

    /// Fetches a query through the shared cache.
    pub async fn fetch<T>(&self, query: &Query<T>) -> Result<Option<Arc<T>>, ApiError>
    where
        T: Send + Sync + 'static,
    {
        self.cache.fetch(query).await
    }

    /// Logs out and drops every cached result.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.gate.sign_out(&self.client, &self.cache).await
    }

    /// Query for `GET path`, keyed by `path`, with the configured defaults.
    fn get_query<T>(&self, path: String) -> Query<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let client = self.client.clone();
        let key = QueryKey::from_url(&path);
        let path: Arc<str> = path.into();
        self.with_defaults(Query::new(key, move || {
            let client = client.clone();
            let path = path.clone();
            async move { client.get::<T>(&path).await }
        }))
    }

    /// Like [`get_query`](Self::get_query) for paginated list payloads.
    fn page_query<T>(&self, path: String) -> Query<Page<T>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let client = self.client.clone();
        let key = QueryKey::from_url(&path);
        let path: Arc<str> = path.into();
        self.with_defaults(Query::new(key, move || {
            let client = client.clone();
            let path = path.clone();
            async move { client.get_page::<T>(&path).await }
        }))
    }

    /// Detail read that stays disabled until an id is known. Forcing it
    /// without an id fails locally instead of issuing a request.
    fn detail_query<T>(&self, resource: Resource, id: Option<&Id>) -> Query<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        match id {
            Some(id) => self.get_query(resource.detail_path(id)),
            None => self
                .with_defaults(Query::new(resource.pending_detail_key(), || async {
                    Err(ApiError::MissingPrecondition("id"))
                }))
                .enabled(false),
        }
    }

    fn list_path(resource: Resource, params: &QueryParams) -> String {
        params.apply(&resource.list_path())
    }

    fn with_defaults<T: Send + 'static>(&self, query: Query<T>) -> Query<T> {
        query
            .stale_time(self.cache.default_stale_time())
            .retry(self.cache.default_retry())
    }

    async fn mutate<T, Fut>(
        &self,
        resource: Resource,
        kind: MutationKind,
        success_text: impl Into<String>,
        request: Fut,
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        Mutation::new(MutationEvent::new(resource, kind), success_text)
            .execute(&self.cache, self.notifier.as_ref(), request)
            .await
    }
}
