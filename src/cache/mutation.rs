//! One-shot writes.

use std::future::Future;

use metrics::counter;
use tracing::{info, warn};

use super::notify::{Notifier, Toast};
use super::planner::{InvalidationPlan, MutationEvent};
use super::query_cache::QueryCache;
use crate::error::ApiError;
use crate::telemetry::METRIC_MUTATION_TOTAL;

type SuccessHook<T> = Box<dyn FnOnce(&T) + Send>;
type ErrorHook = Box<dyn FnOnce(&ApiError) + Send>;

/// A write plus what to do once it settles.
///
/// On success the invalidation plan derived from the event is applied and a
/// success toast is raised; on failure an error toast is raised and the cache
/// is left exactly as it was. Mutations are never retried.
pub struct Mutation<T> {
    event: MutationEvent,
    success_text: String,
    on_success: Option<SuccessHook<T>>,
    on_error: Option<ErrorHook>,
}

impl<T> Mutation<T> {
    pub fn new(event: MutationEvent, success_text: impl Into<String>) -> Self {
        Self {
            event,
            success_text: success_text.into(),
            on_success: None,
            on_error: None,
        }
    }

    pub fn on_success(mut self, hook: impl FnOnce(&T) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl FnOnce(&ApiError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub fn event(&self) -> &MutationEvent {
        &self.event
    }

    pub fn plan(&self) -> InvalidationPlan {
        InvalidationPlan::for_event(&self.event)
    }

    pub async fn execute<Fut>(
        self,
        cache: &QueryCache,
        notifier: &dyn Notifier,
        request: Fut,
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let resource = self.event.resource.as_str();
        let kind = self.event.kind.as_str();

        match request.await {
            Ok(value) => {
                let plan = self.plan();
                cache.apply(&plan);
                counter!(
                    METRIC_MUTATION_TOTAL,
                    "resource" => resource,
                    "kind" => kind,
                    "outcome" => "ok"
                )
                .increment(1);
                info!(mutation = %self.event, %plan, "mutation succeeded");

                if let Some(hook) = self.on_success {
                    hook(&value);
                }
                notifier.notify(Toast::success(self.success_text));
                Ok(value)
            }
            Err(err) => {
                counter!(
                    METRIC_MUTATION_TOTAL,
                    "resource" => resource,
                    "kind" => kind,
                    "outcome" => err.kind()
                )
                .increment(1);
                warn!(mutation = %self.event, error = %err, "mutation failed");

                if let Some(hook) = self.on_error {
                    hook(&err);
                }
                notifier.notify(Toast::error(err.user_message()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{QueryKey, Resource};
    use crate::cache::notify::{MemoryNotifier, ToastKind};
    use crate::cache::planner::MutationKind;
    use crate::cache::query::Query;
    use homeservice_api_types::Id;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    async fn seeded_cache() -> (QueryCache, Query<u8>) {
        let cache = QueryCache::default();
        let query = Query::new(Resource::Reviews.list_key(), || async { Ok(1_u8) })
            .stale_time(Duration::from_secs(60));
        cache.fetch(&query).await.expect("seed");
        (cache, query)
    }

    #[tokio::test]
    async fn success_applies_plan_and_notifies() {
        let (cache, query) = seeded_cache().await;
        let notifier = MemoryNotifier::new();
        let hooked = Arc::new(AtomicBool::new(false));
        let flag = hooked.clone();

        let event = MutationEvent::new(Resource::Reviews, MutationKind::Deleted(Id::from(1)));
        Mutation::new(event, "review deleted")
            .on_success(move |_: &()| flag.store(true, Ordering::SeqCst))
            .execute(&cache, &notifier, async { Ok(()) })
            .await
            .expect("mutation");

        assert_eq!(cache.is_invalidated(query.key()), Some(true));
        assert!(hooked.load(Ordering::SeqCst));
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].text, "review deleted");
    }

    #[tokio::test]
    async fn failure_leaves_cache_untouched() {
        let (cache, query) = seeded_cache().await;
        let notifier = MemoryNotifier::new();

        let event = MutationEvent::new(Resource::Reviews, MutationKind::Toggled(Id::from(1)));
        let err = Mutation::<()>::new(event, "unused")
            .execute(&cache, &notifier, async {
                Err(ApiError::Transport("connection refused".into()))
            })
            .await
            .expect_err("failure");

        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(cache.is_invalidated(query.key()), Some(false));
        assert_eq!(
            cache.get_query_data::<u8>(&QueryKey::from_url("/api/admin/reviews/list")).as_deref(),
            Some(&1)
        );
        let toasts = notifier.toasts();
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].text, "network error, please try again");
    }
}
