//! Query cache for the admin client.
//!
//! - [`QueryCache`]: process-wide, injectable store of query results with
//!   in-flight de-duplication and prefix invalidation
//! - [`Query`] / [`Observer`]: keyed reads and their active subscriptions
//! - [`Mutation`]: one-shot writes that apply an [`InvalidationPlan`]
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! max_entries = 256
//! stale_time_ms = 0
//! query_retries = 0
//! dashboard_refetch_ms = 5000
//! ```

mod config;
mod lock;
mod mutation;
mod notify;
mod observer;
mod planner;
mod query;
mod query_cache;
mod store;

pub(crate) use lock::mutex_lock;

pub use config::CacheConfig;
pub use mutation::Mutation;
pub use notify::{MemoryNotifier, Notifier, Toast, ToastKind, TracingNotifier};
pub use observer::Observer;
pub use planner::{InvalidationPlan, MutationEvent, MutationKind};
pub use query::{Query, QueryOptions, QueryState, retry_delay};
pub use query_cache::QueryCache;
