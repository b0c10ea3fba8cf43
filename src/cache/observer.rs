//! Active subscriptions to a query.
//!
//! An [`Observer`] is what a mounted view holds: it publishes the query's
//! state, polls on the query's refetch interval, refetches when an
//! invalidation covers its key, and drops the outcome of any request that was
//! superseded by a newer one. Clearing the cache sends it idle until it is
//! asked to fetch again. Dropping the observer stops all of that.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, trace};

use super::query::{Query, QueryState};
use super::query_cache::{CacheEvent, QueryCache};
use crate::error::ApiError;

enum Command<T> {
    SetQuery(Query<T>),
    Refetch,
}

type Outcome<T> = (u64, Result<Option<Arc<T>>, ApiError>);

pub struct Observer<T> {
    state: watch::Receiver<QueryState<T>>,
    commands: mpsc::UnboundedSender<Command<T>>,
    task: JoinHandle<()>,
}

impl<T> Observer<T>
where
    T: Send + Sync + 'static,
{
    /// Starts observing `query`. Must be called within a tokio runtime.
    pub fn new(cache: QueryCache, query: Query<T>) -> Self {
        let key = query.key().clone();
        let initial = if query.options().enabled {
            QueryState::Loading { key }
        } else {
            QueryState::Idle { key }
        };
        let (state_tx, state) = watch::channel(initial);
        let (commands, command_rx) = mpsc::unbounded_channel();
        let events = cache.subscribe();

        let task = tokio::spawn(
            ObserverTask {
                cache,
                query,
                seq: 0,
                cleared: false,
                state: state_tx,
                commands: command_rx,
                events,
            }
            .run(),
        );

        Self {
            state,
            commands,
            task,
        }
    }

    /// Replaces the observed query. Results of requests issued for the
    /// previous query are discarded even if they arrive later.
    pub fn set_query(&self, query: Query<T>) {
        let _ = self.commands.send(Command::SetQuery(query));
    }

    /// Refetches immediately, bypassing any fresh stored result.
    pub fn refetch(&self) {
        let _ = self.commands.send(Command::Refetch);
    }

    pub fn state(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    /// Waits for the next published state; `None` once the observer stopped.
    pub async fn changed(&mut self) -> Option<QueryState<T>> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }

    /// Waits until the current state is not loading.
    pub async fn settled(&mut self) -> Option<QueryState<T>> {
        self.state
            .wait_for(QueryState::is_settled)
            .await
            .ok()
            .map(|state| state.clone())
    }
}

impl<T> Drop for Observer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct ObserverTask<T> {
    cache: QueryCache,
    query: Query<T>,
    seq: u64,
    /// Set by a cache clear; only an explicit fetch request lifts it.
    cleared: bool,
    state: watch::Sender<QueryState<T>>,
    commands: mpsc::UnboundedReceiver<Command<T>>,
    events: broadcast::Receiver<CacheEvent>,
}

impl<T> ObserverTask<T>
where
    T: Send + Sync + 'static,
{
    async fn run(mut self) {
        let (outcome_tx, mut outcomes) = mpsc::unbounded_channel::<Outcome<T>>();
        let mut ticker = self.ticker();
        self.start(&outcome_tx, false);

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::SetQuery(query)) => {
                        debug!(
                            from = %self.query.key(),
                            to = %query.key(),
                            "observer query replaced"
                        );
                        self.query = query;
                        self.cleared = false;
                        ticker = self.ticker();
                        self.start(&outcome_tx, false);
                    }
                    Some(Command::Refetch) => {
                        if self.cleared {
                            self.cleared = false;
                            ticker = self.ticker();
                        }
                        self.start(&outcome_tx, true);
                    }
                    None => break,
                },
                Some((seq, result)) = outcomes.recv() => self.publish(seq, result),
                () = next_tick(&mut ticker) => {
                    trace!(key = %self.query.key(), "observer poll");
                    self.start(&outcome_tx, true);
                }
                event = self.events.recv() => match event {
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) if self.cleared => {}
                    Ok(CacheEvent::Invalidated(prefix))
                        if self.query.key().starts_with(&prefix) =>
                    {
                        debug!(
                            key = %self.query.key(),
                            %prefix,
                            "observer refetching after invalidation"
                        );
                        self.start(&outcome_tx, false);
                    }
                    Ok(CacheEvent::Invalidated(_)) => {}
                    Ok(CacheEvent::Cleared) => {
                        ticker = None;
                        self.clear();
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "observer lagged behind cache events; refetching");
                        self.start(&outcome_tx, false);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    }

    fn ticker(&self) -> Option<Interval> {
        let period = self.query.options().refetch_interval?;
        if period.is_zero() {
            return None;
        }
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(interval)
    }

    /// Issues a request tagged with a new sequence number.
    fn start(&mut self, outcomes: &mpsc::UnboundedSender<Outcome<T>>, force: bool) {
        self.seq += 1;
        let key = self.query.key().clone();

        if !self.query.options().enabled {
            self.state.send_replace(QueryState::Idle { key });
            return;
        }

        self.state.send_replace(QueryState::Loading { key });
        let seq = self.seq;
        let cache = self.cache.clone();
        let query = self.query.clone();
        let outcomes = outcomes.clone();
        tokio::spawn(async move {
            let result = if force {
                cache.refetch(&query).await
            } else {
                cache.fetch(&query).await
            };
            let _ = outcomes.send((seq, result));
        });
    }

    /// Goes idle and discards the outcome of any request still running.
    fn clear(&mut self) {
        self.seq += 1;
        self.cleared = true;
        debug!(key = %self.query.key(), "observer reset after cache clear");
        self.state.send_replace(QueryState::Idle {
            key: self.query.key().clone(),
        });
    }

    fn publish(&mut self, seq: u64, result: Result<Option<Arc<T>>, ApiError>) {
        let key = self.query.key().clone();
        if seq != self.seq {
            debug!(%key, seq, current = self.seq, "discarding superseded query result");
            return;
        }
        let next = match result {
            Ok(Some(data)) => QueryState::Ready { key, data },
            Ok(None) => QueryState::Idle { key },
            Err(error) => QueryState::Failed { key, error },
        };
        self.state.send_replace(next);
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
