//! Invalidation planning.
//!
//! Maps each successful write to the exact set of query keys it makes stale.
//! Writes never invalidate another resource's keys.

use std::collections::BTreeSet;
use std::fmt;

use homeservice_api_types::Id;

use crate::api::{QueryKey, Resource};

/// What a successful write did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Updated(Id),
    /// Singleton document replaced wholesale (operating hours).
    Replaced,
    Deleted(Id),
    Toggled(Id),
    Reordered(Vec<Id>),
    StatusChanged(Id),
    Cancelled(Id),
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Created => "created",
            MutationKind::Updated(_) | MutationKind::Replaced => "updated",
            MutationKind::Deleted(_) => "deleted",
            MutationKind::Toggled(_) => "toggled",
            MutationKind::Reordered(_) => "reordered",
            MutationKind::StatusChanged(_) => "status_changed",
            MutationKind::Cancelled(_) => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationEvent {
    pub resource: Resource,
    pub kind: MutationKind,
}

impl MutationEvent {
    pub fn new(resource: Resource, kind: MutationKind) -> Self {
        Self { resource, kind }
    }
}

impl fmt::Display for MutationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.resource, self.kind.as_str())
    }
}

/// Query key prefixes to invalidate after one or more writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationPlan {
    keys: BTreeSet<QueryKey>,
}

impl fmt::Display for InvalidationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvalidationPlan {{ keys: {} }}", self.keys.len())
    }
}

impl InvalidationPlan {
    pub fn for_event(event: &MutationEvent) -> Self {
        let mut plan = Self::default();
        plan.add(event);
        plan
    }

    /// Merge several writes into one plan; shared keys appear once.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a MutationEvent>) -> Self {
        let mut plan = Self::default();
        for event in events {
            plan.add(event);
        }
        plan
    }

    fn add(&mut self, event: &MutationEvent) {
        let resource = event.resource;
        self.keys.insert(resource.list_key());

        match &event.kind {
            MutationKind::Updated(id) | MutationKind::Toggled(id) if resource.has_detail() => {
                self.keys.insert(resource.detail_key(id));
            }
            MutationKind::Reordered(ids) if resource == Resource::Promotions => {
                self.keys
                    .extend(ids.iter().map(|id| resource.detail_key(id)));
            }
            MutationKind::Created
            | MutationKind::Updated(_)
            | MutationKind::Replaced
            | MutationKind::Deleted(_)
            | MutationKind::Toggled(_)
            | MutationKind::Reordered(_)
            | MutationKind::StatusChanged(_)
            | MutationKind::Cancelled(_) => {}
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &QueryKey> {
        self.keys.iter()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
