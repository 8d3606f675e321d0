//! Per-connection subscription manager.
//!
//! Tracks which entity types a WebSocket client is subscribed to, optionally
//! scoped to one deployment, and provides server-side change filtering.

use std::collections::HashSet;

use crate::domain::Deployment;

/// Wildcard entity type matching every change.
pub const WILDCARD: &str = "*";

/// One subscription. `None` in either field matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Topic {
    deployment: Option<Deployment>,
    entity_type: Option<String>,
}

impl Topic {
    fn new(deployment: Option<Deployment>, entity_type: &str) -> Self {
        Self {
            deployment,
            entity_type: (entity_type != WILDCARD).then(|| entity_type.to_string()),
        }
    }
}

/// Manages the set of entity type subscriptions for a single connection.
///
/// A subscription without a deployment matches both namespaces, so
/// `"Approval"` alone streams token and vault approvals.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    topics: HashSet<Topic>,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds entity types to the subscription set, scoped to `deployment`
    /// when given. `"*"` subscribes to every type in that scope.
    pub fn subscribe(&mut self, deployment: Option<Deployment>, entity_types: &[String]) {
        for entity_type in entity_types {
            self.topics.insert(Topic::new(deployment, entity_type));
        }
    }

    /// Removes subscriptions previously added with the same scope.
    pub fn unsubscribe(&mut self, deployment: Option<Deployment>, entity_types: &[String]) {
        for entity_type in entity_types {
            self.topics.remove(&Topic::new(deployment, entity_type));
        }
    }

    /// Returns `true` if a change to `entity_type` in `deployment` should be
    /// forwarded.
    #[must_use]
    pub fn matches(&self, deployment: Deployment, entity_type: &str) -> bool {
        [None, Some(deployment)].into_iter().any(|scope| {
            self.topics.contains(&Topic::new(scope, WILDCARD))
                || self.topics.contains(&Topic::new(scope, entity_type))
        })
    }

    /// Returns the number of explicit (non-wildcard) subscriptions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.topics
            .iter()
            .filter(|topic| topic.entity_type.is_some())
            .count()
    }

    /// Returns `true` if a wildcard subscription is active for `deployment`
    /// (or for every deployment when `None`).
    #[must_use]
    pub fn has_wildcard(&self, deployment: Option<Deployment>) -> bool {
        self.topics.contains(&Topic::new(deployment, WILDCARD))
    }
}
