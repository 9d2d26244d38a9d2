// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-category constructor table.
//!
//! A `FactoryTable<C>` maps type names to constructors for one endpoint
//! category. Registration is monotonic: there is no removal API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tether_core::{DuplicatePolicy, EndpointKind, TetherError, TypeName};
use tracing::{debug, warn};

use crate::category::{Constructor, EndpointCategory};

/// Constructors for one endpoint category, keyed by type name.
pub struct FactoryTable<C: EndpointCategory> {
    constructors: DashMap<TypeName, Arc<Constructor<C>>>,
    policy: DuplicatePolicy,
    registrations: AtomicUsize,
}

impl<C: EndpointCategory> FactoryTable<C> {
    /// Create an empty table applying `policy` to duplicate registrations.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            constructors: DashMap::new(),
            policy,
            registrations: AtomicUsize::new(0),
        }
    }

    pub fn kind(&self) -> EndpointKind {
        C::KIND
    }

    /// Register `constructor` under `type_name`.
    ///
    /// Duplicate detection and insertion happen under the same shard lock, so
    /// of two racing registrations exactly one wins under
    /// [`DuplicatePolicy::Reject`].
    pub fn register<F>(&self, type_name: impl Into<TypeName>, constructor: F) -> Result<(), TetherError>
    where
        F: Fn(C::Request) -> Result<Arc<C::Endpoint>, TetherError> + Send + Sync + 'static,
    {
        let constructor: Arc<Constructor<C>> = Arc::new(constructor);

        match self.constructors.entry(type_name.into()) {
            Entry::Vacant(slot) => {
                debug!(kind = %C::KIND, type_name = %slot.key(), "registered factory");
                slot.insert(constructor);
                self.registrations.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Entry::Occupied(mut slot) => match self.policy {
                DuplicatePolicy::Reject => {
                    warn!(
                        kind = %C::KIND,
                        type_name = %slot.key(),
                        "rejected duplicate factory registration"
                    );
                    Err(TetherError::DuplicateFactory {
                        kind: C::KIND,
                        type_name: slot.key().clone(),
                    })
                }
                DuplicatePolicy::Replace => {
                    warn!(
                        kind = %C::KIND,
                        type_name = %slot.key(),
                        "replacing previously registered factory"
                    );
                    slot.insert(constructor);
                    self.registrations.fetch_add(1, Ordering::Relaxed);
                    Ok(())
                }
            },
        }
    }

    /// Construct an endpoint for `type_name`.
    ///
    /// Returns `Ok(None)` when no constructor is registered, without invoking
    /// anything. Otherwise the constructor runs exactly once, outside the
    /// table lock, and its error (if any) is returned unchanged.
    pub fn create(
        &self,
        type_name: &str,
        request: C::Request,
    ) -> Result<Option<Arc<C::Endpoint>>, TetherError> {
        let Some(constructor) = self.constructor(type_name) else {
            debug!(kind = %C::KIND, type_name, "no factory registered for type");
            return Ok(None);
        };

        let endpoint = constructor(request)?;
        debug!(kind = %C::KIND, type_name, "constructed endpoint");
        Ok(Some(endpoint))
    }

    fn constructor(&self, type_name: &str) -> Option<Arc<Constructor<C>>> {
        self.constructors
            .get(type_name)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// All registered type names, sorted.
    pub fn type_names(&self) -> Vec<TypeName> {
        let mut names: Vec<TypeName> = self
            .constructors
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Successful registrations so far, replacements included.
    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Publisher, PublisherRequest};
    use std::any::Any;
    use tether_core::{Connection, ConnectionHandle, Message, TopicPublisher};

    struct Node;

    impl Connection for Node {
        fn name(&self) -> &str {
            "node"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct NamedPublisher {
        topic: String,
    }

    impl TopicPublisher for NamedPublisher {
        fn topic_name(&self) -> &str {
            &self.topic
        }

        fn publish(&self, _message: &Message) -> Result<(), TetherError> {
            Ok(())
        }
    }

    fn request(topic: &str) -> PublisherRequest {
        let connection: ConnectionHandle = Arc::new(Node);
        PublisherRequest {
            connection,
            topic_name: topic.to_string(),
            queue_size: 1,
            latch: false,
        }
    }

    fn build(req: PublisherRequest) -> Result<Arc<dyn TopicPublisher>, TetherError> {
        let publisher: Arc<dyn TopicPublisher> = Arc::new(NamedPublisher {
            topic: req.topic_name,
        });
        Ok(publisher)
    }

    #[test]
    fn register_then_create_invokes_constructor_once() {
        let table = FactoryTable::<Publisher>::new(DuplicatePolicy::Reject);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        table
            .register("std_msgs/String", move |req: PublisherRequest| {
                counter.fetch_add(1, Ordering::SeqCst);
                build(req)
            })
            .unwrap();

        let endpoint = table.create("std_msgs/String", request("chatter")).unwrap();
        assert_eq!(endpoint.unwrap().topic_name(), "chatter");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_type_returns_none() {
        let table = FactoryTable::<Publisher>::new(DuplicatePolicy::Reject);
        table.register("std_msgs/String", build).unwrap();
        assert!(table.create("std_msgs/Bool", request("flag")).unwrap().is_none());
        assert!(table.create("std_msgs/string", request("flag")).unwrap().is_none());
    }

    #[test]
    fn reject_policy_keeps_first_constructor() {
        let table = FactoryTable::<Publisher>::new(DuplicatePolicy::Reject);
        table.register("pkg/Msg", build).unwrap();

        let err = table.register("pkg/Msg", build).unwrap_err();
        assert!(matches!(
            err,
            TetherError::DuplicateFactory { kind: EndpointKind::Publisher, ref type_name }
                if type_name.as_str() == "pkg/Msg"
        ));
        assert_eq!(table.len(), 1);
        assert_eq!(table.registrations(), 1);
    }

    #[test]
    fn replace_policy_uses_latest_constructor() {
        let table = FactoryTable::<Publisher>::new(DuplicatePolicy::Replace);
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            table
                .register("pkg/Msg", move |req: PublisherRequest| {
                    seen.lock().unwrap().push(tag);
                    build(req)
                })
                .unwrap();
        }

        table.create("pkg/Msg", request("out")).unwrap().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["second"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.registrations(), 2);
    }

    #[test]
    fn constructor_error_is_returned_unchanged() {
        let table = FactoryTable::<Publisher>::new(DuplicatePolicy::Reject);
        table
            .register("pkg/Msg", |req: PublisherRequest| {
                Err(TetherError::InvalidArgument(format!(
                    "queue size {} too small",
                    req.queue_size
                )))
            })
            .unwrap();

        let err = table
            .create("pkg/Msg", request("out"))
            .err()
            .expect("constructor error must surface");
        assert_eq!(err.to_string(), "invalid argument: queue size 1 too small");
    }

    #[test]
    fn type_names_are_sorted() {
        let table = FactoryTable::<Publisher>::new(DuplicatePolicy::Reject);
        for name in ["zeta/Msg", "alpha/Msg", "mid/Msg"] {
            table.register(name, build).unwrap();
        }
        let names: Vec<String> = table.type_names().into_iter().map(|n| n.0).collect();
        assert_eq!(names, vec!["alpha/Msg", "mid/Msg", "zeta/Msg"]);
        assert!(table.contains("mid/Msg"));
        assert!(!table.is_empty());
        assert_eq!(table.kind(), EndpointKind::Publisher);
    }
}
