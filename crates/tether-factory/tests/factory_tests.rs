// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the endpoint factory.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};

use proptest::prelude::*;
use tether_core::{
    Connection, ConnectionHandle, DuplicatePolicy, EndpointKind, Message, SubscriptionCallback,
    TetherError, TopicPublisher, TopicSubscription, TransportHints,
};
use tether_factory::{
    EndpointFactory, PublisherRequest, SubscriptionFactoryRegistrar, SubscriptionRequest,
};
use tracing_test::traced_test;

struct TestNode;

impl Connection for TestNode {
    fn name(&self) -> &str {
        "test_node"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn node() -> ConnectionHandle {
    Arc::new(TestNode)
}

fn no_op_callback() -> SubscriptionCallback {
    Arc::new(|_msg: &Message| {})
}

struct Sub {
    topic: String,
}

impl TopicSubscription for Sub {
    fn topic_name(&self) -> &str {
        &self.topic
    }
}

struct Pub {
    topic: String,
}

impl TopicPublisher for Pub {
    fn topic_name(&self) -> &str {
        &self.topic
    }

    fn publish(&self, _message: &Message) -> Result<(), TetherError> {
        Ok(())
    }
}

fn build_sub(req: SubscriptionRequest) -> Result<Arc<dyn TopicSubscription>, TetherError> {
    let sub: Arc<dyn TopicSubscription> = Arc::new(Sub {
        topic: req.topic_name,
    });
    Ok(sub)
}

fn build_pub(req: PublisherRequest) -> Result<Arc<dyn TopicPublisher>, TetherError> {
    let publisher: Arc<dyn TopicPublisher> = Arc::new(Pub {
        topic: req.topic_name,
    });
    Ok(publisher)
}

#[derive(Debug, Clone, PartialEq)]
struct Seen {
    topic_name: String,
    queue_size: u32,
    hints: TransportHints,
}

#[test]
fn subscription_end_to_end_records_arguments() {
    let factory = EndpointFactory::default();
    let seen = Arc::new(Mutex::new(Vec::<Seen>::new()));
    let recorder = Arc::clone(&seen);
    factory
        .register_subscription_factory("pkg/MsgA", move |req: SubscriptionRequest| {
            recorder.lock().unwrap().push(Seen {
                topic_name: req.topic_name.clone(),
                queue_size: req.queue_size,
                hints: req.transport_hints.clone(),
            });
            build_sub(req)
        })
        .unwrap();

    let hints = TransportHints::default().tcp_nodelay();
    let handle = factory
        .create_subscription("pkg/MsgA", node(), "sensors/data", no_op_callback(), 10, hints.clone())
        .unwrap();

    assert!(handle.is_some(), "handle must be non-empty");
    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![Seen {
            topic_name: "sensors/data".to_string(),
            queue_size: 10,
            hints,
        }]
    );
}

#[test]
fn unregistered_publisher_is_not_found_without_side_effects() {
    let factory = EndpointFactory::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    factory
        .register_publisher_factory("pkg/Other", move |req: PublisherRequest| {
            counter.fetch_add(1, Ordering::SeqCst);
            build_pub(req)
        })
        .unwrap();

    let before = factory.summary();
    let result = factory
        .create_publisher("pkg/MsgB", node(), "out/topic", 5, false)
        .unwrap();

    assert!(result.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(factory.summary(), before);
}

#[test]
fn publisher_does_not_satisfy_subscription_lookup() {
    let factory = EndpointFactory::default();
    factory
        .register_publisher_factory("geometry/Twist", build_pub)
        .unwrap();

    let sub = factory
        .create_subscription("geometry/Twist", node(), "cmd_vel", no_op_callback(), 1, TransportHints::default())
        .unwrap();
    assert!(sub.is_none());

    let publisher = factory
        .create_publisher("geometry/Twist", node(), "cmd_vel", 1, true)
        .unwrap();
    assert_eq!(publisher.unwrap().topic_name(), "cmd_vel");
}

#[test]
fn constructor_failure_propagates() {
    let factory = EndpointFactory::default();
    factory
        .register_publisher_factory("pkg/Strict", |req: PublisherRequest| {
            if req.queue_size == 0 {
                return Err(TetherError::construction(
                    EndpointKind::Publisher,
                    "pkg/Strict",
                    "queue_size must be positive",
                ));
            }
            build_pub(req)
        })
        .unwrap();

    let err = factory
        .create_publisher("pkg/Strict", node(), "out", 0, false)
        .err()
        .expect("constructor error must surface");
    assert!(matches!(
        err,
        TetherError::Construction { kind: EndpointKind::Publisher, ref message, .. }
            if message == "queue_size must be positive"
    ));

    assert!(factory.create_publisher("pkg/Strict", node(), "out", 1, false).unwrap().is_some());
}

#[test]
fn constructor_may_reenter_the_factory() {
    let factory = Arc::new(EndpointFactory::default());
    let inner = Arc::clone(&factory);
    factory
        .register_publisher_factory("pkg/Outer", move |req: PublisherRequest| {
            // Lazily registers a companion type while the outer lookup is in flight.
            if !inner.supports(EndpointKind::Publisher, "pkg/Inner") {
                inner.register_publisher_factory("pkg/Inner", build_pub)?;
            }
            build_pub(req)
        })
        .unwrap();

    assert!(factory.create_publisher("pkg/Outer", node(), "a", 1, false).unwrap().is_some());
    assert!(factory.create_publisher("pkg/Inner", node(), "b", 1, false).unwrap().is_some());
}

#[test]
fn duplicate_outcome_is_deterministic_across_runs() {
    for _ in 0..20 {
        let reject = EndpointFactory::new(DuplicatePolicy::Reject);
        reject.register_publisher_factory("pkg/Dup", build_pub).unwrap();
        assert!(matches!(
            reject.register_publisher_factory("pkg/Dup", build_pub),
            Err(TetherError::DuplicateFactory { .. })
        ));

        let replace = EndpointFactory::new(DuplicatePolicy::Replace);
        replace.register_publisher_factory("pkg/Dup", build_pub).unwrap();
        replace.register_publisher_factory("pkg/Dup", build_pub).unwrap();
        assert_eq!(replace.summary().publishers, 1);
    }
}

#[test]
#[traced_test]
fn replacing_a_factory_is_logged() {
    let factory = EndpointFactory::new(DuplicatePolicy::Replace);
    factory.register_publisher_factory("pkg/Loud", build_pub).unwrap();
    factory.register_publisher_factory("pkg/Loud", build_pub).unwrap();

    assert!(logs_contain("replacing previously registered factory"));
    assert!(logs_contain("pkg/Loud"));
}

#[test]
#[traced_test]
fn rejecting_a_factory_is_logged() {
    let factory = EndpointFactory::new(DuplicatePolicy::Reject);
    factory.register_publisher_factory("pkg/Twice", build_pub).unwrap();
    let _ = factory.register_publisher_factory("pkg/Twice", build_pub);

    assert!(logs_contain("rejected duplicate factory registration"));
}

#[test]
fn concurrent_creates_see_full_table() {
    const TYPES: usize = 32;
    let factory = EndpointFactory::default();
    for i in 0..TYPES {
        factory
            .register_publisher_factory(format!("pkg/Msg{i}"), build_pub)
            .unwrap();
    }

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let factory = &factory;
            scope.spawn(move || {
                for round in 0..50 {
                    let i = (worker * 7 + round) % TYPES;
                    let topic = format!("w{worker}/r{round}");
                    let publisher = factory
                        .create_publisher(&format!("pkg/Msg{i}"), node(), topic.clone(), 1, false)
                        .unwrap()
                        .expect("every registered type must be visible");
                    assert_eq!(publisher.topic_name(), topic);
                }
            });
        }
    });
}

#[test]
fn racing_registrations_admit_exactly_one_winner() {
    let factory = EndpointFactory::new(DuplicatePolicy::Reject);
    let winners = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                if factory.register_publisher_factory("pkg/Contested", build_pub).is_ok() {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert_eq!(factory.summary().publishers, 1);
}

#[test]
fn registration_on_one_thread_is_visible_to_create_on_another() {
    const TYPES: usize = 64;
    let factory = EndpointFactory::default();
    let (registered_tx, registered_rx) = mpsc::channel::<String>();

    std::thread::scope(|scope| {
        let factory = &factory;
        scope.spawn(move || {
            for i in 0..TYPES {
                let type_name = format!("pkg/Late{i}");
                factory
                    .register_publisher_factory(type_name.as_str(), build_pub)
                    .unwrap();
                registered_tx.send(type_name).unwrap();
            }
        });

        scope.spawn(move || {
            let mut created = 0;
            for type_name in registered_rx {
                let publisher = factory
                    .create_publisher(&type_name, node(), "late", 1, false)
                    .unwrap();
                assert!(publisher.is_some(), "{type_name} registered before lookup");
                created += 1;
            }
            assert_eq!(created, TYPES);
        });
    });

    assert_eq!(factory.summary().publishers, TYPES);
}

#[test]
fn registrar_and_direct_registration_are_equivalent() {
    let via_registrar = EndpointFactory::default();
    let _registrar = SubscriptionFactoryRegistrar::new(&via_registrar, "pkg/Same", build_sub).unwrap();

    let direct = EndpointFactory::default();
    direct.register_subscription_factory("pkg/Same", build_sub).unwrap();

    for kind in EndpointKind::ALL {
        assert_eq!(
            via_registrar.registered_types(kind),
            direct.registered_types(kind),
            "{kind} tables differ"
        );
    }
}

fn kind_strategy() -> impl Strategy<Value = EndpointKind> {
    prop::sample::select(EndpointKind::ALL.to_vec())
}

proptest! {
    /// Registering under one kind never makes the name visible under another.
    #[test]
    fn tables_are_independent(
        name in "[a-z_]{1,12}/[A-Z][a-zA-Z]{0,12}",
        kind in kind_strategy(),
    ) {
        let factory = EndpointFactory::default();
        match kind {
            EndpointKind::Subscription => factory.register_subscription_factory(name.as_str(), build_sub).unwrap(),
            EndpointKind::Publisher => factory.register_publisher_factory(name.as_str(), build_pub).unwrap(),
            EndpointKind::ClientProxy => factory
                .register_client_proxy_factory(name.as_str(), |_req| {
                    Err(TetherError::Internal("never built".into()))
                })
                .unwrap(),
            EndpointKind::ServerProxy => factory
                .register_server_proxy_factory(name.as_str(), |_req| {
                    Err(TetherError::Internal("never built".into()))
                })
                .unwrap(),
        }

        for other in EndpointKind::ALL {
            prop_assert_eq!(factory.supports(other, &name), other == kind);
        }
        prop_assert_eq!(factory.summary().total(), 1);
    }

    /// Lookups for names never registered return `None` for any arguments.
    #[test]
    fn unknown_names_never_construct(
        topic in "[a-z/]{1,20}",
        queue_size in 0u32..1000,
        latch in any::<bool>(),
    ) {
        let factory = EndpointFactory::default();
        factory.register_publisher_factory("pkg/Known", build_pub).unwrap();
        let result = factory.create_publisher("pkg/Unknown", node(), topic, queue_size, latch).unwrap();
        prop_assert!(result.is_none());
    }
}
