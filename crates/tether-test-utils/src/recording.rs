// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A plugin whose constructors record every call and hand out mocks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tether_core::{
    EndpointKind, ServiceClient, ServiceProvider, TetherError, TopicPublisher, TopicSubscription,
    TransportHints, TypeName,
};
use tether_factory::{
    ClientProxyRequest, EndpointFactory, FactoryPlugin, PublisherRequest, ServerProxyRequest,
    SubscriptionRequest,
};

use crate::mock_endpoints::{MockPublisher, MockServiceClient, MockServiceProvider, MockSubscription};

/// Arguments one constructor invocation received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionRecord {
    pub kind: EndpointKind,
    pub type_name: TypeName,
    /// Name of the connection the endpoint was built on.
    pub connection: String,
    /// Topic or service name.
    pub endpoint_name: String,
    pub queue_size: Option<u32>,
    pub latch: Option<bool>,
    pub transport_hints: Option<TransportHints>,
}

#[derive(Default)]
struct LogState {
    records: Vec<ConstructionRecord>,
    subscriptions: Vec<Arc<MockSubscription>>,
    publishers: Vec<Arc<MockPublisher>>,
    clients: Vec<Arc<MockServiceClient>>,
    servers: Vec<Arc<MockServiceProvider>>,
}

/// Shared, cloneable log of constructor calls and the mocks they produced.
#[derive(Clone, Default)]
pub struct ConstructionLog {
    state: Arc<Mutex<LogState>>,
}

impl ConstructionLog {
    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn records(&self) -> Vec<ConstructionRecord> {
        self.lock().records.clone()
    }

    /// Number of constructor invocations for `kind`.
    pub fn count(&self, kind: EndpointKind) -> usize {
        self.lock().records.iter().filter(|r| r.kind == kind).count()
    }

    pub fn last_subscription(&self) -> Option<Arc<MockSubscription>> {
        self.lock().subscriptions.last().cloned()
    }

    pub fn last_publisher(&self) -> Option<Arc<MockPublisher>> {
        self.lock().publishers.last().cloned()
    }

    pub fn last_client(&self) -> Option<Arc<MockServiceClient>> {
        self.lock().clients.last().cloned()
    }

    pub fn last_server(&self) -> Option<Arc<MockServiceProvider>> {
        self.lock().servers.last().cloned()
    }
}

/// Plugin registering recording constructors for a configurable set of types.
pub struct RecordingPlugin {
    name: String,
    version: semver::Version,
    provides: Vec<(EndpointKind, TypeName)>,
    log: ConstructionLog,
}

impl RecordingPlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: semver::Version::new(0, 1, 0),
            provides: Vec::new(),
            log: ConstructionLog::default(),
        }
    }

    /// Provide a constructor for `type_name` in the `kind` table.
    pub fn provides(mut self, kind: EndpointKind, type_name: impl Into<TypeName>) -> Self {
        self.provides.push((kind, type_name.into()));
        self
    }

    /// Provide constructors for `type_name` in all four tables.
    pub fn provides_all(mut self, type_name: impl Into<TypeName>) -> Self {
        let type_name = type_name.into();
        for kind in EndpointKind::ALL {
            self.provides.push((kind, type_name.clone()));
        }
        self
    }

    pub fn log(&self) -> ConstructionLog {
        self.log.clone()
    }

    fn register_one(
        &self,
        factory: &EndpointFactory,
        kind: EndpointKind,
        type_name: &TypeName,
    ) -> Result<(), TetherError> {
        let log = self.log.clone();
        let name = type_name.clone();
        match kind {
            EndpointKind::Subscription => {
                factory.register_subscription_factory(type_name.clone(), move |req: SubscriptionRequest| {
                    let sub = Arc::new(MockSubscription::new(req.topic_name.clone(), req.callback));
                    let mut state = log.lock();
                    state.records.push(ConstructionRecord {
                        kind,
                        type_name: name.clone(),
                        connection: req.connection.name().to_string(),
                        endpoint_name: req.topic_name,
                        queue_size: Some(req.queue_size),
                        latch: None,
                        transport_hints: Some(req.transport_hints),
                    });
                    state.subscriptions.push(Arc::clone(&sub));
                    Ok(sub as Arc<dyn TopicSubscription>)
                })
            }
            EndpointKind::Publisher => {
                factory.register_publisher_factory(type_name.clone(), move |req: PublisherRequest| {
                    let publisher = Arc::new(MockPublisher::new(
                        name.clone(),
                        req.topic_name.clone(),
                        req.queue_size,
                        req.latch,
                    ));
                    let mut state = log.lock();
                    state.records.push(ConstructionRecord {
                        kind,
                        type_name: name.clone(),
                        connection: req.connection.name().to_string(),
                        endpoint_name: req.topic_name,
                        queue_size: Some(req.queue_size),
                        latch: Some(req.latch),
                        transport_hints: None,
                    });
                    state.publishers.push(Arc::clone(&publisher));
                    Ok(publisher as Arc<dyn TopicPublisher>)
                })
            }
            EndpointKind::ClientProxy => {
                factory.register_client_proxy_factory(type_name.clone(), move |req: ClientProxyRequest| {
                    let client = Arc::new(MockServiceClient::new(req.service_name.clone(), req.callback));
                    let mut state = log.lock();
                    state.records.push(ConstructionRecord {
                        kind,
                        type_name: name.clone(),
                        connection: req.connection.name().to_string(),
                        endpoint_name: req.service_name,
                        queue_size: None,
                        latch: None,
                        transport_hints: None,
                    });
                    state.clients.push(Arc::clone(&client));
                    Ok(client as Arc<dyn ServiceClient>)
                })
            }
            EndpointKind::ServerProxy => {
                factory.register_server_proxy_factory(type_name.clone(), move |req: ServerProxyRequest| {
                    let server = Arc::new(MockServiceProvider::new(req.service_name.clone()));
                    let mut state = log.lock();
                    state.records.push(ConstructionRecord {
                        kind,
                        type_name: name.clone(),
                        connection: req.connection.name().to_string(),
                        endpoint_name: req.service_name,
                        queue_size: None,
                        latch: None,
                        transport_hints: None,
                    });
                    state.servers.push(Arc::clone(&server));
                    Ok(server as Arc<dyn ServiceProvider>)
                })
            }
        }
    }
}

impl FactoryPlugin for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        self.version.clone()
    }

    fn register(&self, factory: &EndpointFactory) -> Result<(), TetherError> {
        for (kind, type_name) in &self.provides {
            self.register_one(factory, *kind, type_name)?;
        }
        tracing::debug!(plugin = %self.name, types = self.provides.len(), "recording plugin registered");
        Ok(())
    }
}
