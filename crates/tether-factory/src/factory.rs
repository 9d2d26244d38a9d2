// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The endpoint factory: one constructor table per endpoint category.
//!
//! Plugins register constructors through the `register_*_factory` methods;
//! the bridge host builds endpoints through the `create_*` methods knowing
//! only the type name. The four tables are independent, so a publisher
//! registered for `geometry_msgs/Twist` never satisfies a subscription lookup
//! for the same name.

use std::sync::Arc;

use serde::Serialize;
use tether_core::{
    ConnectionHandle, DuplicatePolicy, EndpointKind, RequestCallback, ServiceClient,
    ServiceProvider, SubscriptionCallback, TetherError, TopicPublisher, TopicSubscription,
    TransportHints, TypeName,
};

use crate::category::{
    ClientProxy, ClientProxyRequest, EndpointCategory, Publisher, PublisherRequest, ServerProxy,
    ServerProxyRequest, Subscription, SubscriptionRequest,
};
use crate::table::FactoryTable;

/// Number of registered constructors per endpoint kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactorySummary {
    pub subscriptions: usize,
    pub publishers: usize,
    pub client_proxies: usize,
    pub server_proxies: usize,
}

impl FactorySummary {
    pub fn total(&self) -> usize {
        self.subscriptions + self.publishers + self.client_proxies + self.server_proxies
    }
}

/// Registry of endpoint constructors keyed by message or service type.
///
/// A bridge process owns exactly one factory (see `BridgeContext` in
/// `tether-host`) and shares it by `Arc` with every plugin it loads.
pub struct EndpointFactory {
    pub(crate) subscriptions: FactoryTable<Subscription>,
    pub(crate) publishers: FactoryTable<Publisher>,
    pub(crate) client_proxies: FactoryTable<ClientProxy>,
    pub(crate) server_proxies: FactoryTable<ServerProxy>,
    policy: DuplicatePolicy,
}

impl EndpointFactory {
    /// Create an empty factory applying `policy` to duplicate registrations.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            subscriptions: FactoryTable::new(policy),
            publishers: FactoryTable::new(policy),
            client_proxies: FactoryTable::new(policy),
            server_proxies: FactoryTable::new(policy),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// The table for category `C`.
    pub fn table<C: EndpointCategory>(&self) -> &FactoryTable<C> {
        C::table(self)
    }

    /// Register a constructor in category `C`'s table.
    pub fn register<C, F>(&self, type_name: impl Into<TypeName>, constructor: F) -> Result<(), TetherError>
    where
        C: EndpointCategory,
        F: Fn(C::Request) -> Result<Arc<C::Endpoint>, TetherError> + Send + Sync + 'static,
    {
        C::table(self).register(type_name, constructor)
    }

    /// Construct an endpoint from category `C`'s table; `Ok(None)` if unsupported.
    pub fn create<C: EndpointCategory>(
        &self,
        type_name: &str,
        request: C::Request,
    ) -> Result<Option<Arc<C::Endpoint>>, TetherError> {
        C::table(self).create(type_name, request)
    }

    pub fn register_subscription_factory<F>(
        &self,
        message_type: impl Into<TypeName>,
        factory: F,
    ) -> Result<(), TetherError>
    where
        F: Fn(SubscriptionRequest) -> Result<Arc<dyn TopicSubscription>, TetherError>
            + Send
            + Sync
            + 'static,
    {
        self.subscriptions.register(message_type, factory)
    }

    /// Subscribe to `topic_name` using the constructor registered for `message_type`.
    pub fn create_subscription(
        &self,
        message_type: &str,
        connection: ConnectionHandle,
        topic_name: impl Into<String>,
        callback: SubscriptionCallback,
        queue_size: u32,
        transport_hints: TransportHints,
    ) -> Result<Option<Arc<dyn TopicSubscription>>, TetherError> {
        self.subscriptions.create(
            message_type,
            SubscriptionRequest {
                connection,
                topic_name: topic_name.into(),
                callback,
                queue_size,
                transport_hints,
            },
        )
    }

    pub fn register_publisher_factory<F>(
        &self,
        message_type: impl Into<TypeName>,
        factory: F,
    ) -> Result<(), TetherError>
    where
        F: Fn(PublisherRequest) -> Result<Arc<dyn TopicPublisher>, TetherError>
            + Send
            + Sync
            + 'static,
    {
        self.publishers.register(message_type, factory)
    }

    /// Advertise `topic_name` using the constructor registered for `message_type`.
    pub fn create_publisher(
        &self,
        message_type: &str,
        connection: ConnectionHandle,
        topic_name: impl Into<String>,
        queue_size: u32,
        latch: bool,
    ) -> Result<Option<Arc<dyn TopicPublisher>>, TetherError> {
        self.publishers.create(
            message_type,
            PublisherRequest {
                connection,
                topic_name: topic_name.into(),
                queue_size,
                latch,
            },
        )
    }

    pub fn register_client_proxy_factory<F>(
        &self,
        service_type: impl Into<TypeName>,
        factory: F,
    ) -> Result<(), TetherError>
    where
        F: Fn(ClientProxyRequest) -> Result<Arc<dyn ServiceClient>, TetherError>
            + Send
            + Sync
            + 'static,
    {
        self.client_proxies.register(service_type, factory)
    }

    /// Offer `service_name` to the middleware, forwarding requests to `callback`.
    pub fn create_client_proxy(
        &self,
        service_type: &str,
        connection: ConnectionHandle,
        service_name: impl Into<String>,
        callback: RequestCallback,
    ) -> Result<Option<Arc<dyn ServiceClient>>, TetherError> {
        self.client_proxies.create(
            service_type,
            ClientProxyRequest {
                connection,
                service_name: service_name.into(),
                callback,
            },
        )
    }

    pub fn register_server_proxy_factory<F>(
        &self,
        service_type: impl Into<TypeName>,
        factory: F,
    ) -> Result<(), TetherError>
    where
        F: Fn(ServerProxyRequest) -> Result<Arc<dyn ServiceProvider>, TetherError>
            + Send
            + Sync
            + 'static,
    {
        self.server_proxies.register(service_type, factory)
    }

    /// Build a proxy that calls the middleware service `service_name`.
    pub fn create_server_proxy(
        &self,
        service_type: &str,
        connection: ConnectionHandle,
        service_name: impl Into<String>,
    ) -> Result<Option<Arc<dyn ServiceProvider>>, TetherError> {
        self.server_proxies.create(
            service_type,
            ServerProxyRequest {
                connection,
                service_name: service_name.into(),
            },
        )
    }

    /// Whether a constructor for `type_name` exists in the `kind` table.
    pub fn supports(&self, kind: EndpointKind, type_name: &str) -> bool {
        match kind {
            EndpointKind::Subscription => self.subscriptions.contains(type_name),
            EndpointKind::Publisher => self.publishers.contains(type_name),
            EndpointKind::ClientProxy => self.client_proxies.contains(type_name),
            EndpointKind::ServerProxy => self.server_proxies.contains(type_name),
        }
    }

    /// Sorted type names registered for `kind`.
    pub fn registered_types(&self, kind: EndpointKind) -> Vec<TypeName> {
        match kind {
            EndpointKind::Subscription => self.subscriptions.type_names(),
            EndpointKind::Publisher => self.publishers.type_names(),
            EndpointKind::ClientProxy => self.client_proxies.type_names(),
            EndpointKind::ServerProxy => self.server_proxies.type_names(),
        }
    }

    /// Successful registrations across all tables, replacements included.
    ///
    /// Unlike [`summary`](Self::summary) this never decreases and counts a
    /// replaced constructor again.
    pub fn registrations(&self) -> usize {
        self.subscriptions.registrations()
            + self.publishers.registrations()
            + self.client_proxies.registrations()
            + self.server_proxies.registrations()
    }

    pub fn summary(&self) -> FactorySummary {
        FactorySummary {
            subscriptions: self.subscriptions.len(),
            publishers: self.publishers.len(),
            client_proxies: self.client_proxies.len(),
            server_proxies: self.server_proxies.len(),
        }
    }
}

impl Default for EndpointFactory {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

impl std::fmt::Debug for EndpointFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointFactory")
            .field("policy", &self.policy)
            .field("summary", &self.summary())
            .finish()
    }
}
