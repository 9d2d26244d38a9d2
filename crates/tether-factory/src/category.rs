// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Endpoint categories and the runtime arguments each one is built from.
//!
//! Every category fixes three things: its [`EndpointKind`], the owned request
//! a constructor receives, and the role trait the constructed endpoint is
//! returned as. [`FactoryTable`] is generic over this trait, so lookup and
//! dispatch are written once and each category's constructor signature stays
//! statically checked.

use std::fmt;
use std::sync::Arc;

use tether_core::{
    ConnectionHandle, EndpointKind, RequestCallback, ServiceClient, ServiceProvider,
    SubscriptionCallback, TetherError, TopicPublisher, TopicSubscription, TransportHints,
};

use crate::factory::EndpointFactory;
use crate::table::FactoryTable;

/// A category of endpoint the factory can construct.
pub trait EndpointCategory: Sized + Send + Sync + 'static {
    const KIND: EndpointKind;

    /// Runtime arguments forwarded to the constructor.
    type Request: Send + 'static;

    /// Role the constructed endpoint is handed out as.
    type Endpoint: ?Sized + Send + Sync + 'static;

    /// This category's table inside a factory.
    fn table(factory: &EndpointFactory) -> &FactoryTable<Self>;
}

/// Type-erased constructor stored in a [`FactoryTable`].
pub type Constructor<C> = dyn Fn(<C as EndpointCategory>::Request) -> Result<Arc<<C as EndpointCategory>::Endpoint>, TetherError>
    + Send
    + Sync;

/// Topic subscriptions.
pub enum Subscription {}

/// Topic publishers.
pub enum Publisher {}

/// Service client proxies.
pub enum ClientProxy {}

/// Service server proxies.
pub enum ServerProxy {}

impl EndpointCategory for Subscription {
    const KIND: EndpointKind = EndpointKind::Subscription;
    type Request = SubscriptionRequest;
    type Endpoint = dyn TopicSubscription;

    fn table(factory: &EndpointFactory) -> &FactoryTable<Self> {
        &factory.subscriptions
    }
}

impl EndpointCategory for Publisher {
    const KIND: EndpointKind = EndpointKind::Publisher;
    type Request = PublisherRequest;
    type Endpoint = dyn TopicPublisher;

    fn table(factory: &EndpointFactory) -> &FactoryTable<Self> {
        &factory.publishers
    }
}

impl EndpointCategory for ClientProxy {
    const KIND: EndpointKind = EndpointKind::ClientProxy;
    type Request = ClientProxyRequest;
    type Endpoint = dyn ServiceClient;

    fn table(factory: &EndpointFactory) -> &FactoryTable<Self> {
        &factory.client_proxies
    }
}

impl EndpointCategory for ServerProxy {
    const KIND: EndpointKind = EndpointKind::ServerProxy;
    type Request = ServerProxyRequest;
    type Endpoint = dyn ServiceProvider;

    fn table(factory: &EndpointFactory) -> &FactoryTable<Self> {
        &factory.server_proxies
    }
}

/// Arguments for constructing a topic subscription.
pub struct SubscriptionRequest {
    pub connection: ConnectionHandle,
    pub topic_name: String,
    /// Receives every message arriving on the topic.
    pub callback: SubscriptionCallback,
    pub queue_size: u32,
    pub transport_hints: TransportHints,
}

impl fmt::Debug for SubscriptionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionRequest")
            .field("connection", &self.connection)
            .field("topic_name", &self.topic_name)
            .field("queue_size", &self.queue_size)
            .field("transport_hints", &self.transport_hints)
            .finish_non_exhaustive()
    }
}

/// Arguments for constructing a topic publisher.
#[derive(Debug)]
pub struct PublisherRequest {
    pub connection: ConnectionHandle,
    pub topic_name: String,
    pub queue_size: u32,
    /// Replay the last published message to late subscribers.
    pub latch: bool,
}

/// Arguments for constructing a service client proxy.
pub struct ClientProxyRequest {
    pub connection: ConnectionHandle,
    pub service_name: String,
    /// Receives every request the proxy accepts from the middleware.
    pub callback: RequestCallback,
}

impl fmt::Debug for ClientProxyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientProxyRequest")
            .field("connection", &self.connection)
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

/// Arguments for constructing a service server proxy.
#[derive(Debug)]
pub struct ServerProxyRequest {
    pub connection: ConnectionHandle,
    pub service_name: String,
}
