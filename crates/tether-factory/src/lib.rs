// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type-keyed endpoint factory for the Tether bridge.
//!
//! Plugins register constructors for topic subscriptions, topic publishers,
//! service client proxies and service server proxies, keyed by the message or
//! service type name. The bridge host later builds endpoints from nothing but
//! that name and the runtime arguments, getting back a role trait object or
//! `None` when no loaded plugin supports the type.

pub mod category;
pub mod factory;
pub mod plugin;
pub mod registrar;
pub mod table;

pub use category::{
    ClientProxy, ClientProxyRequest, Constructor, EndpointCategory, Publisher, PublisherRequest,
    ServerProxy, ServerProxyRequest, Subscription, SubscriptionRequest,
};
pub use factory::{EndpointFactory, FactorySummary};
pub use plugin::FactoryPlugin;
pub use registrar::{
    FactoryRegistrar, PublisherFactoryRegistrar, ServiceClientFactoryRegistrar,
    ServiceProviderFactoryRegistrar, SubscriptionFactoryRegistrar,
};
pub use table::FactoryTable;
