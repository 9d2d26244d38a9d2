// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot registration helpers.
//!
//! Constructing a registrar registers its constructor, with exactly the
//! effect of calling the matching `register_*_factory` method. Plugins build
//! one per (category, type) from their [`FactoryPlugin::register`](crate::FactoryPlugin::register)
//! function:
//!
//! ```
//! use std::sync::Arc;
//! use tether_core::{Message, TetherError, TopicPublisher};
//! use tether_factory::{EndpointFactory, PublisherFactoryRegistrar, PublisherRequest};
//!
//! struct Chatter(String);
//!
//! impl TopicPublisher for Chatter {
//!     fn topic_name(&self) -> &str {
//!         &self.0
//!     }
//!
//!     fn publish(&self, _message: &Message) -> Result<(), TetherError> {
//!         Ok(())
//!     }
//! }
//!
//! let factory = EndpointFactory::default();
//! let _chatter = PublisherFactoryRegistrar::new(&factory, "std_msgs/String", |req: PublisherRequest| {
//!     let publisher: Arc<dyn TopicPublisher> = Arc::new(Chatter(req.topic_name));
//!     Ok(publisher)
//! })?;
//! assert!(factory.supports(tether_core::EndpointKind::Publisher, "std_msgs/String"));
//! # Ok::<(), TetherError>(())
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use tether_core::{TetherError, TypeName};

use crate::category::{ClientProxy, EndpointCategory, Publisher, ServerProxy, Subscription};
use crate::factory::EndpointFactory;

/// Registers a constructor for category `C` when constructed. Holds no state.
#[must_use = "a registrar only reports whether registration succeeded"]
pub struct FactoryRegistrar<C: EndpointCategory> {
    _category: PhantomData<fn() -> C>,
}

impl<C: EndpointCategory> FactoryRegistrar<C> {
    pub fn new<F>(
        factory: &EndpointFactory,
        type_name: impl Into<TypeName>,
        constructor: F,
    ) -> Result<Self, TetherError>
    where
        F: Fn(C::Request) -> Result<Arc<C::Endpoint>, TetherError> + Send + Sync + 'static,
    {
        factory.register::<C, F>(type_name, constructor)?;
        Ok(Self {
            _category: PhantomData,
        })
    }
}

pub type SubscriptionFactoryRegistrar = FactoryRegistrar<Subscription>;

pub type PublisherFactoryRegistrar = FactoryRegistrar<Publisher>;

pub type ServiceClientFactoryRegistrar = FactoryRegistrar<ClientProxy>;

pub type ServiceProviderFactoryRegistrar = FactoryRegistrar<ServerProxy>;
