// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Abstract roles that constructed endpoints must satisfy.
//!
//! The bridge holds every endpoint through one of these trait objects and
//! never learns the concrete message or service type behind it.

use std::sync::Arc;

use crate::error::TetherError;
use crate::types::{CallHandle, Message};

/// Invoked by a subscription for every message received on its topic.
pub type SubscriptionCallback = Arc<dyn Fn(&Message) + Send + Sync>;

/// Invoked by a client proxy for every request it receives from the middleware.
///
/// The callee answers later through [`ServiceClient::receive_response`] on the
/// client it was given, passing back the same call handle.
pub type RequestCallback = Arc<dyn Fn(&Message, Arc<dyn ServiceClient>, CallHandle) + Send + Sync>;

/// A live topic subscription. Dropping the last handle unsubscribes.
pub trait TopicSubscription: Send + Sync {
    fn topic_name(&self) -> &str;
}

/// Publishes bridge messages onto a middleware topic.
pub trait TopicPublisher: Send + Sync {
    fn topic_name(&self) -> &str;

    /// Convert and publish one message.
    fn publish(&self, message: &Message) -> Result<(), TetherError>;
}

/// Middleware-facing service endpoint that forwards requests into the bridge.
pub trait ServiceClient: Send + Sync {
    fn service_name(&self) -> &str;

    /// Deliver the response for an earlier request identified by `call`.
    fn receive_response(&self, call: CallHandle, response: &Message);
}

/// Calls a middleware service on behalf of the bridge.
pub trait ServiceProvider: Send + Sync {
    fn service_name(&self) -> &str;

    /// Issue `request`; the response is delivered to `client` with `call`.
    fn call_service(&self, request: &Message, client: Arc<dyn ServiceClient>, call: CallHandle);
}
