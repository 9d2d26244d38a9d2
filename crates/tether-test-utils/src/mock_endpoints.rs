// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock implementations of the four endpoint roles.
//!
//! Each mock captures what the bridge hands it so tests can assert on it, and
//! exposes a method standing in for the middleware side (message arrival,
//! incoming service request).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tether_core::{
    CallHandle, Message, RequestCallback, ServiceClient, ServiceProvider, SubscriptionCallback,
    TetherError, TopicPublisher, TopicSubscription, TypeName,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Subscription that forwards injected messages to its callback.
pub struct MockSubscription {
    topic: String,
    callback: SubscriptionCallback,
}

impl MockSubscription {
    pub fn new(topic: impl Into<String>, callback: SubscriptionCallback) -> Self {
        Self {
            topic: topic.into(),
            callback,
        }
    }

    /// Simulate a message arriving from the middleware.
    pub fn deliver(&self, message: &Message) {
        (self.callback)(message);
    }
}

impl TopicSubscription for MockSubscription {
    fn topic_name(&self) -> &str {
        &self.topic
    }
}

/// Publisher that captures every published message.
///
/// Messages of a different type than the publisher was built for are
/// rejected with [`TetherError::Publish`].
pub struct MockPublisher {
    type_name: TypeName,
    topic: String,
    pub queue_size: u32,
    pub latch: bool,
    published: Mutex<Vec<Message>>,
}

impl MockPublisher {
    pub fn new(type_name: impl Into<TypeName>, topic: impl Into<String>, queue_size: u32, latch: bool) -> Self {
        Self {
            type_name: type_name.into(),
            topic: topic.into(),
            queue_size,
            latch,
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn published(&self) -> Vec<Message> {
        lock(&self.published).clone()
    }
}

impl TopicPublisher for MockPublisher {
    fn topic_name(&self) -> &str {
        &self.topic
    }

    fn publish(&self, message: &Message) -> Result<(), TetherError> {
        if message.type_name != self.type_name {
            return Err(TetherError::Publish {
                topic: self.topic.clone(),
                message: format!(
                    "expected `{}`, got `{}`",
                    self.type_name, message.type_name
                ),
            });
        }
        lock(&self.published).push(message.clone());
        Ok(())
    }
}

/// Client proxy that hands injected requests to the bridge and records responses.
pub struct MockServiceClient {
    service: String,
    callback: RequestCallback,
    responses: Mutex<Vec<Message>>,
}

impl MockServiceClient {
    pub fn new(service: impl Into<String>, callback: RequestCallback) -> Self {
        Self {
            service: service.into(),
            callback,
            responses: Mutex::new(Vec::new()),
        }
    }

    /// Simulate a middleware client calling the proxied service.
    pub fn inject_request(self: &Arc<Self>, request: &Message, call: CallHandle) {
        let client: Arc<dyn ServiceClient> = Arc::clone(self) as Arc<dyn ServiceClient>;
        (self.callback)(request, client, call);
    }

    pub fn responses(&self) -> Vec<Message> {
        lock(&self.responses).clone()
    }
}

impl ServiceClient for MockServiceClient {
    fn service_name(&self) -> &str {
        &self.service
    }

    fn receive_response(&self, _call: CallHandle, response: &Message) {
        lock(&self.responses).push(response.clone());
    }
}

/// Server proxy that answers every call immediately with `{"echo": <request payload>}`.
pub struct MockServiceProvider {
    service: String,
    requests: Mutex<Vec<Message>>,
}

impl MockServiceProvider {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Message> {
        lock(&self.requests).clone()
    }
}

impl ServiceProvider for MockServiceProvider {
    fn service_name(&self) -> &str {
        &self.service
    }

    fn call_service(&self, request: &Message, client: Arc<dyn ServiceClient>, call: CallHandle) {
        lock(&self.requests).push(request.clone());
        let response = Message::new(
            request.type_name.clone(),
            serde_json::json!({ "echo": request.payload }),
        );
        client.receive_response(call, &response);
    }
}
